//! Weather backend: async fetch of the weather collection.
//! All network work runs off the UI thread; results sent via mpsc.

use std::sync::mpsc::Sender;
use std::sync::Arc;

use skyboard_weather::{FetchError, WeatherRecord, WeatherSource};
use tokio::runtime::Handle;
use tokio_util::sync::CancellationToken;

/// Identifies one dispatched fetch. A result is only applied if its ticket
/// still matches the controller's current one.
///
/// `session` is unique per controller for the life of the process and ties a
/// result to the controller that dispatched it, independent of which channel
/// carried it. `attempt` counts dispatches within that controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchTicket {
    pub session: u64,
    pub attempt: u64,
}

/// Messages sent from async operations back to the UI thread
#[derive(Debug)]
pub enum WeatherServiceMessage {
    /// Result of fetching the weather collection
    FetchDone {
        ticket: FetchTicket,
        result: Result<Vec<WeatherRecord>, FetchError>,
    },
}

/// Request to fetch the weather collection asynchronously.
/// Sends `FetchDone` on the channel when complete; sends nothing if `cancel`
/// fires first.
pub fn request_fetch<S: WeatherSource + 'static>(
    tx: &Sender<WeatherServiceMessage>,
    runtime: &Handle,
    source: Arc<S>,
    audience: String,
    ticket: FetchTicket,
    cancel: CancellationToken,
) {
    let tx = tx.clone();

    runtime.spawn(async move {
        let result = tokio::select! {
            _ = cancel.cancelled() => {
                tracing::debug!(?ticket, "Weather fetch cancelled");
                return;
            }
            result = source.fetch(&audience) => result,
        };

        if tx
            .send(WeatherServiceMessage::FetchDone { ticket, result })
            .is_err()
        {
            tracing::debug!(?ticket, "Weather fetch finished after receiver was dropped");
        }
    });
}
