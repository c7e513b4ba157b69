//! Dashboard controller: fetch lifecycle, search term and card state.
//!
//! The controller is owned by the host's UI thread. Network work is pushed to
//! the tokio runtime through `services::weather_service`, and results come
//! back over an mpsc channel drained by `poll_channel`.

use std::collections::HashSet;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::mpsc::{self, Receiver, RecvTimeoutError, Sender};
use std::sync::Arc;
use std::time::{Duration, Instant};

use chrono::{DateTime, Local, TimeZone};
use skyboard_weather::{filter_records, FetchError, WeatherRecord, WeatherSource};
use tokio::runtime::Handle;
use tokio_util::sync::CancellationToken;

use super::card_model::{present_card, CardState, CardStates};
use crate::error_mapping::IntoAppError;
use crate::services::weather_service::{request_fetch, FetchTicket, WeatherServiceMessage};
use crate::view::{
    no_matches_message, DashboardView, GridView, SearchBox, DEFAULT_SEARCH_PLACEHOLDER,
    LOADING_MESSAGE,
};

/// Shown for every failed fetch; the cause goes to the log.
pub const FETCH_FAILED_MESSAGE: &str = "Failed to fetch weather data. Please try again later.";

static NEXT_SESSION: AtomicU64 = AtomicU64::new(1);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Loading,
    Ready,
    Failed,
}

/// State owned by the controller. `error_message` is set exactly when the
/// phase is `Failed`.
#[derive(Debug, Clone)]
pub struct DashboardState {
    records: Arc<[WeatherRecord]>,
    phase: Phase,
    error_message: Option<String>,
    search_term: String,
}

impl DashboardState {
    fn new() -> Self {
        Self {
            records: Arc::from(Vec::new()),
            phase: Phase::Loading,
            error_message: None,
            search_term: String::new(),
        }
    }

    pub fn records(&self) -> &Arc<[WeatherRecord]> {
        &self.records
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn error_message(&self) -> Option<&str> {
        self.error_message.as_deref()
    }

    pub fn search_term(&self) -> &str {
        &self.search_term
    }

    /// Records that would be rendered as cards. Empty unless `Ready`.
    pub fn visible_records(&self) -> Vec<&WeatherRecord> {
        match self.phase {
            Phase::Ready => filter_records(&self.records, &self.search_term),
            Phase::Loading | Phase::Failed => Vec::new(),
        }
    }
}

/// Input delivered by the host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DashboardEvent {
    SearchTermChanged(String),
    RetryRequested,
    /// Body press on a collapsed card or dismiss press on an expanded one
    CardToggled(String),
}

pub struct DashboardController<S: WeatherSource + 'static> {
    state: DashboardState,
    cards: CardStates,
    source: Arc<S>,
    runtime: Handle,
    audience: String,
    session: u64,
    attempt: u64,
    tx: Sender<WeatherServiceMessage>,
    rx: Receiver<WeatherServiceMessage>,
    cancel: CancellationToken,
    fetches_dispatched: usize,
    last_failure_kind: Option<&'static str>,
    search_placeholder: String,
}

impl<S: WeatherSource + 'static> DashboardController<S> {
    /// Start a dashboard session. The first fetch is dispatched immediately.
    pub fn new(source: Arc<S>, runtime: Handle, audience: impl Into<String>) -> Self {
        let (tx, rx) = mpsc::channel();
        let session = NEXT_SESSION.fetch_add(1, Ordering::Relaxed);

        let mut controller = Self {
            state: DashboardState::new(),
            cards: CardStates::new(),
            source,
            runtime,
            audience: audience.into(),
            session,
            attempt: 0,
            tx,
            rx,
            cancel: CancellationToken::new(),
            fetches_dispatched: 0,
            last_failure_kind: None,
            search_placeholder: DEFAULT_SEARCH_PLACEHOLDER.to_string(),
        };

        tracing::info!(session, "Dashboard session started");
        controller.dispatch_fetch();
        controller
    }

    fn current_ticket(&self) -> FetchTicket {
        FetchTicket {
            session: self.session,
            attempt: self.attempt,
        }
    }

    fn dispatch_fetch(&mut self) {
        self.attempt += 1;
        self.fetches_dispatched += 1;
        self.state.phase = Phase::Loading;
        self.state.error_message = None;

        let ticket = self.current_ticket();
        tracing::info!(?ticket, "Loading weather data");

        request_fetch(
            &self.tx,
            &self.runtime,
            Arc::clone(&self.source),
            self.audience.clone(),
            ticket,
            self.cancel.child_token(),
        );
    }

    /// Re-fetch after a failure. Ignored in any other phase.
    pub fn retry_requested(&mut self) {
        if self.state.phase != Phase::Failed {
            tracing::debug!(phase = ?self.state.phase, "Ignoring retry outside Failed");
            return;
        }
        self.dispatch_fetch();
    }

    pub fn search_term_changed(&mut self, term: impl Into<String>) {
        self.state.search_term = term.into();

        let visible: HashSet<&str> = self
            .state
            .visible_records()
            .into_iter()
            .map(|r| r.city_code.as_str())
            .collect();
        self.cards.retain_visible(&visible);
    }

    /// Toggle a rendered card. Returns the new state, or `None` if no card
    /// with that code is currently rendered.
    pub fn card_toggled(&mut self, city_code: &str) -> Option<CardState> {
        let rendered = self
            .state
            .visible_records()
            .iter()
            .any(|r| r.city_code == city_code);
        if !rendered {
            tracing::debug!(city_code, "Ignoring toggle for card that is not rendered");
            return None;
        }
        Some(self.cards.toggle(city_code))
    }

    pub fn handle_event(&mut self, event: DashboardEvent) {
        match event {
            DashboardEvent::SearchTermChanged(term) => self.search_term_changed(term),
            DashboardEvent::RetryRequested => self.retry_requested(),
            DashboardEvent::CardToggled(code) => {
                self.card_toggled(&code);
            }
        }
    }

    /// Apply any finished fetches without blocking.
    /// Returns true if state changed.
    pub fn poll_channel(&mut self) -> bool {
        let mut changed = false;
        while let Ok(msg) = self.rx.try_recv() {
            changed |= self.apply(msg);
        }
        changed
    }

    /// Block until the current fetch settles or `timeout` elapses.
    /// Returns true if the controller is no longer `Loading`.
    pub fn wait_for_fetch(&mut self, timeout: Duration) -> bool {
        let deadline = Instant::now() + timeout;

        while self.state.phase == Phase::Loading {
            let remaining = deadline.saturating_duration_since(Instant::now());
            match self.rx.recv_timeout(remaining) {
                Ok(msg) => {
                    self.apply(msg);
                }
                Err(RecvTimeoutError::Timeout | RecvTimeoutError::Disconnected) => return false,
            }
        }
        true
    }

    fn apply(&mut self, msg: WeatherServiceMessage) -> bool {
        match msg {
            WeatherServiceMessage::FetchDone { ticket, result } => {
                if ticket != self.current_ticket() || self.state.phase != Phase::Loading {
                    tracing::debug!(
                        ?ticket,
                        current = ?self.current_ticket(),
                        "Discarding stale weather result"
                    );
                    return false;
                }
                match result {
                    Ok(records) => self.on_fetch_success(records),
                    Err(e) => self.on_fetch_failure(e),
                }
                true
            }
        }
    }

    fn on_fetch_success(&mut self, records: Vec<WeatherRecord>) {
        tracing::info!(count = records.len(), "Weather data ready");
        self.state.records = Arc::from(records);
        self.state.phase = Phase::Ready;
        self.state.error_message = None;
        self.cards.clear();
        self.last_failure_kind = None;
    }

    fn on_fetch_failure(&mut self, error: FetchError) {
        let kind = error.kind();
        let credential_problem = error.is_auth();
        let app_error = error.into_app_error();
        tracing::error!(
            kind,
            credential_problem,
            category = app_error.kind(),
            user_message = app_error.user_message(),
            "Failed to fetch weather data: {}",
            app_error
        );

        self.state.phase = Phase::Failed;
        self.state.error_message = Some(FETCH_FAILED_MESSAGE.to_string());
        self.cards.clear();
        self.last_failure_kind = Some(kind);
    }

    pub fn set_search_placeholder(&mut self, placeholder: impl Into<String>) {
        self.search_placeholder = placeholder.into();
    }

    /// Presentation tree in the local time zone.
    pub fn view(&self) -> DashboardView {
        self.view_at(&Local::now())
    }

    pub fn view_at<Tz: TimeZone>(&self, now: &DateTime<Tz>) -> DashboardView
    where
        Tz::Offset: std::fmt::Display,
    {
        match self.state.phase {
            Phase::Loading => DashboardView::Loading {
                message: LOADING_MESSAGE.to_string(),
            },
            Phase::Failed => DashboardView::Failed {
                message: self
                    .state
                    .error_message
                    .clone()
                    .unwrap_or_else(|| FETCH_FAILED_MESSAGE.to_string()),
                retry_enabled: true,
            },
            Phase::Ready => {
                let visible = self.state.visible_records();
                let grid = if visible.is_empty() {
                    GridView::Empty {
                        message: no_matches_message(&self.state.search_term),
                    }
                } else {
                    GridView::Cards {
                        cards: visible
                            .into_iter()
                            .map(|r| present_card(r, self.cards.get(&r.city_code), now))
                            .collect(),
                    }
                };
                DashboardView::Ready {
                    search: SearchBox {
                        placeholder: self.search_placeholder.clone(),
                        value: self.state.search_term.clone(),
                    },
                    grid,
                }
            }
        }
    }

    pub fn state(&self) -> &DashboardState {
        &self.state
    }

    pub fn phase(&self) -> Phase {
        self.state.phase
    }

    pub fn fetches_dispatched(&self) -> usize {
        self.fetches_dispatched
    }

    /// Diagnostic tag of the last failure, cleared on success.
    pub fn last_failure_kind(&self) -> Option<&'static str> {
        self.last_failure_kind
    }
}

impl<S: WeatherSource + 'static> Drop for DashboardController<S> {
    fn drop(&mut self) {
        tracing::debug!(session = self.session, "Dashboard session ended");
        self.cancel.cancel();
    }
}
