//! Credential + read pipeline.
//!
//! One fetch is exactly two suspension points: acquire a token for the
//! audience, then perform the authorized GET. Failures of either step come back
//! as a `FetchError`; nothing here retries.

use std::future::Future;
use std::sync::Arc;

use skyboard_auth::CredentialSource;

use crate::client::WeatherClient;
use crate::error::FetchError;
use crate::types::WeatherRecord;

/// Anything that can produce the weather collection for an audience.
pub trait WeatherSource: Send + Sync {
    fn fetch(
        &self,
        audience: &str,
    ) -> impl Future<Output = Result<Vec<WeatherRecord>, FetchError>> + Send;
}

pub struct WeatherFetcher<C> {
    credentials: Arc<C>,
    client: WeatherClient,
}

impl<C: CredentialSource> WeatherFetcher<C> {
    pub fn new(credentials: Arc<C>, client: WeatherClient) -> Self {
        Self {
            credentials,
            client,
        }
    }

    /// Fetch one city's record through the same credential pipeline.
    pub async fn fetch_city(
        &self,
        audience: &str,
        city_code: &str,
    ) -> Result<WeatherRecord, FetchError> {
        let token = self.credentials.get_credential(audience).await?;
        self.client.get_city_weather(&token, city_code).await
    }
}

impl<C: CredentialSource> WeatherSource for WeatherFetcher<C> {
    async fn fetch(&self, audience: &str) -> Result<Vec<WeatherRecord>, FetchError> {
        let token = self.credentials.get_credential(audience).await?;
        let records = self.client.list_weather(&token).await?;
        tracing::info!(count = records.len(), "Fetched weather collection");
        Ok(records)
    }
}
