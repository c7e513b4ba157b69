//! Weather API client.

use std::time::Duration;

use tracing::instrument;

use crate::error::FetchError;
use crate::types::WeatherRecord;

#[derive(Debug, Clone)]
pub struct WeatherClient {
    client: reqwest::Client,
    base_url: String,
}

impl WeatherClient {
    /// `base_url` is the API root; the collection lives at `{base_url}/weather`.
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, FetchError> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Read the full weather collection.
    #[instrument(skip(self, token), level = "info")]
    pub async fn list_weather(&self, token: &str) -> Result<Vec<WeatherRecord>, FetchError> {
        let url = format!("{}/weather", self.base_url);

        let response = self.client.get(&url).bearer_auth(token).send().await?;

        self.handle_response(response, None).await
    }

    /// Read a single city's record.
    #[instrument(skip(self, token), level = "info")]
    pub async fn get_city_weather(
        &self,
        token: &str,
        city_code: &str,
    ) -> Result<WeatherRecord, FetchError> {
        let url = format!(
            "{}/weather/{}",
            self.base_url,
            urlencoding::encode(city_code)
        );

        let response = self.client.get(&url).bearer_auth(token).send().await?;

        self.handle_response(response, Some(city_code)).await
    }

    async fn handle_response<T: serde::de::DeserializeOwned>(
        &self,
        response: reqwest::Response,
        city_code: Option<&str>,
    ) -> Result<T, FetchError> {
        let status = response.status();

        if status.is_success() {
            let body = response.text().await?;
            serde_json::from_str(&body).map_err(|e| FetchError::Parse(e.to_string()))
        } else if status.as_u16() == 401 || status.as_u16() == 403 {
            Err(FetchError::Unauthorized(status.as_u16()))
        } else if let (404, Some(code)) = (status.as_u16(), city_code) {
            Err(FetchError::CityNotFound(code.to_string()))
        } else {
            let message = response.text().await.unwrap_or_default();
            Err(FetchError::Status {
                status: status.as_u16(),
                message,
            })
        }
    }
}
