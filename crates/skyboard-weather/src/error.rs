//! Fetch error taxonomy.

use skyboard_auth::AuthError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum FetchError {
    #[error("Credential unavailable: {0}")]
    Auth(#[from] AuthError),

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Weather API rejected the credential ({0})")]
    Unauthorized(u16),

    #[error("City not found: {0}")]
    CityNotFound(String),

    #[error("Weather API error: {status} - {message}")]
    Status { status: u16, message: String },

    #[error("Malformed weather payload: {0}")]
    Parse(String),
}

impl FetchError {
    /// Diagnostic tag; credential failures are kept apart from transport ones.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Auth(_) => "auth",
            Self::Network(_) => "network",
            Self::Unauthorized(_) => "unauthorized",
            Self::CityNotFound(_) => "not_found",
            Self::Status { .. } => "status",
            Self::Parse(_) => "parse",
        }
    }

    /// Short message suitable for a status line.
    pub fn user_message(&self) -> String {
        match self {
            Self::Auth(e) => e.user_message(),
            Self::Network(_) => "Could not reach the weather service.".to_string(),
            Self::Unauthorized(_) => "The weather service rejected your credentials.".to_string(),
            Self::CityNotFound(code) => format!("No weather data for city {}.", code),
            Self::Status { .. } => "The weather service returned an error.".to_string(),
            Self::Parse(_) => "The weather service sent an unreadable response.".to_string(),
        }
    }

    pub fn is_auth(&self) -> bool {
        matches!(self, Self::Auth(_) | Self::Unauthorized(_))
    }
}
