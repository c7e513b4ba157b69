//! Centralized error types for Skyboard.
//!
//! This module provides a typed error hierarchy that:
//! - Enables precise error handling throughout the codebase
//! - Provides user-friendly messages suitable for UI display
//! - Preserves full error context for debugging/logging

use thiserror::Error;

/// Top-level application error type.
///
/// Crate-level errors (credential, fetch) are mapped into this type by the UI
/// crate. Use `user_message()` for display and `kind()` for log tagging.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Network error: {0}")]
    Network(#[from] NetworkError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Authentication error: {0}")]
    Auth(#[from] AuthError),

    #[error("Weather service error: {0}")]
    Weather(#[from] WeatherError),
}

impl AppError {
    /// Returns a user-friendly message suitable for display in the UI.
    pub fn user_message(&self) -> &'static str {
        match self {
            AppError::Network(e) => e.user_message(),
            AppError::Config(e) => e.user_message(),
            AppError::Auth(e) => e.user_message(),
            AppError::Weather(e) => e.user_message(),
        }
    }

    /// Short stable tag for structured logs.
    pub fn kind(&self) -> &'static str {
        match self {
            AppError::Network(_) => "network",
            AppError::Config(_) => "config",
            AppError::Auth(_) => "auth",
            AppError::Weather(_) => "weather",
        }
    }
}

/// Network-related errors (HTTP, connectivity).
#[derive(Debug, Error)]
pub enum NetworkError {
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    #[error("Request timed out")]
    Timeout,

    #[error("Server error: {status} - {message}")]
    ServerError { status: u16, message: String },

    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

impl NetworkError {
    pub fn user_message(&self) -> &'static str {
        match self {
            NetworkError::ConnectionFailed(_) => {
                "Unable to connect. Check your internet connection."
            }
            NetworkError::Timeout => "The request timed out. Please try again.",
            NetworkError::ServerError { status, .. } if *status >= 500 => {
                "The server is experiencing issues. Please try again later."
            }
            NetworkError::ServerError { .. } => "The request failed. Please try again.",
            NetworkError::InvalidResponse(_) => {
                "Received an unexpected response. Please try again."
            }
        }
    }
}

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration directory not found: {0}")]
    NotFound(String),

    #[error("Invalid configuration: {0}")]
    Invalid(String),

    #[error("Configuration parse error: {0}")]
    ParseError(String),

    #[error("Configuration file error: {0}")]
    Io(String),
}

impl ConfigError {
    pub fn user_message(&self) -> &'static str {
        match self {
            ConfigError::NotFound(_) => "No configuration directory is available.",
            ConfigError::Invalid(_) => "Invalid configuration. Check your settings.",
            ConfigError::ParseError(_) => "Configuration file is malformed. Check your settings.",
            ConfigError::Io(_) => "The configuration file could not be read or written.",
        }
    }
}

/// Credential errors as seen by the application layer.
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("Not signed in")]
    NotSignedIn,

    #[error("Session expired")]
    SessionExpired,

    #[error("Identity provider unreachable: {0}")]
    ProviderUnreachable(String),

    #[error("Token storage error: {0}")]
    StorageError(String),
}

impl AuthError {
    pub fn user_message(&self) -> &'static str {
        match self {
            AuthError::NotSignedIn => "Not signed in. Please sign in.",
            AuthError::SessionExpired => "Your session has expired. Please sign in again.",
            AuthError::ProviderUnreachable(_) => {
                "Unable to reach the sign-in service. Please try again later."
            }
            AuthError::StorageError(_) => "Failed to read saved credentials. Please sign in again.",
        }
    }
}

/// Weather API errors.
#[derive(Debug, Error)]
pub enum WeatherError {
    #[error("Weather API rejected the credential")]
    Unauthorized,

    #[error("City not found: {0}")]
    CityNotFound(String),

    #[error("Malformed weather payload: {0}")]
    InvalidPayload(String),
}

impl WeatherError {
    pub fn user_message(&self) -> &'static str {
        match self {
            WeatherError::Unauthorized => "Weather access was denied. Please sign in again.",
            WeatherError::CityNotFound(_) => "City not found.",
            WeatherError::InvalidPayload(_) => "Weather data could not be read. Please try again.",
        }
    }
}

/// Extension trait for converting reqwest errors to our error types.
pub trait ReqwestErrorExt {
    fn into_network_error(self) -> NetworkError;
}

impl ReqwestErrorExt for reqwest::Error {
    fn into_network_error(self) -> NetworkError {
        if self.is_timeout() {
            NetworkError::Timeout
        } else if self.is_connect() {
            NetworkError::ConnectionFailed(self.to_string())
        } else if self.is_decode() {
            NetworkError::InvalidResponse(self.to_string())
        } else if let Some(status) = self.status() {
            NetworkError::ServerError {
                status: status.as_u16(),
                message: self.to_string(),
            }
        } else {
            NetworkError::ConnectionFailed(self.to_string())
        }
    }
}
