//! Credential errors.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum AuthError {
    #[error("Not signed in for audience {0}")]
    NotSignedIn(String),

    #[error("Session expired: {0}")]
    SessionExpired(String),

    #[error("Identity provider unreachable: {0}")]
    ProviderUnreachable(#[from] reqwest::Error),

    #[error("Identity provider error: {0}")]
    Provider(String),

    #[error("Token storage error: {0}")]
    Storage(String),
}

impl AuthError {
    /// User-friendly error message for UI display.
    pub fn user_message(&self) -> String {
        match self {
            Self::NotSignedIn(_) => "Please sign in to continue".to_string(),
            Self::SessionExpired(_) => "Your session has expired. Please sign in again.".to_string(),
            Self::ProviderUnreachable(_) => {
                "Unable to reach the sign-in service. Check your connection.".to_string()
            }
            Self::Provider(_) => "Sign-in service error. Please try again.".to_string(),
            Self::Storage(_) => "Saved credentials could not be read.".to_string(),
        }
    }

    /// Whether the user has to sign in again before a retry can succeed.
    pub fn requires_sign_in(&self) -> bool {
        matches!(self, Self::NotSignedIn(_) | Self::SessionExpired(_))
    }
}
