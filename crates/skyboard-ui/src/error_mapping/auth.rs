use skyboard_auth::AuthError;
use skyboard_core::{AppError, AuthError as CoreAuthError};

use super::IntoAppError;

impl IntoAppError for AuthError {
    fn into_app_error(self) -> AppError {
        match self {
            AuthError::NotSignedIn(_) => AppError::Auth(CoreAuthError::NotSignedIn),
            AuthError::SessionExpired(_) => AppError::Auth(CoreAuthError::SessionExpired),
            AuthError::ProviderUnreachable(e) => {
                AppError::Auth(CoreAuthError::ProviderUnreachable(e.to_string()))
            }
            AuthError::Provider(s) => AppError::Auth(CoreAuthError::ProviderUnreachable(s)),
            AuthError::Storage(s) => AppError::Auth(CoreAuthError::StorageError(s)),
        }
    }
}
