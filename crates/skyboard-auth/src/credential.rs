use std::future::Future;

use crate::error::AuthError;

/// Supplies bearer tokens scoped to an audience.
///
/// Implementations may suspend (network refresh) and may fail; callers treat
/// every failure as "no credential right now" and never retry on their own.
pub trait CredentialSource: Send + Sync {
    fn get_credential(
        &self,
        audience: &str,
    ) -> impl Future<Output = Result<String, AuthError>> + Send;
}

/// A fixed token, typically from config or `SKYBOARD_ACCESS_TOKEN`.
#[derive(Debug, Clone)]
pub struct StaticCredential {
    token: String,
}

impl StaticCredential {
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
        }
    }
}

impl CredentialSource for StaticCredential {
    async fn get_credential(&self, audience: &str) -> Result<String, AuthError> {
        if self.token.is_empty() {
            return Err(AuthError::NotSignedIn(audience.to_string()));
        }
        Ok(self.token.clone())
    }
}
