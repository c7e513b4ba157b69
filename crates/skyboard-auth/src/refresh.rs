//! Refresh-token credential source.
//!
//! Tokens handed over by the sign-in flow are kept per audience, in memory and
//! in a [`TokenStore`]. A token close to expiry is renewed with an OAuth2
//! `refresh_token` grant before it is returned.

use std::collections::HashMap;
use std::time::Duration;

use parking_lot::Mutex;
use serde::Deserialize;

use crate::credential::CredentialSource;
use crate::error::AuthError;
use crate::storage::{TokenSet, TokenStore};

const DEFAULT_EXPIRES_IN_SECS: i64 = 3600;
const REQUEST_TIMEOUT_SECS: u64 = 10;

#[derive(Debug, Clone)]
pub struct RefreshConfig {
    /// OAuth2 token endpoint
    pub token_url: String,
    /// OAuth2 client identifier
    pub client_id: String,
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    refresh_token: Option<String>,
    expires_in: Option<i64>,
}

pub struct RefreshingCredentialSource {
    client: reqwest::Client,
    config: RefreshConfig,
    store: TokenStore,
    cache: Mutex<HashMap<String, TokenSet>>,
}

impl RefreshingCredentialSource {
    pub fn new(config: RefreshConfig, store: TokenStore) -> Self {
        Self {
            client: reqwest::Client::new(),
            config,
            store,
            cache: Mutex::new(HashMap::new()),
        }
    }

    /// Accept tokens from the sign-in flow.
    pub fn sign_in_with(&self, token_set: TokenSet) -> Result<(), AuthError> {
        self.store.store(&token_set)?;
        self.cache.lock().insert(token_set.audience.clone(), token_set);
        Ok(())
    }

    /// Forget everything held for `audience`.
    pub fn sign_out(&self, audience: &str) -> Result<(), AuthError> {
        self.cache.lock().remove(audience);
        self.store.delete(audience)
    }

    fn cached(&self, audience: &str) -> Result<Option<TokenSet>, AuthError> {
        if let Some(token_set) = self.cache.lock().get(audience) {
            return Ok(Some(token_set.clone()));
        }

        let stored = self.store.retrieve(audience)?;
        if let Some(token_set) = &stored {
            self.cache
                .lock()
                .insert(audience.to_string(), token_set.clone());
        }
        Ok(stored)
    }

    #[tracing::instrument(skip(self, refresh_token), level = "info")]
    async fn refresh(&self, audience: &str, refresh_token: &str) -> Result<TokenSet, AuthError> {
        let response = self
            .client
            .post(&self.config.token_url)
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .form(&[
                ("grant_type", "refresh_token"),
                ("client_id", self.config.client_id.as_str()),
                ("refresh_token", refresh_token),
                ("audience", audience),
            ])
            .send()
            .await?;

        let status = response.status();
        if status.as_u16() == 400 || status.as_u16() == 401 {
            let text = response.text().await.unwrap_or_default();
            return Err(AuthError::SessionExpired(text));
        }
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            return Err(AuthError::Provider(format!("{}: {}", status, text)));
        }

        let body: TokenResponse = response
            .json()
            .await
            .map_err(|e| AuthError::Provider(format!("Malformed token response: {}", e)))?;

        let expires_in = body.expires_in.unwrap_or(DEFAULT_EXPIRES_IN_SECS);
        Ok(TokenSet {
            access_token: body.access_token,
            refresh_token: body.refresh_token.or_else(|| Some(refresh_token.to_string())),
            expires_at: chrono::Utc::now().timestamp() + expires_in,
            audience: audience.to_string(),
        })
    }
}

impl CredentialSource for RefreshingCredentialSource {
    async fn get_credential(&self, audience: &str) -> Result<String, AuthError> {
        let current = self.cached(audience)?;

        if let Some(token_set) = &current {
            if !token_set.needs_refresh() {
                return Ok(token_set.access_token.clone());
            }
        }

        let Some(current) = current else {
            return Err(AuthError::NotSignedIn(audience.to_string()));
        };
        let refresh_token = current
            .refresh_token
            .clone()
            .ok_or_else(|| AuthError::NotSignedIn(audience.to_string()))?;

        tracing::info!(audience, "Access token due for refresh");
        let renewed = match self.refresh(audience, &refresh_token).await {
            Ok(renewed) => renewed,
            Err(e) if e.requires_sign_in() => {
                tracing::warn!(audience, "Refresh token rejected, clearing stored tokens");
                if let Err(clear) = self.sign_out(audience) {
                    tracing::warn!("Failed to clear rejected tokens: {}", clear);
                }
                return Err(e);
            }
            // Inside the refresh margin the old token still works.
            Err(e) if !current.is_expired() => {
                tracing::warn!(audience, "Token refresh failed, using current token: {}", e);
                return Ok(current.access_token);
            }
            Err(e) => return Err(e),
        };

        if let Err(e) = self.store.store(&renewed) {
            tracing::warn!("Failed to persist refreshed token: {}", e);
        }
        let access_token = renewed.access_token.clone();
        self.cache.lock().insert(audience.to_string(), renewed);

        Ok(access_token)
    }
}
