use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::AuthError;

/// Seconds before expiry at which a token is considered due for refresh.
const REFRESH_MARGIN_SECS: i64 = 300;

/// Token set for one credential audience
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenSet {
    /// Access token for API requests
    pub access_token: String,

    /// Optional refresh token for token renewal
    pub refresh_token: Option<String>,

    /// Token expiration timestamp (Unix timestamp)
    pub expires_at: i64,

    /// Audience this token was issued for
    pub audience: String,
}

impl TokenSet {
    /// Check if the token needs refresh (within 5 minutes of expiry)
    pub fn needs_refresh(&self) -> bool {
        let now = chrono::Utc::now().timestamp();
        now >= self.expires_at - REFRESH_MARGIN_SECS
    }

    /// Check if the token is expired
    pub fn is_expired(&self) -> bool {
        let now = chrono::Utc::now().timestamp();
        now >= self.expires_at
    }
}

/// File-backed token store, one JSON file per audience.
#[derive(Debug, Clone)]
pub struct TokenStore {
    dir: PathBuf,
}

impl TokenStore {
    /// Store tokens under `<config_dir>/tokens`.
    pub fn new(config_dir: &Path) -> Self {
        Self {
            dir: config_dir.join("tokens"),
        }
    }

    /// Percent-encoded audience, so distinct audiences never share a file.
    fn token_path(&self, audience: &str) -> PathBuf {
        self.dir.join(format!("{}.json", urlencoding::encode(audience)))
    }

    pub fn store(&self, token_set: &TokenSet) -> Result<(), AuthError> {
        fs::create_dir_all(&self.dir)
            .map_err(|e| AuthError::Storage(format!("create {}: {}", self.dir.display(), e)))?;

        let path = self.token_path(&token_set.audience);
        let json = serde_json::to_string_pretty(token_set)
            .map_err(|e| AuthError::Storage(format!("serialize token set: {}", e)))?;

        fs::write(&path, json)
            .map_err(|e| AuthError::Storage(format!("write {}: {}", path.display(), e)))?;

        tracing::debug!(audience = %token_set.audience, "Stored token set");
        Ok(())
    }

    /// Load the token set for `audience`; `Ok(None)` when nothing is stored.
    pub fn retrieve(&self, audience: &str) -> Result<Option<TokenSet>, AuthError> {
        let path = self.token_path(audience);
        if !path.exists() {
            return Ok(None);
        }

        let json = fs::read_to_string(&path)
            .map_err(|e| AuthError::Storage(format!("read {}: {}", path.display(), e)))?;

        let token_set: TokenSet = serde_json::from_str(&json)
            .map_err(|e| AuthError::Storage(format!("parse {}: {}", path.display(), e)))?;

        if token_set.audience != audience {
            tracing::warn!(
                requested = audience,
                stored = %token_set.audience,
                "Ignoring token set issued for another audience"
            );
            return Ok(None);
        }

        Ok(Some(token_set))
    }

    pub fn delete(&self, audience: &str) -> Result<(), AuthError> {
        let path = self.token_path(audience);

        if path.exists() {
            fs::remove_file(&path)
                .map_err(|e| AuthError::Storage(format!("remove {}: {}", path.display(), e)))?;
            tracing::info!(audience, "Deleted stored token set");
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::expect_used)]
    use super::*;

    fn token(audience: &str, expires_at: i64) -> TokenSet {
        TokenSet {
            access_token: "access".to_string(),
            refresh_token: Some("refresh".to_string()),
            expires_at,
            audience: audience.to_string(),
        }
    }

    #[test]
    fn test_token_expiry() {
        let now = chrono::Utc::now().timestamp();

        let expired = token("aud", now - 3600);
        assert!(expired.is_expired());
        assert!(expired.needs_refresh());

        let valid = token("aud", now + 3600);
        assert!(!valid.is_expired());
        assert!(!valid.needs_refresh());

        let soon = token("aud", now + 200);
        assert!(!soon.is_expired());
        assert!(soon.needs_refresh());
    }

    #[test]
    fn test_store_retrieve_delete() {
        let dir = tempfile::tempdir().unwrap();
        let store = TokenStore::new(dir.path());
        let audience = "https://weather-api.example.com";

        assert!(store.retrieve(audience).unwrap().is_none());
        store.store(&token(audience, 42)).unwrap();
        let loaded = store.retrieve(audience).unwrap().unwrap();
        assert_eq!(loaded.expires_at, 42);
        assert_eq!(loaded.audience, audience);

        store.delete(audience).unwrap();
        assert!(store.retrieve(audience).unwrap().is_none());
    }

    #[test]
    fn test_audiences_are_stored_separately() {
        let dir = tempfile::tempdir().unwrap();
        let store = TokenStore::new(dir.path());

        store.store(&token("https://a.example.com", 1)).unwrap();
        store.store(&token("https://b.example.com", 2)).unwrap();

        assert_eq!(store.retrieve("https://a.example.com").unwrap().unwrap().expires_at, 1);
        assert_eq!(store.retrieve("https://b.example.com").unwrap().unwrap().expires_at, 2);
    }

    #[test]
    fn test_similar_audiences_do_not_collide() {
        let dir = tempfile::tempdir().unwrap();
        let store = TokenStore::new(dir.path());

        store.store(&token("https://weather.api", 1)).unwrap();
        assert!(store.retrieve("https://weather_api").unwrap().is_none());

        store.store(&token("https://weather_api", 2)).unwrap();
        assert_eq!(store.retrieve("https://weather.api").unwrap().unwrap().expires_at, 1);
        assert_eq!(store.retrieve("https://weather_api").unwrap().unwrap().expires_at, 2);
    }

    #[test]
    fn test_token_for_other_audience_is_ignored() {
        let dir = tempfile::tempdir().unwrap();
        let store = TokenStore::new(dir.path());
        std::fs::create_dir_all(dir.path().join("tokens")).unwrap();
        let misplaced = serde_json::to_string(&token("https://other.example.com", 1)).unwrap();
        std::fs::write(store.token_path("https://weather.example.com"), misplaced).unwrap();

        assert!(store
            .retrieve("https://weather.example.com")
            .unwrap()
            .is_none());
    }

    #[test]
    fn test_corrupt_file_is_storage_error() {
        let dir = tempfile::tempdir().unwrap();
        let store = TokenStore::new(dir.path());
        std::fs::create_dir_all(dir.path().join("tokens")).unwrap();
        std::fs::write(store.token_path("aud"), "{not json").unwrap();

        assert!(matches!(store.retrieve("aud"), Err(AuthError::Storage(_))));
    }
}
