use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use url::Url;

use crate::error::ConfigError;

/// Environment variable consulted when no access token is configured.
pub const ACCESS_TOKEN_ENV: &str = "SKYBOARD_ACCESS_TOKEN";

/// Configuration validation errors
#[derive(Debug, Clone)]
pub struct ConfigValidationError {
    pub field: String,
    pub message: String,
}

impl std::fmt::Display for ConfigValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Result of config validation
#[derive(Debug, Clone, Default)]
pub struct ValidationResult {
    pub errors: Vec<ConfigValidationError>,
    pub warnings: Vec<ConfigValidationError>,
}

impl ValidationResult {
    /// Returns true if there are no errors (warnings are OK)
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn add_error(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.errors.push(ConfigValidationError {
            field: field.into(),
            message: message.into(),
        });
    }

    pub fn add_warning(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.warnings.push(ConfigValidationError {
            field: field.into(),
            message: message.into(),
        });
    }

    /// Get a user-friendly message summarizing all errors
    pub fn error_summary(&self) -> String {
        self.errors
            .iter()
            .map(|e| e.to_string())
            .collect::<Vec<_>>()
            .join("; ")
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Application configuration directory (token store lives here)
    pub config_dir: PathBuf,

    /// Weather API settings
    pub api: ApiConfig,

    /// Credential settings
    #[serde(default)]
    pub auth: AuthConfig,

    /// Presentation preferences
    #[serde(default)]
    pub ui: UiConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Base URL of the weather API; the collection lives at `{base_url}/weather`
    pub base_url: String,

    /// Audience the bearer credential must be scoped to
    pub audience: String,

    /// Per-request timeout in seconds
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
}

fn default_request_timeout_secs() -> u64 {
    10
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8080/api".to_string(),
            audience: "https://weather-api.example.com".to_string(),
            request_timeout_secs: default_request_timeout_secs(),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AuthConfig {
    /// OAuth2 token endpoint used for refresh-token grants. Empty disables refresh.
    #[serde(default)]
    pub token_url: String,

    /// OAuth2 client identifier sent with refresh-token grants
    #[serde(default)]
    pub client_id: String,

    /// Fixed bearer token (optional, can be set via environment)
    #[serde(default)]
    pub access_token: Option<String>,
}

impl AuthConfig {
    /// True if refresh-token grants can be attempted.
    pub fn refresh_enabled(&self) -> bool {
        !self.token_url.is_empty() && !self.client_id.is_empty()
    }

    /// Configured access token, falling back to `SKYBOARD_ACCESS_TOKEN`.
    pub fn effective_access_token(&self) -> Option<String> {
        self.access_token
            .clone()
            .filter(|t| !t.is_empty())
            .or_else(|| std::env::var(ACCESS_TOKEN_ENV).ok().filter(|t| !t.is_empty()))
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UiConfig {
    /// Placeholder shown in the empty search box
    pub search_placeholder: String,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            search_placeholder: "Search city...".to_string(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        let config_dir = dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("skyboard");

        Self {
            config_dir,
            api: ApiConfig::default(),
            auth: AuthConfig::default(),
            ui: UiConfig::default(),
        }
    }
}

impl Config {
    /// Load configuration from an explicit path, writing defaults if it doesn't exist
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            let config = Self::default();
            config.save_to(path)?;
            return Ok(config);
        }

        let contents = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::Io(format!("read {}: {}", path.display(), e)))?;

        toml::from_str(&contents)
            .map_err(|e| ConfigError::ParseError(format!("{}: {}", path.display(), e)))
    }

    /// Load configuration from the default location and validate it
    ///
    /// Returns an error if validation fails with critical errors; warnings are logged.
    pub fn load_validated() -> Result<(Self, ValidationResult), ConfigError> {
        let config_path = Self::config_path()?;
        Self::load_validated_from(&config_path)
    }

    pub fn load_validated_from(path: &Path) -> Result<(Self, ValidationResult), ConfigError> {
        let config = Self::load_from(path)?;
        let validation = config.validate();

        if !validation.is_valid() {
            return Err(ConfigError::Invalid(validation.error_summary()));
        }

        for warning in &validation.warnings {
            tracing::warn!("Config warning: {}", warning);
        }

        Ok((config, validation))
    }

    pub fn validate(&self) -> ValidationResult {
        let mut result = ValidationResult::default();

        validate_url(&self.api.base_url, "api.base_url", &mut result);

        if self.api.audience.trim().is_empty() {
            result.add_error("api.audience", "Credential audience must not be empty");
        }

        if self.api.request_timeout_secs == 0 {
            result.add_error(
                "api.request_timeout_secs",
                "Request timeout must be greater than 0",
            );
        } else if self.api.request_timeout_secs > 300 {
            result.add_warning(
                "api.request_timeout_secs",
                "Request timeout is unusually long (>300s)",
            );
        }

        if !self.auth.token_url.is_empty() {
            validate_url(&self.auth.token_url, "auth.token_url", &mut result);
            if self.auth.client_id.is_empty() {
                result.add_error("auth.client_id", "Client ID is required when token_url is set");
            }
        }

        if !self.auth.refresh_enabled() && self.auth.effective_access_token().is_none() {
            result.add_warning(
                "auth",
                "No credential configured - weather requests will fail until signed in",
            );
        }

        result
    }

    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .map_err(|e| ConfigError::Io(format!("create {}: {}", parent.display(), e)))?;
        }

        let contents = toml::to_string_pretty(self)
            .map_err(|e| ConfigError::ParseError(format!("serialize config: {}", e)))?;

        std::fs::write(path, contents)
            .map_err(|e| ConfigError::Io(format!("write {}: {}", path.display(), e)))
    }

    fn config_path() -> Result<PathBuf, ConfigError> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| ConfigError::NotFound("no user config directory".to_string()))?
            .join("skyboard");

        Ok(config_dir.join("config.toml"))
    }
}

fn validate_url(url_str: &str, field_name: &str, result: &mut ValidationResult) {
    match Url::parse(url_str) {
        Ok(url) => {
            if url.scheme() != "http" && url.scheme() != "https" {
                result.add_error(
                    field_name,
                    format!("URL must use http or https scheme, got: {}", url.scheme()),
                );
            }

            if url.host().is_none() {
                result.add_error(field_name, "URL must have a host");
            }

            if url.port() == Some(0) {
                result.add_error(field_name, "Port cannot be 0");
            }
        }
        Err(e) => {
            result.add_error(field_name, format!("Invalid URL: {}", e));
        }
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
    use super::*;

    fn with_token() -> Config {
        let mut config = Config::default();
        config.auth.access_token = Some("token".to_string());
        config
    }

    #[test]
    fn test_valid_default_config() {
        let result = with_token().validate();
        assert!(result.is_valid(), "Default config should be valid: {:?}", result.errors);
    }

    #[test]
    fn test_invalid_url() {
        let mut config = with_token();
        config.api.base_url = "not-a-url".to_string();
        let result = config.validate();
        assert!(!result.is_valid());
        assert!(result.errors.iter().any(|e| e.field == "api.base_url"));
    }

    #[test]
    fn test_invalid_url_scheme() {
        let mut config = with_token();
        config.api.base_url = "ftp://localhost:8080".to_string();
        let result = config.validate();
        assert!(!result.is_valid());
        assert!(result.errors.iter().any(|e| e.message.contains("http or https")));
    }

    #[test]
    fn test_empty_audience_is_error() {
        let mut config = with_token();
        config.api.audience = "  ".to_string();
        let result = config.validate();
        assert!(result.errors.iter().any(|e| e.field == "api.audience"));
    }

    #[test]
    fn test_zero_timeout_is_error() {
        let mut config = with_token();
        config.api.request_timeout_secs = 0;
        assert!(!config.validate().is_valid());
    }

    #[test]
    fn test_token_url_requires_client_id() {
        let mut config = with_token();
        config.auth.token_url = "https://login.example.com/oauth/token".to_string();
        let result = config.validate();
        assert!(result.errors.iter().any(|e| e.field == "auth.client_id"));

        config.auth.client_id = "client".to_string();
        assert!(config.validate().is_valid());
        assert!(config.auth.refresh_enabled());
    }

    #[test]
    fn test_configured_token_takes_precedence() {
        let auth = AuthConfig {
            access_token: Some("from-config".to_string()),
            ..AuthConfig::default()
        };
        assert_eq!(auth.effective_access_token().as_deref(), Some("from-config"));
    }

    #[test]
    fn test_validation_result_error_summary() {
        let mut result = ValidationResult::default();
        result.add_error("field1", "error1");
        result.add_error("field2", "error2");
        let summary = result.error_summary();
        assert!(summary.contains("field1"));
        assert!(summary.contains("field2"));
    }

    #[test]
    fn test_load_from_creates_defaults_then_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let created = Config::load_from(&path).unwrap();
        assert!(path.exists());
        assert_eq!(created.api.request_timeout_secs, 10);

        let mut edited = created.clone();
        edited.api.base_url = "https://weather.example.com/api".to_string();
        edited.save_to(&path).unwrap();

        let reloaded = Config::load_from(&path).unwrap();
        assert_eq!(reloaded.api.base_url, "https://weather.example.com/api");
        assert_eq!(reloaded.ui.search_placeholder, "Search city...");
    }

    #[test]
    fn test_malformed_file_is_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[api\nbase_url = ").unwrap();

        let err = Config::load_from(&path).unwrap_err();
        assert!(matches!(err, ConfigError::ParseError(_)));
    }

    #[test]
    fn test_load_validated_rejects_invalid_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        let mut config = with_token();
        config.api.request_timeout_secs = 0;
        config.save_to(&path).unwrap();

        let err = Config::load_validated_from(&path).unwrap_err();
        match err {
            ConfigError::Invalid(summary) => assert!(summary.contains("api.request_timeout_secs")),
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_load_validated_accepts_valid_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        with_token().save_to(&path).unwrap();

        let (config, validation) = Config::load_validated_from(&path).unwrap();
        assert!(validation.is_valid());
        assert_eq!(config.auth.access_token.as_deref(), Some("token"));
    }

    #[test]
    fn test_missing_optional_sections_use_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(
            &path,
            "config_dir = \"/tmp/skyboard\"\n\n[api]\nbase_url = \"http://localhost:9000/api\"\naudience = \"aud\"\n",
        )
        .unwrap();

        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.api.request_timeout_secs, 10);
        assert!(config.auth.token_url.is_empty());
        assert_eq!(config.ui.search_placeholder, "Search city...");
    }
}
