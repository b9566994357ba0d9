//! Bridge configuration resolved from the process environment
//!
//! Every default lives here as a named constant. Configuration is resolved
//! once at startup and never re-read mid-request.

use std::time::Duration;

use crate::error::{Error, Result};

/// Default base URL of the subscriber API.
pub const DEFAULT_BASE_URL: &str = "https://api.subrelay.app/v1";

/// Default transport timeout in milliseconds.
pub const DEFAULT_TIMEOUT_MS: u64 = 10_000;

/// Default collection path watched for subscriber documents.
pub const DEFAULT_SUBSCRIBER_COLLECTION: &str = "subscribers";

/// Environment variable names understood by the bridge.
pub mod env {
    /// Bearer token for the subscriber API. Required.
    pub const PROJECT_TOKEN: &str = "SUBRELAY_PROJECT_TOKEN";
    /// JSON mapping configuration. Required.
    pub const MAPPING_CONFIG: &str = "SUBRELAY_MAPPING_CONFIG";
    /// Subscriber API base URL.
    pub const BASE_URL: &str = "SUBRELAY_BASE_URL";
    /// Transport timeout in milliseconds.
    pub const TIMEOUT_MS: &str = "SUBRELAY_TIMEOUT_MS";
    /// Collection path the deployment watches.
    pub const SUBSCRIBER_COLLECTION: &str = "SUBRELAY_SUBSCRIBER_COLLECTION";
}

/// Resolved bridge configuration
#[derive(Debug, Clone)]
pub struct BridgeConfig {
    /// Bearer token authenticating against the subscriber API
    pub api_token: String,
    /// JSON mapping configuration, parsed per invocation by the pipeline
    pub mapping_json: String,
    /// Base URL of the subscriber API, without a trailing slash
    pub base_url: String,
    /// Timeout applied to transport calls
    pub timeout: Duration,
    /// Collection path the deployment watches
    pub subscriber_collection: String,
}

impl BridgeConfig {
    /// Create a configuration with explicit token and mapping, defaults
    /// everywhere else.
    pub fn new(api_token: impl Into<String>, mapping_json: impl Into<String>) -> Self {
        Self {
            api_token: api_token.into(),
            mapping_json: mapping_json.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: Duration::from_millis(DEFAULT_TIMEOUT_MS),
            subscriber_collection: DEFAULT_SUBSCRIBER_COLLECTION.to_string(),
        }
    }

    /// Load configuration from the process environment.
    pub fn from_env() -> Result<Self> {
        let api_token = require_var(env::PROJECT_TOKEN)?;
        let mapping_json = require_var(env::MAPPING_CONFIG)?;

        let base_url =
            std::env::var(env::BASE_URL).unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());

        let timeout_ms = match std::env::var(env::TIMEOUT_MS) {
            Ok(raw) => raw.parse::<u64>().map_err(|e| Error::Configuration {
                message: format!(
                    "{} must be an integer millisecond count, got '{raw}'",
                    env::TIMEOUT_MS
                ),
                source: Some(anyhow::Error::new(e)),
            })?,
            Err(_) => DEFAULT_TIMEOUT_MS,
        };

        let subscriber_collection = std::env::var(env::SUBSCRIBER_COLLECTION)
            .unwrap_or_else(|_| DEFAULT_SUBSCRIBER_COLLECTION.to_string());

        Ok(Self {
            api_token,
            mapping_json,
            base_url: normalize_base_url(base_url),
            timeout: Duration::from_millis(timeout_ms),
            subscriber_collection,
        })
    }

    /// Override the base URL, normalizing a trailing slash away.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = normalize_base_url(base_url.into());
        self
    }

    /// Override the transport timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Override the watched collection path.
    pub fn with_subscriber_collection(mut self, collection: impl Into<String>) -> Self {
        self.subscriber_collection = collection.into();
        self
    }
}

fn normalize_base_url(base_url: String) -> String {
    base_url.trim_end_matches('/').to_string()
}

fn require_var(name: &str) -> Result<String> {
    match std::env::var(name) {
        Ok(value) if !value.is_empty() => Ok(value),
        _ => Err(Error::Configuration {
            message: format!("missing required environment variable: {name}"),
            source: None,
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = BridgeConfig::new("token", "{}");
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.timeout, Duration::from_millis(10_000));
        assert_eq!(config.subscriber_collection, "subscribers");
    }

    #[test]
    fn test_with_base_url_strips_trailing_slash() {
        let config = BridgeConfig::new("token", "{}").with_base_url("https://api.example.com/v1/");
        assert_eq!(config.base_url, "https://api.example.com/v1");
    }

    #[test]
    fn test_with_timeout() {
        let config = BridgeConfig::new("token", "{}").with_timeout(Duration::from_secs(3));
        assert_eq!(config.timeout, Duration::from_secs(3));
    }

    #[test]
    fn test_missing_required_variable_is_named() {
        // Use a variable name no other test touches; environment mutation in
        // parallel tests is not safe to assert through std::env::set_var.
        let err = require_var("SUBRELAY_TEST_UNSET_VARIABLE").unwrap_err();
        assert!(err
            .to_string()
            .contains("missing required environment variable: SUBRELAY_TEST_UNSET_VARIABLE"));
    }
}
