//! Configuration types for movie-discovery
//!
//! Configuration is an explicit value handed to [`crate::MovieClient`] at
//! construction time. Nothing in this library reads process-wide state;
//! loading the token from an environment or a config file is the embedding
//! application's job.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use url::Url;

/// Default base URL of the TMDB v3 API
pub const DEFAULT_BASE_URL: &str = "https://api.themoviedb.org/3";

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_timeout() -> Duration {
    Duration::from_secs(30)
}

/// Client configuration
///
/// `api_token` is the only required field; everything else has a working
/// default.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Config {
    /// Base URL of the metadata API (default: TMDB v3)
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Bearer token sent in the `Authorization` header of every request
    pub api_token: String,

    /// Per-request timeout (default: 30s)
    #[serde(default = "default_timeout")]
    pub timeout: Duration,
}

impl Config {
    /// Configuration with default base URL and timeout
    pub fn new(api_token: impl Into<String>) -> Self {
        Self {
            base_url: default_base_url(),
            api_token: api_token.into(),
            timeout: default_timeout(),
        }
    }

    /// Validates the configuration, returning the first problem found
    pub fn validate(&self) -> Result<()> {
        if self.api_token.trim().is_empty() {
            return Err(Error::Config {
                message: "api_token must not be empty".to_string(),
            });
        }
        Url::parse(&self.base_url).map_err(|e| Error::Config {
            message: format!("invalid base_url \"{}\": {e}", self.base_url),
        })?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_applies_defaults() {
        let config = Config::new("token");
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.timeout, Duration::from_secs(30));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn empty_token_is_rejected() {
        let config = Config::new("  ");
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("api_token"));
    }

    #[test]
    fn malformed_base_url_is_rejected() {
        let mut config = Config::new("token");
        config.base_url = "not a url".to_string();
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("base_url"));
    }

    #[test]
    fn deserializes_with_defaults() {
        let config: Config = serde_json::from_str(r#"{"api_token":"t"}"#).unwrap();
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.api_token, "t");
        assert_eq!(config.timeout, Duration::from_secs(30));
    }
}
