//! Store client configuration.

use url::Url;

/// Environment variable naming the store base URL.
pub const ENV_STORE_URL: &str = "PORTA_STORE_URL";
/// Environment variable naming the public api key.
pub const ENV_STORE_KEY: &str = "PORTA_STORE_ANON_KEY";

/// Errors from assembling a [`StoreConfig`].
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// A required environment variable is unset or empty.
    #[error("missing {name} in the environment")]
    MissingEnv {
        /// The variable that was expected.
        name: &'static str,
    },

    /// The base URL did not parse or uses an unsupported scheme.
    #[error("invalid store base URL {url:?}: {reason}")]
    InvalidBaseUrl {
        /// The rejected value.
        url: String,
        /// Why it was rejected.
        reason: String,
    },

    /// The api key contains characters that cannot appear in a header.
    #[error("invalid api key: {reason}")]
    InvalidApiKey {
        /// Why the key was rejected.
        reason: String,
    },
}

/// Configuration shared by every client in this crate.
#[derive(Debug, Clone)]
pub struct StoreConfig {
    /// Base URL of the hosted store (e.g. `https://store.example.com`),
    /// stored without a trailing slash.
    pub base_url: String,
    /// Public api key attached to every request alongside the session
    /// bearer token.
    pub api_key: String,
    /// Request timeout in seconds (default: 30).
    pub timeout_secs: u64,
}

impl StoreConfig {
    /// Create a new configuration with the default timeout, validating
    /// the base URL.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidBaseUrl`] if the URL does not parse
    /// or is not http(s).
    pub fn new(
        base_url: impl Into<String>,
        api_key: impl Into<String>,
    ) -> Result<Self, ConfigError> {
        let raw = base_url.into();
        let parsed = Url::parse(&raw).map_err(|e| ConfigError::InvalidBaseUrl {
            url: raw.clone(),
            reason: e.to_string(),
        })?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(ConfigError::InvalidBaseUrl {
                url: raw,
                reason: format!("unsupported scheme {:?}", parsed.scheme()),
            });
        }
        Ok(Self {
            base_url: raw.trim_end_matches('/').to_string(),
            api_key: api_key.into(),
            timeout_secs: 30,
        })
    }

    /// Read the configuration from `PORTA_STORE_URL` and
    /// `PORTA_STORE_ANON_KEY`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingEnv`] when either variable is unset
    /// or empty, or [`ConfigError::InvalidBaseUrl`] when the URL is
    /// malformed.
    pub fn from_env() -> Result<Self, ConfigError> {
        let url = require_env(ENV_STORE_URL)?;
        let key = require_env(ENV_STORE_KEY)?;
        Self::new(url, key)
    }
}

fn require_env(name: &'static str) -> Result<String, ConfigError> {
    match std::env::var(name) {
        Ok(value) if !value.trim().is_empty() => Ok(value),
        _ => Err(ConfigError::MissingEnv { name }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_defaults_timeout() {
        let config = StoreConfig::new("https://store.example.com", "anon-key").unwrap();
        assert_eq!(config.base_url, "https://store.example.com");
        assert_eq!(config.api_key, "anon-key");
        assert_eq!(config.timeout_secs, 30);
    }

    #[test]
    fn base_url_trailing_slash_trimmed() {
        let config = StoreConfig::new("https://store.example.com/", "key").unwrap();
        assert_eq!(config.base_url, "https://store.example.com");
    }

    #[test]
    fn rejects_malformed_url() {
        assert!(StoreConfig::new("not a url", "key").is_err());
        assert!(StoreConfig::new("ftp://store.example.com", "key").is_err());
    }

    #[test]
    fn from_env_reports_missing_variable() {
        // Neither variable is set in the test environment.
        std::env::remove_var(ENV_STORE_URL);
        std::env::remove_var(ENV_STORE_KEY);
        let err = StoreConfig::from_env().unwrap_err();
        assert!(matches!(err, ConfigError::MissingEnv { .. }));
        assert!(err.to_string().contains(ENV_STORE_URL));
    }
}
