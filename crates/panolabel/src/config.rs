//! Configuration for the panolabel client

use http::HeaderMap;
use std::time::Duration;

/// Configuration for the panolabel client.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Base URL of the API, including the version prefix (e.g. `http://host:8000/api/v1`)
    pub base_url: Option<String>,

    /// Timeout for requests
    pub timeout: Duration,

    /// Custom headers to include with every request
    pub default_headers: HeaderMap,

    /// `User-Agent` override
    pub user_agent: Option<String>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: None,
            timeout: crate::http::DEFAULT_TIMEOUT,
            default_headers: HeaderMap::new(),
            user_agent: None,
        }
    }
}

impl ClientConfig {
    /// Create a new configuration pointing at a base URL.
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            base_url: Some(base_url.into()),
            ..Default::default()
        }
    }

    /// Load configuration from environment variables.
    ///
    /// A `.env` file in the working directory is loaded first if present. Then:
    /// - `PANOLABEL_BASE_URL` for the API base URL
    /// - `PANOLABEL_TIMEOUT` for request timeout (in seconds)
    /// - `PANOLABEL_USER_AGENT` for the `User-Agent` header
    ///
    /// Unparsable values are ignored and the default is kept.
    #[cfg(feature = "env")]
    pub fn from_env() -> Result<Self, crate::error::Error> {
        use std::env;

        let _ = dotenvy::dotenv();

        let mut config = Self::default();

        if let Ok(base_url) = env::var("PANOLABEL_BASE_URL") {
            config.base_url = Some(base_url);
        }

        if let Ok(timeout_str) = env::var("PANOLABEL_TIMEOUT")
            && let Ok(timeout_secs) = timeout_str.parse::<u64>()
        {
            config.timeout = Duration::from_secs(timeout_secs);
        } else if env::var("PANOLABEL_TIMEOUT").is_ok() {
            tracing::warn!("Ignoring unparsable PANOLABEL_TIMEOUT");
        }

        if let Ok(user_agent) = env::var("PANOLABEL_USER_AGENT") {
            config.user_agent = Some(user_agent);
        }

        Ok(config)
    }

    /// Merge this configuration with another, with the other taking precedence.
    pub fn merge(mut self, other: ClientConfig) -> Self {
        if other.base_url.is_some() {
            self.base_url = other.base_url;
        }
        if other.timeout != crate::http::DEFAULT_TIMEOUT {
            self.timeout = other.timeout;
        }
        for (key, value) in other.default_headers.iter() {
            self.default_headers.insert(key.clone(), value.clone());
        }
        if other.user_agent.is_some() {
            self.user_agent = other.user_agent;
        }

        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ClientConfig::default();
        assert!(config.base_url.is_none());
        assert_eq!(config.timeout, Duration::from_secs(60));
        assert!(config.default_headers.is_empty());
    }

    #[test]
    fn test_config_merge_precedence() {
        let mut headers = HeaderMap::new();
        headers.insert("x-team", "vision".parse().unwrap());
        let base = ClientConfig {
            base_url: Some("http://one:8000/api/v1".to_string()),
            timeout: Duration::from_secs(10),
            default_headers: headers,
            user_agent: Some("first".to_string()),
        };

        let mut other_headers = HeaderMap::new();
        other_headers.insert("x-site", "lab".parse().unwrap());
        let other = ClientConfig {
            base_url: Some("http://two:8000/api/v1".to_string()),
            default_headers: other_headers,
            ..Default::default()
        };

        let merged = base.merge(other);

        assert_eq!(merged.base_url.as_deref(), Some("http://two:8000/api/v1"));
        // default timeout in `other` does not override
        assert_eq!(merged.timeout, Duration::from_secs(10));
        assert!(merged.default_headers.contains_key("x-team"));
        assert!(merged.default_headers.contains_key("x-site"));
        assert_eq!(merged.user_agent.as_deref(), Some("first"));
    }

    #[cfg(feature = "env")]
    #[test]
    fn test_config_from_env_variables() {
        temp_env::with_vars(
            [
                ("PANOLABEL_BASE_URL", Some("http://env-host:9000/api/v1")),
                ("PANOLABEL_TIMEOUT", Some("15")),
                ("PANOLABEL_USER_AGENT", Some("labeler/2")),
            ],
            || {
                let config = ClientConfig::from_env().expect("config from env");
                assert_eq!(
                    config.base_url.as_deref(),
                    Some("http://env-host:9000/api/v1")
                );
                assert_eq!(config.timeout, Duration::from_secs(15));
                assert_eq!(config.user_agent.as_deref(), Some("labeler/2"));
            },
        );
    }

    #[cfg(feature = "env")]
    #[test]
    fn test_config_from_env_ignores_bad_timeout() {
        temp_env::with_vars(
            [
                ("PANOLABEL_BASE_URL", None),
                ("PANOLABEL_TIMEOUT", Some("soon")),
                ("PANOLABEL_USER_AGENT", None),
            ],
            || {
                let config = ClientConfig::from_env().expect("config from env");
                assert_eq!(config.timeout, crate::http::DEFAULT_TIMEOUT);
            },
        );
    }
}
