//! Client configuration.
//!
//! Values come from the environment and can be overridden from the command
//! line:
//!
//! | Variable | Default | Meaning |
//! |----------|---------|---------|
//! | `LEXA_URL` | `http://localhost:8000` | Service base URL |
//! | `LEXA_TIMEOUT_SECS` | `10` | Connect timeout |
//! | `LEXA_LOG` | `warn` | tracing filter directives |

use std::time::Duration;

use crate::api::DEFAULT_BASE_URL;

pub const URL_ENV: &str = "LEXA_URL";
pub const TIMEOUT_ENV: &str = "LEXA_TIMEOUT_SECS";
pub const LOG_ENV: &str = "LEXA_LOG";

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);
pub const DEFAULT_LOG_FILTER: &str = "warn";

/// Connection and logging settings for the client.
///
/// # Example
///
/// ```
/// use lexa::config::ClientConfig;
///
/// let config = ClientConfig::default().with_base_url("http://127.0.0.1:9000/");
/// assert_eq!(config.base_url, "http://127.0.0.1:9000");
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct ClientConfig {
    /// Service base URL without trailing slash
    pub base_url: String,
    /// Timeout for establishing a connection. Streams have no total timeout.
    pub request_timeout: Duration,
    /// tracing filter directives
    pub log_filter: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            request_timeout: DEFAULT_TIMEOUT,
            log_filter: DEFAULT_LOG_FILTER.to_string(),
        }
    }
}

impl ClientConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Defaults overridden by `LEXA_*` environment variables.
    ///
    /// Blank values and unparsable timeouts are ignored.
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Some(url) = env_value(URL_ENV) {
            config = config.with_base_url(url);
        }

        if let Some(secs) = env_value(TIMEOUT_ENV) {
            match secs.parse::<u64>() {
                Ok(secs) if secs > 0 => config.request_timeout = Duration::from_secs(secs),
                _ => tracing::warn!("Ignoring invalid {}={:?}", TIMEOUT_ENV, secs),
            }
        }

        if let Some(filter) = env_value(LOG_ENV) {
            config.log_filter = filter;
        }

        config
    }

    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into().trim().trim_end_matches('/').to_string();
        self
    }

    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    pub fn with_log_filter(mut self, filter: impl Into<String>) -> Self {
        self.log_filter = filter.into();
        self
    }
}

fn env_value(name: &str) -> Option<String> {
    std::env::var(name)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
