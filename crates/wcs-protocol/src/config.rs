//! HTTP client configuration.

use std::env;
use std::time::Duration;

use tracing::warn;

/// Settings applied to the HTTP client used for WCS requests.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Total time allowed for one request, including the body
    pub request_timeout: Duration,
    /// Time allowed to establish a connection
    pub connect_timeout: Duration,
    /// User-Agent header value
    pub user_agent: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            request_timeout: Duration::from_secs(60),
            connect_timeout: Duration::from_secs(10),
            user_agent: format!("wcs-client/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

impl ClientConfig {
    /// Load configuration from environment variables, falling back to defaults.
    ///
    /// - `WCS_REQUEST_TIMEOUT_SECS`
    /// - `WCS_CONNECT_TIMEOUT_SECS`
    /// - `WCS_USER_AGENT`
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            request_timeout: secs_from_env("WCS_REQUEST_TIMEOUT_SECS")
                .unwrap_or(defaults.request_timeout),
            connect_timeout: secs_from_env("WCS_CONNECT_TIMEOUT_SECS")
                .unwrap_or(defaults.connect_timeout),
            user_agent: env::var("WCS_USER_AGENT").unwrap_or(defaults.user_agent),
        }
    }
}

fn secs_from_env(key: &str) -> Option<Duration> {
    let value = env::var(key).ok()?;
    match value.trim().parse::<u64>() {
        Ok(secs) => Some(Duration::from_secs(secs)),
        Err(_) => {
            warn!(key, value = %value, "Ignoring non-numeric timeout");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ClientConfig::default();
        assert_eq!(config.request_timeout, Duration::from_secs(60));
        assert_eq!(config.connect_timeout, Duration::from_secs(10));
        assert!(config.user_agent.starts_with("wcs-client/"));
    }

    // Single test touching the environment to avoid cross-test races.
    #[test]
    fn test_from_env() {
        env::set_var("WCS_REQUEST_TIMEOUT_SECS", "5");
        env::set_var("WCS_CONNECT_TIMEOUT_SECS", "soon");
        env::set_var("WCS_USER_AGENT", "probe/1.0");

        let config = ClientConfig::from_env();
        assert_eq!(config.request_timeout, Duration::from_secs(5));
        assert_eq!(config.connect_timeout, Duration::from_secs(10));
        assert_eq!(config.user_agent, "probe/1.0");

        env::remove_var("WCS_REQUEST_TIMEOUT_SECS");
        env::remove_var("WCS_CONNECT_TIMEOUT_SECS");
        env::remove_var("WCS_USER_AGENT");
    }
}
