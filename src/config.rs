//! Client and browser configuration.

use std::env;
use std::time::Duration;

use crate::error::{BrowseError, Result};

/// Default service endpoint.
pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:8080/api";

/// Default per-request timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(20);

/// Connection settings for the remote service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Base URL; `/items` routes are appended to it
    pub base_url: String,
    /// Optional HTTP proxy (e.g., "http://proxy:8080")
    pub proxy: Option<String>,
    /// Per-request timeout
    pub timeout: Duration,
}

impl ClientConfig {
    /// Create a config for the given base URL with default settings.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            proxy: None,
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Build a config from `BROWSE_API_URL`, `BROWSE_PROXY` and `BROWSE_TIMEOUT_SECS`.
    ///
    /// Unset variables fall back to the defaults.
    pub fn from_env() -> Result<Self> {
        let mut config = match env::var("BROWSE_API_URL") {
            Ok(url) if !url.trim().is_empty() => Self::new(url.trim()),
            _ => Self::default(),
        };

        if let Ok(proxy) = env::var("BROWSE_PROXY") {
            if !proxy.trim().is_empty() {
                config.proxy = Some(proxy.trim().to_string());
            }
        }

        if let Ok(secs) = env::var("BROWSE_TIMEOUT_SECS") {
            let secs: u64 = secs.trim().parse().map_err(|_| {
                BrowseError::InvalidConfig(format!("BROWSE_TIMEOUT_SECS is not a number: {}", secs))
            })?;
            config.timeout = Duration::from_secs(secs);
        }

        Ok(config)
    }

    /// Route requests through a proxy.
    pub fn with_proxy(mut self, proxy: impl Into<String>) -> Self {
        self.proxy = Some(proxy.into());
        self
    }

    /// Override the request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Join a route onto the base URL.
    pub(crate) fn url(&self, route: &str) -> String {
        format!("{}/{}", self.base_url, route.trim_start_matches('/'))
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}

/// How listing responses that arrive out of order are reconciled.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ResponsePolicy {
    /// Only the most recently issued listing may update the view.
    #[default]
    LatestRequest,
    /// Whichever response arrives last updates the view.
    LastResponse,
}

/// Settings for the navigation state machine.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BrowserConfig {
    pub response_policy: ResponsePolicy,
}

impl BrowserConfig {
    pub fn with_response_policy(mut self, policy: ResponsePolicy) -> Self {
        self.response_policy = policy;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_url_trimmed() {
        let config = ClientConfig::new("http://localhost:3000/api/");
        assert_eq!(config.base_url, "http://localhost:3000/api");
        assert_eq!(config.url("/items"), "http://localhost:3000/api/items");
        assert_eq!(config.url("items/a1/path"), "http://localhost:3000/api/items/a1/path");
    }

    #[test]
    fn test_builders() {
        let config = ClientConfig::default()
            .with_proxy("http://127.0.0.1:9000")
            .with_timeout(Duration::from_secs(3));
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.proxy.as_deref(), Some("http://127.0.0.1:9000"));
        assert_eq!(config.timeout, Duration::from_secs(3));
    }

    #[test]
    fn test_default_policy() {
        let config = BrowserConfig::default();
        assert_eq!(config.response_policy, ResponsePolicy::LatestRequest);
        let config = config.with_response_policy(ResponsePolicy::LastResponse);
        assert_eq!(config.response_policy, ResponsePolicy::LastResponse);
    }
}
