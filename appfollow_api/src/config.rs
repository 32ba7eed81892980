//! Transport configuration for [`Client`](crate::Client).

use std::time::Duration;

use crate::Error;

/// Production API root.
pub const API_URL: &str = "https://api.appfollow.io";

/// Settings for the HTTP session a client owns.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Base URL for the API. Defaults to [`API_URL`].
    pub base_url: String,
    /// Per-request timeout. `None` waits for as long as the server does.
    pub timeout: Option<Duration>,
    pub user_agent: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: API_URL.to_string(),
            timeout: None,
            user_agent: concat!("appfollow-api-rust/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}

impl ClientConfig {
    /// Reads `APPFOLLOW_BASE_URL` and `APPFOLLOW_TIMEOUT_SECS`, falling back
    /// to defaults for unset or unparseable values.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            base_url: std::env::var("APPFOLLOW_BASE_URL")
                .ok()
                .filter(|val| !val.is_empty())
                .unwrap_or(defaults.base_url),
            timeout: env_u64("APPFOLLOW_TIMEOUT_SECS").map(Duration::from_secs),
            user_agent: defaults.user_agent,
        }
    }

    pub fn with_base_url(mut self, base_url: &str) -> Self {
        self.base_url = base_url.to_string();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn build_http_client(&self) -> Result<reqwest::Client, Error> {
        let mut builder = reqwest::Client::builder().user_agent(self.user_agent.as_str());
        if let Some(timeout) = self.timeout {
            builder = builder.timeout(timeout);
        }
        builder.build().map_err(|e| {
            tracing::error!("Failed to build HTTP client: {}", e);
            Error::Network(e)
        })
    }
}

fn env_u64(key: &str) -> Option<u64> {
    std::env::var(key)
        .ok()
        .and_then(|val| val.trim().parse::<u64>().ok())
}
