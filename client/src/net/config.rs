//! Adapter configuration: the gateway base address and timeouts.
//!
//! The base address is the adapter's only configuration point. It always comes
//! from the caller or the environment; the default exists for local development.

use std::time::Duration;

pub const DEFAULT_GATEWAY_URL: &str = "http://127.0.0.1:3000";
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 10;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdapterConfig {
    pub base_url: String,
    pub request_timeout: Duration,
    pub connect_timeout: Duration,
}

impl AdapterConfig {
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim().trim_end_matches('/').to_owned(),
            request_timeout: Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS),
            connect_timeout: Duration::from_secs(DEFAULT_CONNECT_TIMEOUT_SECS),
        }
    }

    #[must_use]
    pub fn with_timeouts(mut self, request: Duration, connect: Duration) -> Self {
        self.request_timeout = request;
        self.connect_timeout = connect;
        self
    }

    /// Read config from the environment.
    ///
    /// - `AUTH_GATEWAY_URL`: default `http://127.0.0.1:3000`
    /// - `AUTH_GATEWAY_TIMEOUT_SECS`: default 30
    /// - `AUTH_GATEWAY_CONNECT_TIMEOUT_SECS`: default 10
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    #[must_use]
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let base_url = lookup("AUTH_GATEWAY_URL")
            .filter(|v| !v.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_GATEWAY_URL.to_owned());
        let request = env_secs(&lookup, "AUTH_GATEWAY_TIMEOUT_SECS", DEFAULT_REQUEST_TIMEOUT_SECS);
        let connect = env_secs(&lookup, "AUTH_GATEWAY_CONNECT_TIMEOUT_SECS", DEFAULT_CONNECT_TIMEOUT_SECS);
        Self::new(base_url).with_timeouts(Duration::from_secs(request), Duration::from_secs(connect))
    }
}

impl Default for AdapterConfig {
    fn default() -> Self {
        Self::new(DEFAULT_GATEWAY_URL)
    }
}

fn env_secs<F>(lookup: &F, key: &str, default: u64) -> u64
where
    F: Fn(&str) -> Option<String>,
{
    lookup(key)
        .and_then(|v| v.trim().parse::<u64>().ok())
        .filter(|secs| *secs > 0)
        .unwrap_or(default)
}
