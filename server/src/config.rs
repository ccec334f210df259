//! Gateway configuration parsed from environment variables.

use std::time::Duration;

pub const DEFAULT_PORT: u16 = 3000;
pub const DEFAULT_IDENTITY_TIMEOUT_SECS: u64 = 10;
pub const DEFAULT_IDENTITY_CONNECT_TIMEOUT_SECS: u64 = 3;

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("missing required env var {0}")]
    MissingVar(&'static str),
    #[error("invalid value for {var}: {value:?}")]
    InvalidValue { var: &'static str, value: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IdentityTimeouts {
    pub request_secs: u64,
    pub connect_secs: u64,
}

impl IdentityTimeouts {
    #[must_use]
    pub fn request(self) -> Duration {
        Duration::from_secs(self.request_secs)
    }

    #[must_use]
    pub fn connect(self) -> Duration {
        Duration::from_secs(self.connect_secs)
    }
}

/// Where and how the gateway reaches the identity backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IdentityConfig {
    /// Base address without a trailing slash, e.g. `http://identity:8080`.
    pub base_url: String,
    pub timeouts: IdentityTimeouts,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GatewayConfig {
    pub port: u16,
    pub identity: IdentityConfig,
}

impl GatewayConfig {
    /// Build typed gateway config from environment variables.
    ///
    /// Required:
    /// - `IDENTITY_BACKEND_URL`: identity backend base address
    ///
    /// Optional:
    /// - `PORT`: listen port, default 3000
    /// - `IDENTITY_TIMEOUT_SECS`: default 10
    /// - `IDENTITY_CONNECT_TIMEOUT_SECS`: default 3
    ///
    /// # Errors
    ///
    /// Returns an error if the backend URL is missing or not http(s), if
    /// `PORT` is set but does not parse, or if a timeout is set to anything
    /// but a positive number of seconds.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`GatewayConfig::from_env`] but reads values through `lookup`.
    ///
    /// # Errors
    ///
    /// See [`GatewayConfig::from_env`].
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let port = match lookup("PORT") {
            Some(raw) => raw
                .trim()
                .parse::<u16>()
                .map_err(|_| ConfigError::InvalidValue { var: "PORT", value: raw.clone() })?,
            None => DEFAULT_PORT,
        };

        let raw_url = lookup("IDENTITY_BACKEND_URL").ok_or(ConfigError::MissingVar("IDENTITY_BACKEND_URL"))?;
        let base_url = parse_base_url(&raw_url)
            .ok_or_else(|| ConfigError::InvalidValue { var: "IDENTITY_BACKEND_URL", value: raw_url.clone() })?;

        let timeouts = IdentityTimeouts {
            request_secs: parse_secs(&lookup, "IDENTITY_TIMEOUT_SECS", DEFAULT_IDENTITY_TIMEOUT_SECS)?,
            connect_secs: parse_secs(&lookup, "IDENTITY_CONNECT_TIMEOUT_SECS", DEFAULT_IDENTITY_CONNECT_TIMEOUT_SECS)?,
        };

        Ok(Self { port, identity: IdentityConfig { base_url, timeouts } })
    }
}

fn parse_base_url(raw: &str) -> Option<String> {
    let trimmed = raw.trim().trim_end_matches('/');
    let host = trimmed
        .strip_prefix("http://")
        .or_else(|| trimmed.strip_prefix("https://"))?;
    if host.is_empty() {
        return None;
    }
    Some(trimmed.to_owned())
}

/// Unset means `default`; a set value must be a positive whole number of seconds.
fn parse_secs<F>(lookup: &F, key: &'static str, default: u64) -> Result<u64, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let Some(raw) = lookup(key) else {
        return Ok(default);
    };
    raw.trim()
        .parse::<u64>()
        .ok()
        .filter(|secs| *secs > 0)
        .ok_or(ConfigError::InvalidValue { var: key, value: raw })
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
