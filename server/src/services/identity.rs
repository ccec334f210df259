//! Identity backend client.
//!
//! DESIGN
//! ======
//! The gateway owns no auth logic. Every validated request is forwarded as-is
//! to the identity backend at `{base_url}{route.path()}`, and whatever comes
//! back (status, content type, body bytes) is handed to the route layer
//! untouched. Only transport failures become errors here; a backend `4xx`/`5xx`
//! is a successful relay.
//!
//! The `IdentityBackend` trait is the seam handlers depend on so tests can
//! substitute a recording mock.

use axum::body::Bytes;
use axum::http::{HeaderValue, StatusCode};
use wire::AuthRoute;

use crate::config::IdentityConfig;

#[derive(Debug, thiserror::Error)]
pub enum IdentityError {
    /// Connect failure, timeout, or broken transfer.
    #[error("identity backend unreachable: {0}")]
    Unreachable(String),

    #[error("HTTP client build failed: {0}")]
    HttpClientBuild(String),
}

/// Backend answer, kept byte-for-byte.
#[derive(Debug, Clone)]
pub struct BackendResponse {
    pub status: StatusCode,
    pub content_type: Option<HeaderValue>,
    pub body: Bytes,
}

#[async_trait::async_trait]
pub trait IdentityBackend: Send + Sync {
    /// Forward the caller's body bytes for `route` unchanged. Exactly one
    /// outbound call per invocation.
    async fn forward(&self, route: AuthRoute, body: &Bytes) -> Result<BackendResponse, IdentityError>;
}

// =============================================================================
// CLIENT
// =============================================================================

pub struct IdentityClient {
    http: reqwest::Client,
    base_url: String,
}

impl IdentityClient {
    /// # Errors
    ///
    /// Returns an error if the underlying HTTP client cannot be constructed.
    pub fn new(config: &IdentityConfig) -> Result<Self, IdentityError> {
        let http = reqwest::Client::builder()
            .timeout(config.timeouts.request())
            .connect_timeout(config.timeouts.connect())
            .build()
            .map_err(|e| IdentityError::HttpClientBuild(e.to_string()))?;
        Ok(Self { http, base_url: config.base_url.clone() })
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url_for(&self, route: AuthRoute) -> String {
        format!("{}{}", self.base_url, route.path())
    }
}

#[async_trait::async_trait]
impl IdentityBackend for IdentityClient {
    async fn forward(&self, route: AuthRoute, body: &Bytes) -> Result<BackendResponse, IdentityError> {
        let url = self.url_for(route);

        let response = self
            .http
            .post(&url)
            .header(reqwest::header::CONTENT_TYPE, "application/json")
            .body(body.clone())
            .send()
            .await
            .map_err(|e| unreachable_error(route, &url, &e))?;

        let status = response.status();
        let content_type = response.headers().get(reqwest::header::CONTENT_TYPE).cloned();
        let body = response
            .bytes()
            .await
            .map_err(|e| unreachable_error(route, &url, &e))?;

        tracing::debug!(%route, status = status.as_u16(), bytes = body.len(), "identity backend responded");
        Ok(BackendResponse { status, content_type, body })
    }
}

fn unreachable_error(route: AuthRoute, url: &str, err: &reqwest::Error) -> IdentityError {
    tracing::warn!(%route, %url, timeout = err.is_timeout(), error = %err, "identity backend call failed");
    if err.is_timeout() {
        IdentityError::Unreachable(format!("timed out calling {url}"))
    } else {
        IdentityError::Unreachable(err.to_string())
    }
}

#[cfg(test)]
#[path = "identity_test.rs"]
mod tests;
