//! Client auth adapter: signup, login and forgot-password against the gateway.
//!
//! ERROR HANDLING
//! ==============
//! Callers branch on [`AuthError`] rather than a generic failure: a non-2xx
//! answer becomes `RequestFailure` carrying the status and parsed body, and a
//! connect/timeout problem becomes `NetworkFailure`. The adapter never
//! retries, caches or rewrites what it sends or receives.

use serde::Serialize;
use serde_json::Value;
use wire::{AuthRoute, Credentials, FieldError, ForgotPasswordRequest, SignupRequest};

use super::config::AdapterConfig;

#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    /// Rejected locally before any network call.
    #[error("invalid input: {0}")]
    InvalidInput(#[from] FieldError),

    /// The gateway answered with a non-2xx status.
    #[error("request failed with status {status}")]
    RequestFailure { status: u16, body: Value },

    /// The gateway could not be reached or did not answer in time.
    #[error("network failure: {0}")]
    NetworkFailure(String),

    #[error("HTTP client build failed: {0}")]
    HttpClientBuild(String),
}

impl AuthError {
    /// Status code of a `RequestFailure`, if that is what this is.
    #[must_use]
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::RequestFailure { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Whether a caller-side retry policy may try again. The adapter itself never does.
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            Self::NetworkFailure(_) | Self::RequestFailure { status: 429 | 502 | 503 | 504, .. }
        )
    }
}

pub struct AuthAdapter {
    http: reqwest::Client,
    base_url: String,
}

impl AuthAdapter {
    /// # Errors
    ///
    /// Returns an error if the underlying HTTP client cannot be constructed.
    pub fn new(config: &AdapterConfig) -> Result<Self, AuthError> {
        let http = reqwest::Client::builder()
            .timeout(config.request_timeout)
            .connect_timeout(config.connect_timeout)
            .build()
            .map_err(|e| AuthError::HttpClientBuild(e.to_string()))?;
        Ok(Self { http, base_url: config.base_url.clone() })
    }

    /// Build from `AUTH_GATEWAY_*` environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying HTTP client cannot be constructed.
    pub fn from_env() -> Result<Self, AuthError> {
        Self::new(&AdapterConfig::from_env())
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// `POST /auth/signup`.
    ///
    /// # Errors
    ///
    /// `InvalidInput` for a malformed email or empty password, otherwise see [`AuthError`].
    pub async fn signup(&self, request: &SignupRequest) -> Result<Value, AuthError> {
        request.validate()?;
        self.post(AuthRoute::Signup, request).await
    }

    /// `POST /auth/login`.
    ///
    /// # Errors
    ///
    /// `InvalidInput` for a malformed email or empty password, otherwise see [`AuthError`].
    pub async fn login(&self, credentials: &Credentials) -> Result<Value, AuthError> {
        credentials.validate()?;
        self.post(AuthRoute::Login, credentials).await
    }

    /// `POST /auth/forgot-password` with `{ "email": email }`.
    ///
    /// # Errors
    ///
    /// `InvalidInput` for an empty email, otherwise see [`AuthError`].
    pub async fn forgot_password(&self, email: &str) -> Result<Value, AuthError> {
        if email.trim().is_empty() {
            return Err(FieldError::Empty("email").into());
        }
        self.post(AuthRoute::ForgotPassword, &ForgotPasswordRequest::new(email))
            .await
    }

    fn endpoint(&self, route: AuthRoute) -> String {
        format!("{}{}", self.base_url, route.path())
    }

    async fn post<B>(&self, route: AuthRoute, body: &B) -> Result<Value, AuthError>
    where
        B: Serialize + ?Sized + Sync,
    {
        let url = self.endpoint(route);
        let response = self
            .http
            .post(&url)
            .json(body)
            .send()
            .await
            .map_err(|e| network_failure(route, &e))?;

        let status = response.status();
        let bytes = response
            .bytes()
            .await
            .map_err(|e| network_failure(route, &e))?;
        let body = parse_body(&bytes);

        if !status.is_success() {
            tracing::debug!(%route, status = status.as_u16(), "auth request failed");
            return Err(AuthError::RequestFailure { status: status.as_u16(), body });
        }
        tracing::debug!(%route, status = status.as_u16(), "auth request succeeded");
        Ok(body)
    }
}

/// Empty body → `Null`; JSON → parsed; anything else → the text as a JSON string.
fn parse_body(bytes: &[u8]) -> Value {
    if bytes.iter().all(u8::is_ascii_whitespace) {
        return Value::Null;
    }
    serde_json::from_slice(bytes).unwrap_or_else(|_| Value::String(String::from_utf8_lossy(bytes).into_owned()))
}

fn network_failure(route: AuthRoute, err: &reqwest::Error) -> AuthError {
    tracing::debug!(%route, timeout = err.is_timeout(), error = %err, "auth request did not complete");
    AuthError::NetworkFailure(err.to_string())
}

#[cfg(test)]
#[path = "auth_test.rs"]
mod tests;
