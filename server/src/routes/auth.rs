//! Auth routes: validate, forward to the identity backend, relay.
//!
//! ERROR HANDLING
//! ==============
//! The gateway produces only two responses of its own: `400` for a body that
//! fails the shape check and `502` when the backend cannot be reached. Both
//! carry `{ "error": string }`. Any status the backend returns, success or
//! not, is relayed as-is; nothing here fabricates a success.

use axum::Json;
use axum::body::{Body, Bytes};
use axum::extract::State;
use axum::http::header::CONTENT_TYPE;
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use serde_json::Value;
use wire::{AuthRoute, ErrorBody};

use crate::services::identity::{BackendResponse, IdentityError};
use crate::state::AppState;

// =============================================================================
// ERRORS
// =============================================================================

#[derive(Debug, thiserror::Error)]
pub enum GatewayError {
    #[error("{0}")]
    Validation(String),
    #[error("{0}")]
    BackendUnreachable(String),
}

impl GatewayError {
    #[must_use]
    pub fn status(&self) -> StatusCode {
        match self {
            Self::Validation(_) => StatusCode::BAD_REQUEST,
            Self::BackendUnreachable(_) => StatusCode::BAD_GATEWAY,
        }
    }
}

impl From<IdentityError> for GatewayError {
    fn from(err: IdentityError) -> Self {
        Self::BackendUnreachable(err.to_string())
    }
}

impl IntoResponse for GatewayError {
    fn into_response(self) -> Response {
        (self.status(), Json(ErrorBody::new(self.to_string()))).into_response()
    }
}

// =============================================================================
// HANDLERS
// =============================================================================

/// `POST /auth/signup`: requires `email`; every other field is passed through.
pub async fn signup(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Response, GatewayError> {
    forward(&state, AuthRoute::Signup, &headers, body).await
}

/// `POST /auth/login`: requires `email` and `password`.
pub async fn login(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Response, GatewayError> {
    forward(&state, AuthRoute::Login, &headers, body).await
}

/// `POST /auth/forgot-password`: requires `email`.
pub async fn forgot_password(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Response, GatewayError> {
    forward(&state, AuthRoute::ForgotPassword, &headers, body).await
}

/// The raw bytes are what reach the backend; the parsed `Value` is only used
/// for the shape check, so opaque fields keep their exact encoding.
async fn forward(
    state: &AppState,
    route: AuthRoute,
    headers: &HeaderMap,
    body: Bytes,
) -> Result<Response, GatewayError> {
    let parsed = parse_json_body(headers, &body).inspect_err(|err| {
        tracing::debug!(%route, error = %err, "rejected unparsable body");
    })?;

    if let Err(err) = wire::validate_body(route, &parsed) {
        tracing::debug!(%route, error = %err, "rejected invalid body");
        return Err(GatewayError::Validation(err.to_string()));
    }

    let backend = state.identity.forward(route, &body).await?;
    tracing::info!(%route, status = backend.status.as_u16(), "relayed identity response");
    Ok(relay(backend))
}

fn parse_json_body(headers: &HeaderMap, body: &Bytes) -> Result<Value, GatewayError> {
    if !has_json_content_type(headers) {
        return Err(GatewayError::Validation(
            "expected request with `Content-Type: application/json`".into(),
        ));
    }
    serde_json::from_slice(body)
        .map_err(|err| GatewayError::Validation(format!("failed to parse the request body as JSON: {err}")))
}

/// `application/json`, parameters allowed, or any `+json` media type.
fn has_json_content_type(headers: &HeaderMap) -> bool {
    headers
        .get(CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.split(';').next())
        .map(str::trim)
        .is_some_and(|mime| mime.eq_ignore_ascii_case("application/json") || mime.ends_with("+json"))
}

/// Rebuild the backend response with its own status, content type and bytes.
fn relay(backend: BackendResponse) -> Response {
    let mut response = Response::new(Body::from(backend.body));
    *response.status_mut() = backend.status;
    if let Some(content_type) = backend.content_type {
        response.headers_mut().insert(CONTENT_TYPE, content_type);
    }
    response
}

#[cfg(test)]
#[path = "auth_test.rs"]
mod tests;
