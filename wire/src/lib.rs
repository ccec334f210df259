//! Shared auth request model for the gateway and its clients.
//!
//! This crate owns the route table and the JSON request shapes used by both
//! `server` and `client`. Payloads beyond the required fields stay opaque
//! (`serde_json::Value`) so the gateway can relay them without reshaping.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

// =============================================================================
// ROUTES
// =============================================================================

/// One of the three auth operations routed through the gateway.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AuthRoute {
    Signup,
    Login,
    ForgotPassword,
}

impl AuthRoute {
    pub const ALL: [Self; 3] = [Self::Signup, Self::Login, Self::ForgotPassword];

    /// HTTP path, identical on the gateway and on the identity backend.
    #[must_use]
    pub fn path(self) -> &'static str {
        match self {
            Self::Signup => "/auth/signup",
            Self::Login => "/auth/login",
            Self::ForgotPassword => "/auth/forgot-password",
        }
    }

    /// Body fields that must be present as non-empty strings.
    #[must_use]
    pub fn required_fields(self) -> &'static [&'static str] {
        match self {
            Self::Signup | Self::ForgotPassword => &["email"],
            Self::Login => &["email", "password"],
        }
    }

    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Signup => "signup",
            Self::Login => "login",
            Self::ForgotPassword => "forgot_password",
        }
    }
}

impl fmt::Display for AuthRoute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// =============================================================================
// VALIDATION
// =============================================================================

/// Reason a request body failed the minimal shape check.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FieldError {
    #[error("request body must be a JSON object")]
    NotAnObject,
    #[error("missing required field `{0}`")]
    Missing(&'static str),
    #[error("field `{0}` must be a string")]
    NotAString(&'static str),
    #[error("field `{0}` must not be empty")]
    Empty(&'static str),
    #[error("field `email` must be an email address")]
    MalformedEmail,
}

/// Check that `body` is an object carrying every field `route` requires.
///
/// Only presence and non-emptiness are checked; the identity backend owns
/// every other rule.
///
/// # Errors
///
/// Returns the first [`FieldError`] found, in `required_fields` order.
pub fn validate_body(route: AuthRoute, body: &Value) -> Result<(), FieldError> {
    let Some(object) = body.as_object() else {
        return Err(FieldError::NotAnObject);
    };
    for field in route.required_fields() {
        require_text(object, field)?;
    }
    Ok(())
}

fn require_text<'a>(object: &'a Map<String, Value>, field: &'static str) -> Result<&'a str, FieldError> {
    let value = object.get(field).ok_or(FieldError::Missing(field))?;
    let text = value.as_str().ok_or(FieldError::NotAString(field))?;
    if text.trim().is_empty() {
        return Err(FieldError::Empty(field));
    }
    Ok(text)
}

/// Non-empty, exactly one `@`, something on both sides of it.
///
/// # Errors
///
/// Returns [`FieldError::Empty`] or [`FieldError::MalformedEmail`].
pub fn check_email(email: &str) -> Result<(), FieldError> {
    let email = email.trim();
    if email.is_empty() {
        return Err(FieldError::Empty("email"));
    }
    let mut parts = email.split('@');
    match (parts.next(), parts.next(), parts.next()) {
        (Some(local), Some(domain), None) if !local.is_empty() && !domain.is_empty() => Ok(()),
        _ => Err(FieldError::MalformedEmail),
    }
}

fn check_password(password: &str) -> Result<(), FieldError> {
    if password.is_empty() {
        return Err(FieldError::Empty("password"));
    }
    Ok(())
}

// =============================================================================
// REQUEST SHAPES
// =============================================================================

/// Email + password pair. Owned by the caller for one request only.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

impl Credentials {
    #[must_use]
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self { email: email.into(), password: password.into() }
    }

    /// # Errors
    ///
    /// Returns a [`FieldError`] if the email is malformed or the password is empty.
    pub fn validate(&self) -> Result<(), FieldError> {
        check_email(&self.email)?;
        check_password(&self.password)
    }
}

// Keeps passwords out of logs and panic messages.
impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Signup payload: credentials plus opaque profile fields, serialized flat.
#[derive(Clone, PartialEq, Serialize, Deserialize)]
pub struct SignupRequest {
    pub email: String,
    pub password: String,
    #[serde(flatten)]
    pub profile: Map<String, Value>,
}

impl SignupRequest {
    #[must_use]
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self { email: email.into(), password: password.into(), profile: Map::new() }
    }

    /// Attach a profile field. `email` and `password` are ignored here since
    /// they already have dedicated fields.
    #[must_use]
    pub fn with_field(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        let key = key.into();
        if key != "email" && key != "password" {
            self.profile.insert(key, value.into());
        }
        self
    }

    /// # Errors
    ///
    /// Returns a [`FieldError`] if the email is malformed or the password is empty.
    pub fn validate(&self) -> Result<(), FieldError> {
        check_email(&self.email)?;
        check_password(&self.password)
    }
}

impl fmt::Debug for SignupRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SignupRequest")
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .field("profile", &self.profile)
            .finish()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ForgotPasswordRequest {
    pub email: String,
}

impl ForgotPasswordRequest {
    #[must_use]
    pub fn new(email: impl Into<String>) -> Self {
        Self { email: email.into() }
    }
}

/// Error envelope the gateway emits for its own failures (`400`, `502`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}

impl ErrorBody {
    #[must_use]
    pub fn new(error: impl Into<String>) -> Self {
        Self { error: error.into() }
    }
}

#[cfg(test)]
#[path = "lib_test.rs"]
mod tests;
