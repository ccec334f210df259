//! Auth session: the adapter plus the phase machine it drives.
//!
//! DESIGN
//! ======
//! Each network operation first applies its "submitted" event, so a call that
//! is illegal in the current phase fails without touching the network. The
//! gateway's answer then moves the machine to the success or failure phase.

#[cfg(test)]
#[path = "session_test.rs"]
mod session_test;

use serde_json::Value;
use wire::{Credentials, SignupRequest};

use crate::net::auth::{AuthAdapter, AuthError};
use crate::state::auth::{AuthEvent, AuthMachine, AuthPhase, TransitionError};

#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    #[error(transparent)]
    Transition(#[from] TransitionError),
    #[error(transparent)]
    Auth(#[from] AuthError),
}

pub struct AuthSession {
    adapter: AuthAdapter,
    machine: AuthMachine,
}

impl AuthSession {
    #[must_use]
    pub fn new(adapter: AuthAdapter) -> Self {
        Self { adapter, machine: AuthMachine::new() }
    }

    #[must_use]
    pub fn phase(&self) -> AuthPhase {
        self.machine.phase()
    }

    #[must_use]
    pub fn adapter(&self) -> &AuthAdapter {
        &self.adapter
    }

    /// # Errors
    ///
    /// `Transition` if signup is not allowed now, `Auth` if the request failed.
    pub async fn signup(&mut self, request: &SignupRequest) -> Result<Value, SessionError> {
        self.machine.apply(AuthEvent::SignupSubmitted)?;
        let result = self.adapter.signup(request).await;
        self.settle(result, |_| AuthEvent::SignupSucceeded)
    }

    /// Login; a body carrying `"onboarding_required": true` lands in
    /// [`AuthPhase::OnboardingRequired`] instead of `Authenticated`.
    ///
    /// # Errors
    ///
    /// `Transition` if login is not allowed now, `Auth` if the request failed.
    pub async fn login(&mut self, credentials: &Credentials) -> Result<Value, SessionError> {
        self.machine.apply(AuthEvent::LoginSubmitted)?;
        let result = self.adapter.login(credentials).await;
        self.settle(result, |body| AuthEvent::LoginSucceeded {
            onboarding_required: body
                .get("onboarding_required")
                .and_then(Value::as_bool)
                .unwrap_or(false),
        })
    }

    /// # Errors
    ///
    /// `Transition` if a reset is not allowed now, `Auth` if the request failed.
    pub async fn forgot_password(&mut self, email: &str) -> Result<Value, SessionError> {
        self.machine.apply(AuthEvent::PasswordResetRequested)?;
        let result = self.adapter.forgot_password(email).await;
        self.settle(result, |_| AuthEvent::PasswordResetSent)
    }

    /// # Errors
    ///
    /// `Transition` unless the session is in [`AuthPhase::ProfileSetup`].
    pub fn complete_profile(&mut self) -> Result<AuthPhase, SessionError> {
        Ok(self.machine.apply(AuthEvent::ProfileCompleted)?)
    }

    /// # Errors
    ///
    /// `Transition` unless the session is in [`AuthPhase::OnboardingRequired`].
    pub fn complete_onboarding(&mut self) -> Result<AuthPhase, SessionError> {
        Ok(self.machine.apply(AuthEvent::OnboardingCompleted)?)
    }

    /// # Errors
    ///
    /// `Transition` unless the session is logged in.
    pub fn logout(&mut self) -> Result<AuthPhase, SessionError> {
        Ok(self.machine.apply(AuthEvent::LoggedOut)?)
    }

    fn settle<F>(&mut self, result: Result<Value, AuthError>, on_success: F) -> Result<Value, SessionError>
    where
        F: FnOnce(&Value) -> AuthEvent,
    {
        match result {
            Ok(body) => {
                self.machine.apply(on_success(&body))?;
                Ok(body)
            }
            Err(err) => {
                self.machine.apply(AuthEvent::RequestFailed)?;
                Err(err.into())
            }
        }
    }
}
