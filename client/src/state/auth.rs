//! Auth flow state for the current app user.
//!
//! SYSTEM CONTEXT
//! ==============
//! Screens read the current [`AuthPhase`] to decide what to render, and feed
//! [`AuthEvent`]s in as the user acts and the gateway answers. Only pairs
//! listed in [`next_phase`] are legal; anything else is rejected and the
//! phase is left unchanged.

#[cfg(test)]
#[path = "auth_test.rs"]
mod auth_test;

use std::fmt;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum AuthPhase {
    #[default]
    Unauthenticated,
    SigningUp,
    /// Account created; profile (mode, hobbies, story) still to be filled in.
    ProfileSetup,
    LoggingIn,
    /// Logged in, but the backend asked for onboarding first.
    OnboardingRequired,
    Authenticated,
    ResettingPassword,
}

impl AuthPhase {
    /// A request is in flight for this phase.
    #[must_use]
    pub fn is_pending(self) -> bool {
        matches!(self, Self::SigningUp | Self::LoggingIn | Self::ResettingPassword)
    }
}

impl fmt::Display for AuthPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Unauthenticated => "unauthenticated",
            Self::SigningUp => "signing_up",
            Self::ProfileSetup => "profile_setup",
            Self::LoggingIn => "logging_in",
            Self::OnboardingRequired => "onboarding_required",
            Self::Authenticated => "authenticated",
            Self::ResettingPassword => "resetting_password",
        };
        f.write_str(name)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum AuthEvent {
    SignupSubmitted,
    SignupSucceeded,
    ProfileCompleted,
    LoginSubmitted,
    LoginSucceeded { onboarding_required: bool },
    OnboardingCompleted,
    PasswordResetRequested,
    PasswordResetSent,
    /// The in-flight request (signup, login or reset) failed.
    RequestFailed,
    LoggedOut,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum TransitionError {
    #[error("event {event:?} is not allowed in phase {from}")]
    Invalid { from: AuthPhase, event: AuthEvent },
}

/// The transition table. `None` means the event is illegal in `from`.
#[must_use]
pub fn next_phase(from: AuthPhase, event: AuthEvent) -> Option<AuthPhase> {
    use AuthEvent as E;
    use AuthPhase as P;

    let to = match (from, event) {
        (P::Unauthenticated, E::SignupSubmitted) => P::SigningUp,
        (P::SigningUp, E::SignupSucceeded) => P::ProfileSetup,
        (P::ProfileSetup, E::ProfileCompleted) => P::Unauthenticated,

        (P::Unauthenticated, E::LoginSubmitted) => P::LoggingIn,
        (P::LoggingIn, E::LoginSucceeded { onboarding_required: true }) => P::OnboardingRequired,
        (P::LoggingIn, E::LoginSucceeded { onboarding_required: false }) => P::Authenticated,
        (P::OnboardingRequired, E::OnboardingCompleted) => P::Authenticated,

        (P::Unauthenticated, E::PasswordResetRequested) => P::ResettingPassword,
        (P::ResettingPassword, E::PasswordResetSent) => P::Unauthenticated,

        (P::SigningUp | P::LoggingIn | P::ResettingPassword, E::RequestFailed) => P::Unauthenticated,
        (P::Authenticated | P::OnboardingRequired, E::LoggedOut) => P::Unauthenticated,
        _ => return None,
    };
    Some(to)
}

/// Holds the current phase and applies events through [`next_phase`].
#[derive(Clone, Debug, Default)]
pub struct AuthMachine {
    phase: AuthPhase,
}

impl AuthMachine {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn phase(&self) -> AuthPhase {
        self.phase
    }

    #[must_use]
    pub fn can_apply(&self, event: AuthEvent) -> bool {
        next_phase(self.phase, event).is_some()
    }

    /// # Errors
    ///
    /// Returns [`TransitionError::Invalid`] if `event` is not legal in the
    /// current phase. The phase is unchanged in that case.
    pub fn apply(&mut self, event: AuthEvent) -> Result<AuthPhase, TransitionError> {
        let from = self.phase;
        let to = next_phase(from, event).ok_or(TransitionError::Invalid { from, event })?;
        tracing::debug!(%from, %to, ?event, "auth phase transition");
        self.phase = to;
        Ok(to)
    }

    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.phase == AuthPhase::Authenticated
    }
}
