//! Client side of the SilverConnect auth boundary.
//!
//! SYSTEM CONTEXT
//! ==============
//! `net` talks to the gateway, `state` models where the user is in the auth
//! flow, `session` ties the two together for screens, and `util` holds small
//! helpers such as the friend roster cursor.

pub mod net;
pub mod session;
pub mod state;
pub mod util;

pub use net::auth::{AuthAdapter, AuthError};
pub use net::config::AdapterConfig;
pub use session::{AuthSession, SessionError};
pub use state::auth::{AuthEvent, AuthMachine, AuthPhase, TransitionError};
pub use wire::{Credentials, ForgotPasswordRequest, SignupRequest};
