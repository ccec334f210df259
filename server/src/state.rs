//! Shared application state.
//!
//! DESIGN
//! ======
//! `AppState` is injected into Axum handlers via the `State` extractor. The
//! gateway keeps no per-request or cross-request data: the only thing shared
//! is the identity backend handle, which is immutable after startup.

use std::sync::Arc;

use crate::services::identity::IdentityBackend;

/// Shared application state, injected into Axum handlers via State extractor.
/// Clone is required by Axum; the backend handle is Arc-wrapped.
#[derive(Clone)]
pub struct AppState {
    pub identity: Arc<dyn IdentityBackend>,
}

impl AppState {
    #[must_use]
    pub fn new(identity: Arc<dyn IdentityBackend>) -> Self {
        Self { identity }
    }
}

// =============================================================================
// TEST HELPERS
// =============================================================================
