//! Outbound services used by HTTP routes.
//!
//! ARCHITECTURE
//! ============
//! Service modules own the calls to other systems so route handlers can stay
//! focused on validation and response mapping.

pub mod identity;
