//! Client-side state models.

pub mod auth;
