//! Networking modules for the auth gateway.
//!
//! SYSTEM CONTEXT
//! ==============
//! `auth` issues the three auth requests and `config` resolves the gateway
//! base address they are sent to.

pub mod auth;
pub mod config;
