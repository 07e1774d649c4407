//! Governance HTTP API module.
//!
//! # Purpose
//! Route handler modules plus shared error and payload types.
pub mod error;
pub mod openapi;
pub mod policies;
pub mod system;
pub mod topics;
pub mod types;
