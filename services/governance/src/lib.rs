//! Topic governance control-plane library crate.
//!
//! # Purpose
//! Exposes the topic lifecycle and policy authorization gate, their storage
//! backends, configuration, and the HTTP surface for the binary and tests.
//!
//! # Layout
//! `store` persists, `registry` validates, `auth` decides, `service`
//! orchestrates, and `api`/`app` translate to and from HTTP.
pub mod api;
pub mod app;
pub mod auth;
pub mod config;
pub mod error;
pub mod model;
pub mod observability;
pub mod registry;
pub mod service;
pub mod store;
