//! Authorization primitives shared by the governance service and its oracles.
//!
//! # Purpose
//! Defines the decision-request shape, the permit/forbid policy effect, the
//! oracle capability trait, and the Casbin model and wildcard matcher used by
//! the local oracle.
//!
//! # How it fits
//! The governance service owns an authorization gate that submits
//! [`DecisionRequest`]s to a [`DecisionOracle`]. Oracle adapters (local policy
//! evaluation, remote HTTP engine) implement the trait; the gate converts any
//! [`OracleError`] into a deny.
//!
//! # Key invariants
//! - An [`Effect`] is exactly `permit` or `forbid`; nothing else parses.
//! - A [`Decision`] is permit only when an oracle explicitly answered permit.
//!
//! # Examples
//! ```rust
//! use governance_authz::{Decision, DecisionRequest, Effect};
//!
//! let request = DecisionRequest::new("alice", "CreateTopic", "orders.created");
//! assert_eq!(request.action, "CreateTopic");
//! assert!(Decision::from_effect(Effect::Permit).is_permit());
//! assert!(!Decision::deny("oracle unavailable").is_permit());
//! ```
//!
//! # Common pitfalls
//! - Treating an oracle error as "no opinion"; callers must go through a
//!   fail-closed gate.

mod action;
mod casbin_model;
mod decision;
mod effect;
mod errors;
mod oracle;
mod pattern;

pub use action::Action;
pub use casbin_model::{
    WILDCARD_MATCH, casbin_model, casbin_model_string, wildcard_match_operator,
};
pub use decision::{Decision, DecisionRequest, Outcome};
pub use effect::Effect;
pub use errors::{AuthzError, AuthzResult, OracleError};
pub use oracle::DecisionOracle;
pub use pattern::wildcard_match;
