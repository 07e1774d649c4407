//! Decision request and outcome types.
//!
//! # Purpose
//! A [`DecisionRequest`] is the stable (principal, action, resource) tuple the
//! gate submits to an oracle. A [`Decision`] is the gate's answer: permit or
//! deny, plus optional diagnostic detail for logs.
//!
//! # Key invariants
//! - `Decision::permit` is only constructed from an explicit oracle permit.
use crate::Effect;
use governance_common::Principal;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DecisionRequest {
    pub principal: Principal,
    pub action: String,
    pub resource: String,
}

impl DecisionRequest {
    pub fn new(
        principal: impl Into<String>,
        action: impl Into<String>,
        resource: impl Into<String>,
    ) -> Self {
        Self {
            principal: Principal::new(principal),
            action: action.into(),
            resource: resource.into(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Outcome {
    Permit,
    Deny,
}

impl Outcome {
    pub fn as_str(self) -> &'static str {
        match self {
            Outcome::Permit => "permit",
            Outcome::Deny => "deny",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Decision {
    pub outcome: Outcome,
    pub detail: Option<String>,
}

impl Decision {
    pub fn permit() -> Self {
        Self {
            outcome: Outcome::Permit,
            detail: None,
        }
    }

    pub fn deny(detail: impl Into<String>) -> Self {
        Self {
            outcome: Outcome::Deny,
            detail: Some(detail.into()),
        }
    }

    /// Map an oracle verdict into a gate decision.
    pub fn from_effect(effect: Effect) -> Self {
        match effect {
            Effect::Permit => Self::permit(),
            Effect::Forbid => Self::deny("forbidden by policy"),
        }
    }

    pub fn is_permit(&self) -> bool {
        self.outcome == Outcome::Permit
    }
}
