//! Policy effect polarity.
//!
//! # Key invariants
//! - Only the literal strings `permit` and `forbid` parse; matching is
//!   case-sensitive so that stored values are always canonical.
use crate::{AuthzError, AuthzResult};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Effect {
    Permit,
    Forbid,
}

impl Effect {
    pub fn as_str(self) -> &'static str {
        match self {
            Effect::Permit => "permit",
            Effect::Forbid => "forbid",
        }
    }

    /// Casbin `p.eft` value for this effect.
    pub fn casbin_eft(self) -> &'static str {
        match self {
            Effect::Permit => "allow",
            Effect::Forbid => "deny",
        }
    }

    pub fn parse(value: &str) -> AuthzResult<Self> {
        value.parse()
    }
}

impl std::fmt::Display for Effect {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Effect {
    type Err = AuthzError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "permit" => Ok(Effect::Permit),
            "forbid" => Ok(Effect::Forbid),
            other => Err(AuthzError::InvalidEffect(other.to_string())),
        }
    }
}
