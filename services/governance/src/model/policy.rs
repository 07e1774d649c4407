//! Access-control policy record and creation draft.
use chrono::{DateTime, Utc};
use governance_authz::Effect;
use governance_common::ids::PolicyId;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Serialize, Deserialize, ToSchema, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Policy {
    #[schema(value_type = String, format = Uuid)]
    pub id: PolicyId,
    pub principal: String,
    pub action: String,
    pub resource: String,
    #[schema(value_type = String, example = "permit")]
    pub effect: Effect,
    pub created_at: DateTime<Utc>,
}

/// Creation payload. `effect` stays a raw string until validation so that a
/// bad value is reported as a validation error.
#[derive(Debug, Serialize, Deserialize, ToSchema, Clone)]
pub struct PolicyDraft {
    pub principal: String,
    pub action: String,
    pub resource: String,
    pub effect: String,
}
