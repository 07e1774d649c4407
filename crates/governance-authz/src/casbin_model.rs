use crate::pattern::wildcard_match;
use casbin::function_map::{OperatorFunction, dynamic_to_str};
use casbin::prelude::DefaultModel;
use casbin::rhai::Dynamic;

/// Name under which [`wildcard_match_operator`] must be registered on the
/// enforcer before the model's matcher is evaluated.
pub const WILDCARD_MATCH: &str = "wildcardMatch";

// Forbid overrides permit; anything unmatched is denied.
const MODEL: &str = r#"
[request_definition]
r = sub, obj, act

[policy_definition]
p = sub, obj, act, eft

[policy_effect]
e = some(where (p.eft == allow)) && !some(where (p.eft == deny))

[matchers]
m = wildcardMatch(r.sub, p.sub) && wildcardMatch(r.obj, p.obj) && wildcardMatch(r.act, p.act)
"#;

pub fn casbin_model_string() -> &'static str {
    MODEL
}

pub async fn casbin_model() -> casbin::Result<DefaultModel> {
    DefaultModel::from_str(MODEL).await
}

pub fn wildcard_match_operator() -> OperatorFunction {
    OperatorFunction::Arg2(|subject: Dynamic, pattern: Dynamic| {
        wildcard_match(&dynamic_to_str(&subject), &dynamic_to_str(&pattern)).into()
    })
}
