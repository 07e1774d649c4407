//! Remote decision oracle speaking the OPA data API.
//!
//! # Purpose
//! Posts `{"input": {principal, action, resource}}` to a configured URL and
//! reads back a boolean verdict.
//!
//! # Accepted responses
//! - `{"result": true | false}`
//! - `{"result": {"allow": true | false}}`
//!
//! Anything else (missing result, non-boolean verdict, non-2xx status,
//! transport failure) is an [`OracleError`], which the gate turns into deny.
use async_trait::async_trait;
use governance_authz::{DecisionOracle, DecisionRequest, Effect, OracleError};
use serde::Serialize;
use serde_json::Value;
use std::time::Duration;

pub struct HttpOracle {
    client: reqwest::Client,
    url: String,
}

#[derive(Serialize)]
struct OracleInput<'a> {
    input: &'a DecisionRequest,
}

impl HttpOracle {
    pub fn new(url: impl Into<String>, timeout: Duration) -> Result<Self, OracleError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|err| OracleError::Unavailable(format!("build http client: {err}")))?;
        Ok(Self {
            client,
            url: url.into(),
        })
    }
}

#[async_trait]
impl DecisionOracle for HttpOracle {
    async fn decide(&self, request: &DecisionRequest) -> Result<Effect, OracleError> {
        let response = self
            .client
            .post(&self.url)
            .json(&OracleInput { input: request })
            .send()
            .await
            .map_err(|err| OracleError::Unavailable(err.to_string()))?;
        let status = response.status();
        if !status.is_success() {
            return Err(OracleError::Unavailable(format!(
                "oracle returned status {status}"
            )));
        }
        let body: Value = response
            .json()
            .await
            .map_err(|err| OracleError::Malformed(err.to_string()))?;
        parse_verdict(&body)
    }

    fn name(&self) -> &'static str {
        "http"
    }
}

pub fn parse_verdict(body: &Value) -> Result<Effect, OracleError> {
    let result = body
        .get("result")
        .ok_or_else(|| OracleError::Malformed("missing result".to_string()))?;
    let allow = match result {
        Value::Bool(allow) => *allow,
        Value::Object(fields) => fields
            .get("allow")
            .and_then(Value::as_bool)
            .ok_or_else(|| OracleError::Malformed("result.allow is not a boolean".to_string()))?,
        other => {
            return Err(OracleError::Malformed(format!(
                "unexpected result type: {other}"
            )));
        }
    };
    Ok(if allow { Effect::Permit } else { Effect::Forbid })
}
