//! Requesting-principal extraction.
//!
//! The caller identity arrives in the `x-principal` header, set by the
//! authenticating proxy in front of the service.
use axum::http::HeaderMap;
use governance_common::Principal;

pub const PRINCIPAL_HEADER: &str = "x-principal";

/// Returns `None` when the header is absent, blank, or not valid UTF-8.
pub fn principal_from_headers(headers: &HeaderMap) -> Option<Principal> {
    let value = headers.get(PRINCIPAL_HEADER)?.to_str().ok()?.trim();
    if value.is_empty() {
        return None;
    }
    Some(Principal::new(value))
}
