//! Authorization for governed operations.
//!
//! # Purpose
//! Groups the fail-closed gate, the oracle adapters it can sit in front of,
//! and requesting-principal extraction.
pub mod gate;
pub mod local;
pub mod principal;
pub mod remote;

pub use gate::{AuthorizationGate, StaticOracle};
pub use local::PolicyStoreOracle;
pub use remote::HttpOracle;
