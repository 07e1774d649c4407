// Identifier types shared by the governance crates.
use serde::{Deserialize, Serialize};

pub mod ids {
    // Record identifiers are opaque UUIDs, typed per entity so a policy id
    // can never be passed where a topic id is expected.
    use serde::{Deserialize, Serialize};
    use std::fmt;
    use uuid::Uuid;

    macro_rules! record_id {
        ($name:ident) => {
            #[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
            #[serde(transparent)]
            pub struct $name(Uuid);

            impl $name {
                // Fresh identifier, assigned once when a record is created.
                pub fn generate() -> Self {
                    Self(Uuid::new_v4())
                }

                pub fn from_uuid(uuid: Uuid) -> Self {
                    Self(uuid)
                }

                pub fn as_uuid(&self) -> Uuid {
                    self.0
                }
            }

            impl fmt::Display for $name {
                fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                    self.0.fmt(f)
                }
            }
        };
    }

    record_id!(TopicId);
    record_id!(PolicyId);
}

/// Principal identifier: the user or service on whose behalf a request runs.
///
/// ```
/// use governance_common::Principal;
///
/// let principal = Principal::new("alice");
/// assert_eq!(principal.as_str(), "alice");
/// ```
#[derive(Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Principal(String);

impl Principal {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

impl std::fmt::Display for Principal {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}
