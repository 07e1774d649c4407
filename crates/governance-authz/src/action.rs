use serde::{Deserialize, Serialize};

/// Topic lifecycle actions submitted to the gate when topic gating is on.
///
/// Policy creation has no fixed action: the new policy's own action is the
/// decision subject.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Action {
    CreateTopic,
    ApproveTopic,
}

impl Action {
    pub fn as_str(self) -> &'static str {
        match self {
            Action::CreateTopic => "CreateTopic",
            Action::ApproveTopic => "ApproveTopic",
        }
    }
}

impl std::fmt::Display for Action {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
