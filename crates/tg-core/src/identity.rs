use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// The caller on whose behalf a mutation runs.
///
/// Team membership is resolved before this value is built; the storage layer
/// trusts it and uses `team_id` to scope every read and write, `user_id` to
/// stamp `owner`/`created_by`/`updated_by`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct Actor {
    pub user_id: String,
    pub team_id: String,
}

impl Actor {
    #[must_use]
    pub fn new(user_id: impl Into<String>, team_id: impl Into<String>) -> Self {
        Self {
            user_id: user_id.into(),
            team_id: team_id.into(),
        }
    }
}
