use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::path;

/// A decision record. Decisions form a per-team tree through `parent_id`,
/// mirrored in the materialized `path` and `depth`.
///
/// `order` is a float so a node can be slotted between two siblings without
/// renumbering the rest.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct Decision {
    pub id: String,
    pub team_id: String,
    pub owner: String,
    pub parent_id: Option<String>,
    pub path: String,
    pub depth: i64,
    pub order: f64,
    pub title: String,
    pub description: Option<String>,
    pub status: Option<Vec<String>>,
    #[serde(default = "empty_object")]
    pub position: serde_json::Value,
    pub due_date: Option<DateTime<Utc>>,
    pub priority: Option<Vec<String>>,
    pub outcome: Option<String>,
    pub created_by: String,
    pub updated_by: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Decision {
    #[must_use]
    pub fn placement(&self) -> path::Placement<'_> {
        path::Placement {
            path: &self.path,
            depth: self.depth,
        }
    }
}

fn empty_object() -> serde_json::Value {
    serde_json::Value::Object(serde_json::Map::new())
}
