use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::enums::EntityType;

/// Free-form note attached to any other record.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct Note {
    pub id: String,
    pub team_id: String,
    pub owner: String,
    pub entity_type: EntityType,
    pub entity_id: String,
    pub content: String,
    /// Stored in the `type` column.
    pub note_type: Option<Vec<String>>,
    pub created_by: String,
    pub updated_by: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
