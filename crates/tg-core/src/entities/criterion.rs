use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// A yardstick options of a decision are scored against.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct Criterion {
    pub id: String,
    pub team_id: String,
    pub owner: String,
    pub decision_id: String,
    pub title: String,
    pub description: Option<String>,
    pub weight: Option<f64>,
    pub order: Option<i64>,
    pub created_by: String,
    pub updated_by: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
