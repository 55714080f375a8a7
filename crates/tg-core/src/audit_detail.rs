//! Typed audit detail payloads.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Detail for `AuditAction::Moved`.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct MovedDetail {
    pub from_parent: Option<String>,
    pub to_parent: Option<String>,
    pub from_path: String,
    pub to_path: String,
    pub order: f64,
    /// Number of descendants whose path/depth were rewritten.
    pub descendants: usize,
}

/// Detail for `AuditAction::Reordered`.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct ReorderedDetail {
    pub applied: Vec<SiblingOrder>,
    /// Requested ids that did not resolve inside the team.
    pub skipped: Vec<String>,
}

/// One `(id, order)` pair of a sibling reorder request.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct SiblingOrder {
    pub id: String,
    pub order: f64,
}
