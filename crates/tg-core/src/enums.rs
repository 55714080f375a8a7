//! Entity types, audit actions, and trail operations for Thinkgraph.
//!
//! All enums use `snake_case` serialization via `#[serde(rename_all = "snake_case")]`
//! and expose `as_str()` for SQL storage.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;

// ---------------------------------------------------------------------------
// EntityType
// ---------------------------------------------------------------------------

/// Type of entity in the system, used in the audit trail, trail files, and
/// as the `entity_type` a note attaches to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum EntityType {
    Decision,
    Option,
    Criteria,
    Evaluation,
    Note,
    Audit,
}

impl EntityType {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Decision => "decision",
            Self::Option => "option",
            Self::Criteria => "criteria",
            Self::Evaluation => "evaluation",
            Self::Note => "note",
            Self::Audit => "audit",
        }
    }

    /// SQL table backing this entity type.
    #[must_use]
    pub const fn table(self) -> &'static str {
        match self {
            Self::Decision => "decisions",
            Self::Option => "options",
            Self::Criteria => "criteria",
            Self::Evaluation => "evaluations",
            Self::Note => "notes",
            Self::Audit => "audit_trail",
        }
    }
}

impl fmt::Display for EntityType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// AuditAction
// ---------------------------------------------------------------------------

/// Action recorded in an audit entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum AuditAction {
    Created,
    Updated,
    Deleted,
    Moved,
    Reordered,
}

impl AuditAction {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Created => "created",
            Self::Updated => "updated",
            Self::Deleted => "deleted",
            Self::Moved => "moved",
            Self::Reordered => "reordered",
        }
    }
}

impl fmt::Display for AuditAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// TrailOp
// ---------------------------------------------------------------------------

/// Operation type recorded in JSONL trail files.
///
/// - Mutation ops: `Create`, `Update`, `Delete`
/// - Hierarchy ops: `Move` (re-parent with subtree rebase), `Reorder` (sibling order only)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum TrailOp {
    Create,
    Update,
    Delete,
    Move,
    Reorder,
}

impl TrailOp {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Create => "create",
            Self::Update => "update",
            Self::Delete => "delete",
            Self::Move => "move",
            Self::Reorder => "reorder",
        }
    }
}

impl fmt::Display for TrailOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    macro_rules! test_serde_roundtrip {
        ($name:ident, $ty:ty, $variant:expr, $expected_str:expr) => {
            #[test]
            fn $name() {
                let val = $variant;
                let json = serde_json::to_string(&val).unwrap();
                assert_eq!(json, format!("\"{}\"", $expected_str));
                let recovered: $ty = serde_json::from_str(&json).unwrap();
                assert_eq!(recovered, val);
            }
        };
    }

    test_serde_roundtrip!(entity_decision, EntityType, EntityType::Decision, "decision");
    test_serde_roundtrip!(entity_criteria, EntityType, EntityType::Criteria, "criteria");
    test_serde_roundtrip!(audit_moved, AuditAction, AuditAction::Moved, "moved");
    test_serde_roundtrip!(audit_reordered, AuditAction, AuditAction::Reordered, "reordered");
    test_serde_roundtrip!(trail_move, TrailOp, TrailOp::Move, "move");

    #[test]
    fn as_str_matches_serde() {
        for entity in [
            EntityType::Decision,
            EntityType::Option,
            EntityType::Criteria,
            EntityType::Evaluation,
            EntityType::Note,
            EntityType::Audit,
        ] {
            let json = serde_json::to_string(&entity).unwrap();
            assert_eq!(json, format!("\"{}\"", entity.as_str()));
        }
        for action in [
            AuditAction::Created,
            AuditAction::Updated,
            AuditAction::Deleted,
            AuditAction::Moved,
            AuditAction::Reordered,
        ] {
            let json = serde_json::to_string(&action).unwrap();
            assert_eq!(json, format!("\"{action}\""));
        }
    }

    #[test]
    fn tables_are_distinct() {
        let tables = [
            EntityType::Decision.table(),
            EntityType::Option.table(),
            EntityType::Criteria.table(),
            EntityType::Evaluation.table(),
            EntityType::Note.table(),
            EntityType::Audit.table(),
        ];
        let unique: std::collections::HashSet<_> = tables.iter().collect();
        assert_eq!(unique.len(), tables.len());
    }
}
