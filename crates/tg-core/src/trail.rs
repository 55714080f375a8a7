//! JSONL trail operation envelope.
//!
//! Every committed mutation is recorded as a `TrailOperation` in per-team
//! `.thinkgraph/trail/{team_id}.jsonl` files.
//!
//! The `v` field supports schema versioning: old trail files without a `v`
//! field deserialize with `v == 1` via `#[serde(default)]`.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::enums::{EntityType, TrailOp};

const fn default_trail_version() -> u32 {
    1
}

/// A single operation recorded in the JSONL trail.
///
/// `data` holds the full entity for `Create`, the changed fields for `Update`,
/// the position change for `Move`, and the applied `(id, order)` pairs for `Reorder`.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct TrailOperation {
    /// Schema version. Defaults to 1 for trails without this field.
    #[serde(default = "default_trail_version")]
    pub v: u32,

    /// RFC 3339 timestamp of the operation.
    pub ts: String,

    /// Team the mutation was scoped to.
    pub team: String,

    /// User that performed the mutation.
    pub actor: String,

    pub op: TrailOp,

    pub entity: EntityType,

    /// ID of the affected entity. Empty for batch ops such as `Reorder`.
    pub id: String,

    pub data: serde_json::Value,
}
