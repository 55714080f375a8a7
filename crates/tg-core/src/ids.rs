//! ID prefix constants.
//!
//! IDs are generated by the database as `"{prefix}-{8 hex chars}"`, e.g.
//! `"dec-a3f8b2c1"`. The alphabet never includes `/`, which keeps ids safe
//! to embed as materialized-path segments.

pub const PREFIX_DECISION: &str = "dec";
pub const PREFIX_OPTION: &str = "opt";
pub const PREFIX_CRITERIA: &str = "crt";
pub const PREFIX_EVALUATION: &str = "evl";
pub const PREFIX_NOTE: &str = "not";
pub const PREFIX_AUDIT: &str = "aud";

/// Every prefix in use, for tests that sweep all entity kinds.
pub const ALL_PREFIXES: &[&str] = &[
    PREFIX_DECISION,
    PREFIX_OPTION,
    PREFIX_CRITERIA,
    PREFIX_EVALUATION,
    PREFIX_NOTE,
    PREFIX_AUDIT,
];

/// Check that a string looks like an id minted with `prefix`.
#[must_use]
pub fn has_prefix(id: &str, prefix: &str) -> bool {
    id.strip_prefix(prefix)
        .and_then(|rest| rest.strip_prefix('-'))
        .is_some_and(|rest| !rest.is_empty() && !rest.contains('/'))
}
