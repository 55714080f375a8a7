//! Materialized-path math for the decision tree.
//!
//! A node's path is its ancestor chain as `/`-delimited ids, ending with its
//! own id and a trailing delimiter: `/root/child/grandchild/`. A root node's
//! path is `/id/`. Because every path ends in `/`, a plain string prefix test
//! on a path is an exact "self or descendant" test: `/a/b/` never prefixes
//! `/a/bc/`.
//!
//! Subtree queries become prefix scans and a move becomes a prefix
//! substitution over the moved node's descendants.

use thiserror::Error;

pub const DELIMITER: char = '/';

/// Path of a node with no parent.
#[must_use]
pub fn root_path(id: &str) -> String {
    format!("{DELIMITER}{id}{DELIMITER}")
}

/// Path of `id` placed directly under a parent whose path is `parent_path`.
#[must_use]
pub fn child_path(parent_path: &str, id: &str) -> String {
    format!("{parent_path}{id}{DELIMITER}")
}

/// Number of ancestor segments encoded in `path` (0 for a root path).
#[must_use]
pub fn depth_of(path: &str) -> i64 {
    let segments = path.split(DELIMITER).filter(|s| !s.is_empty()).count();
    i64::try_from(segments.saturating_sub(1)).unwrap_or(i64::MAX)
}

/// Last id segment of `path`, i.e. the node the path belongs to.
#[must_use]
pub fn last_segment(path: &str) -> Option<&str> {
    path.split(DELIMITER).rfind(|s| !s.is_empty())
}

/// Whether `candidate` is the subtree root itself or one of its descendants.
#[must_use]
pub fn is_within(candidate: &str, subtree: &str) -> bool {
    candidate.starts_with(subtree)
}

/// Replace the `old_prefix` of `path` with `new_prefix`.
///
/// Returns `None` when `path` does not start with `old_prefix`. Only the
/// prefix is substituted, so the descendant's own suffix is kept verbatim.
#[must_use]
pub fn rebase(path: &str, old_prefix: &str, new_prefix: &str) -> Option<String> {
    path.strip_prefix(old_prefix)
        .map(|rest| format!("{new_prefix}{rest}"))
}

/// Current placement of a node in the tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Placement<'a> {
    pub path: &'a str,
    pub depth: i64,
}

/// A move was requested that would break the tree.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MoveRejected {
    /// The destination parent is the node itself or one of its descendants.
    #[error("cannot move {node_id} into its own descendant")]
    IntoOwnSubtree { node_id: String },
}

/// Where a node ends up after a move, and how its descendants shift.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MovePlan {
    pub old_path: String,
    pub new_path: String,
    pub old_depth: i64,
    pub new_depth: i64,
}

impl MovePlan {
    /// Signed depth change applied to every descendant.
    #[must_use]
    pub const fn depth_delta(&self) -> i64 {
        self.new_depth - self.old_depth
    }

    /// Whether the node actually changes position in the path tree.
    #[must_use]
    pub fn changes_path(&self) -> bool {
        self.old_path != self.new_path
    }

    /// New `(path, depth)` for a descendant currently at `(path, depth)`.
    ///
    /// `None` if `path` is not under the node's old path.
    #[must_use]
    pub fn rebase_descendant(&self, path: &str, depth: i64) -> Option<(String, i64)> {
        rebase(path, &self.old_path, &self.new_path).map(|p| (p, depth + self.depth_delta()))
    }
}

/// Compute the new placement of `node_id` under `parent` (or as a root).
///
/// # Errors
///
/// Returns `MoveRejected::IntoOwnSubtree` when the parent's path lies inside
/// the node's current path, which would make the node its own ancestor.
pub fn plan_move(
    node_id: &str,
    current: Placement<'_>,
    parent: Option<Placement<'_>>,
) -> Result<MovePlan, MoveRejected> {
    let (new_path, new_depth) = match parent {
        Some(parent) => {
            if is_within(parent.path, current.path) {
                return Err(MoveRejected::IntoOwnSubtree {
                    node_id: node_id.to_string(),
                });
            }
            (child_path(parent.path, node_id), parent.depth + 1)
        }
        None => (root_path(node_id), 0),
    };

    Ok(MovePlan {
        old_path: current.path.to_string(),
        new_path,
        old_depth: current.depth,
        new_depth,
    })
}
