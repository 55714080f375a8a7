//! Materialized-path hierarchy over decisions.
//!
//! The algorithms in [`manager`] only talk to a [`DecisionTreeStore`], a
//! team-scoped record store offering read-by-id, read-by-path-prefix and
//! update-by-id. [`LibsqlTreeStore`] is the production store; it runs every
//! statement on the caller's open write transaction, so a whole move (node
//! plus all rebased descendants) commits or rolls back as one unit.

pub mod manager;
pub mod store;

use serde::Serialize;
use tg_core::path::Placement;

pub use manager::{MoveReport, ReorderReport, move_node, reorder_siblings};
pub use store::{DecisionTreeStore, LibsqlTreeStore};

/// The tree-relevant projection of a decision.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TreeNode {
    pub id: String,
    pub parent_id: Option<String>,
    pub path: String,
    pub depth: i64,
    pub order: f64,
}

impl TreeNode {
    #[must_use]
    pub fn placement(&self) -> Placement<'_> {
        Placement {
            path: &self.path,
            depth: self.depth,
        }
    }
}

/// Fields to overwrite on one node. `None` leaves the column untouched;
/// `parent_id: Some(None)` makes the node a root.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PositionUpdate {
    pub parent_id: Option<Option<String>>,
    pub path: Option<String>,
    pub depth: Option<i64>,
    pub order: Option<f64>,
}

impl PositionUpdate {
    /// Full repositioning of the moved node itself.
    #[must_use]
    pub fn moved(parent_id: Option<&str>, path: String, depth: i64, order: f64) -> Self {
        Self {
            parent_id: Some(parent_id.map(String::from)),
            path: Some(path),
            depth: Some(depth),
            order: Some(order),
        }
    }

    /// Path/depth rewrite of a descendant; parent and order are kept.
    #[must_use]
    pub const fn rebased(path: String, depth: i64) -> Self {
        Self {
            parent_id: None,
            path: Some(path),
            depth: Some(depth),
            order: None,
        }
    }

    /// Sibling reorder; only `order` changes.
    #[must_use]
    pub const fn order_only(order: f64) -> Self {
        Self {
            parent_id: None,
            path: None,
            depth: None,
            order: Some(order),
        }
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.parent_id.is_none() && self.path.is_none() && self.depth.is_none() && self.order.is_none()
    }
}
