//! Move and reorder over a [`DecisionTreeStore`].

use serde::Serialize;
use tracing::{debug, warn};

use tg_core::audit_detail::SiblingOrder;
use tg_core::enums::EntityType;
use tg_core::path::{self, MoveRejected};

use crate::error::DatabaseError;
use crate::helpers::ensure_finite_order;
use crate::hierarchy::store::DecisionTreeStore;
use crate::hierarchy::{PositionUpdate, TreeNode};

/// Outcome of a successful [`move_node`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MoveReport {
    /// The moved node as written (descendant rewrites are not reflected).
    pub node: TreeNode,
    pub from_parent: Option<String>,
    pub from_path: String,
    /// Number of descendants whose path and depth were rewritten.
    pub descendants: usize,
}

/// Outcome of [`reorder_siblings`].
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ReorderReport {
    pub updated: Vec<TreeNode>,
    /// Requested ids with no node in the team.
    pub skipped: Vec<String>,
}

/// Re-parent `node_id` under `new_parent_id` (or make it a root) at `new_order`,
/// rewriting the path and depth of its whole subtree.
///
/// Checks run in this order and fail before anything is written:
/// node exists (`NotFound`), order is finite, parent exists, parent is not
/// inside the node's subtree (all `InvalidArgument`).
///
/// The descendant set is read before any write. Callers wanting atomicity
/// must hand in a store bound to a single transaction.
///
/// # Errors
///
/// See above; store failures are passed through.
pub async fn move_node<S: DecisionTreeStore>(
    store: &S,
    team_id: &str,
    node_id: &str,
    new_parent_id: Option<&str>,
    new_order: f64,
) -> Result<MoveReport, DatabaseError> {
    let current = store
        .find_by_id(team_id, node_id)
        .await?
        .ok_or_else(|| DatabaseError::not_found(EntityType::Decision, node_id))?;

    ensure_finite_order(new_order)?;

    let parent = match new_parent_id {
        Some(parent_id) => Some(store.find_by_id(team_id, parent_id).await?.ok_or_else(|| {
            DatabaseError::InvalidArgument(format!("parent decision {parent_id} not found"))
        })?),
        None => None,
    };

    let plan = path::plan_move(
        node_id,
        current.placement(),
        parent.as_ref().map(TreeNode::placement),
    )
    .map_err(|e: MoveRejected| DatabaseError::InvalidArgument(e.to_string()))?;

    let descendants = if plan.changes_path() {
        store
            .find_by_path_prefix(team_id, &plan.old_path, node_id)
            .await?
    } else {
        Vec::new()
    };

    let node = store
        .update_position(
            team_id,
            node_id,
            &PositionUpdate::moved(new_parent_id, plan.new_path.clone(), plan.new_depth, new_order),
        )
        .await?
        .ok_or_else(|| DatabaseError::not_found(EntityType::Decision, node_id))?;

    for descendant in &descendants {
        let (new_path, new_depth) = plan
            .rebase_descendant(&descendant.path, descendant.depth)
            .ok_or_else(|| {
                DatabaseError::InvalidState(format!(
                    "descendant {} at {} is outside {}",
                    descendant.id, descendant.path, plan.old_path
                ))
            })?;
        store
            .update_position(
                team_id,
                &descendant.id,
                &PositionUpdate::rebased(new_path, new_depth),
            )
            .await?
            .ok_or_else(|| DatabaseError::not_found(EntityType::Decision, &descendant.id))?;
    }

    debug!(
        team_id,
        node_id,
        from = %plan.old_path,
        to = %plan.new_path,
        descendants = descendants.len(),
        "moved decision"
    );

    Ok(MoveReport {
        node,
        from_parent: current.parent_id,
        from_path: plan.old_path,
        descendants: descendants.len(),
    })
}

/// Set `order` on each listed node of the team. Ids with no node in the team
/// are skipped and reported; nothing else about the nodes changes.
///
/// Sibling-ness is not checked.
///
/// # Errors
///
/// `InvalidArgument` if any order is non-finite (checked before any write);
/// store failures are passed through.
pub async fn reorder_siblings<S: DecisionTreeStore>(
    store: &S,
    team_id: &str,
    updates: &[SiblingOrder],
) -> Result<ReorderReport, DatabaseError> {
    for update in updates {
        ensure_finite_order(update.order)?;
    }

    let mut report = ReorderReport::default();
    for update in updates {
        match store
            .update_position(team_id, &update.id, &PositionUpdate::order_only(update.order))
            .await?
        {
            Some(node) => report.updated.push(node),
            None => {
                warn!(team_id, id = %update.id, "reorder skipped unknown decision");
                report.skipped.push(update.id.clone());
            }
        }
    }
    Ok(report)
}
