//! Record-store abstraction used by the hierarchy algorithms.

use chrono::Utc;

use crate::error::DatabaseError;
use crate::hierarchy::{PositionUpdate, TreeNode};

/// Team-scoped access to decision positions.
///
/// Every method takes the team id and must never see or touch rows of
/// another team.
#[allow(async_fn_in_trait)]
pub trait DecisionTreeStore {
    /// The node `id` in `team_id`, if any.
    async fn find_by_id(&self, team_id: &str, id: &str) -> Result<Option<TreeNode>, DatabaseError>;

    /// Every node of `team_id` whose path starts with `prefix`, except `exclude_id`.
    async fn find_by_path_prefix(
        &self,
        team_id: &str,
        prefix: &str,
        exclude_id: &str,
    ) -> Result<Vec<TreeNode>, DatabaseError>;

    /// Apply `update` to node `id` in `team_id` and return its new state,
    /// or `None` when no such node exists in the team.
    async fn update_position(
        &self,
        team_id: &str,
        id: &str,
        update: &PositionUpdate,
    ) -> Result<Option<TreeNode>, DatabaseError>;
}

const TREE_COLS: &str = r#"id, parent_id, path, depth, "order""#;

fn row_to_node(row: &libsql::Row) -> Result<TreeNode, DatabaseError> {
    Ok(TreeNode {
        id: row.get::<String>(0)?,
        parent_id: crate::helpers::get_opt_string(row, 1)?,
        path: row.get::<String>(2)?,
        depth: row.get::<i64>(3)?,
        order: row.get::<f64>(4)?,
    })
}

/// `DecisionTreeStore` over the `decisions` table.
///
/// Built on whatever connection it is handed; the service hands it an open
/// `WriteTx` so all position writes of one operation share a transaction.
pub struct LibsqlTreeStore<'c> {
    conn: &'c libsql::Connection,
}

impl<'c> LibsqlTreeStore<'c> {
    #[must_use]
    pub const fn new(conn: &'c libsql::Connection) -> Self {
        Self { conn }
    }
}

impl DecisionTreeStore for LibsqlTreeStore<'_> {
    async fn find_by_id(&self, team_id: &str, id: &str) -> Result<Option<TreeNode>, DatabaseError> {
        let mut rows = self
            .conn
            .query(
                &format!("SELECT {TREE_COLS} FROM decisions WHERE id = ?1 AND team_id = ?2"),
                libsql::params![id, team_id],
            )
            .await?;
        rows.next().await?.map(|row| row_to_node(&row)).transpose()
    }

    async fn find_by_path_prefix(
        &self,
        team_id: &str,
        prefix: &str,
        exclude_id: &str,
    ) -> Result<Vec<TreeNode>, DatabaseError> {
        // substr() instead of LIKE: ids may contain '%' or '_'.
        let mut rows = self
            .conn
            .query(
                &format!(
                    "SELECT {TREE_COLS} FROM decisions
                     WHERE team_id = ?1 AND substr(path, 1, length(?2)) = ?2 AND id != ?3
                     ORDER BY path"
                ),
                libsql::params![team_id, prefix, exclude_id],
            )
            .await?;

        let mut nodes = Vec::new();
        while let Some(row) = rows.next().await? {
            nodes.push(row_to_node(&row)?);
        }
        Ok(nodes)
    }

    async fn update_position(
        &self,
        team_id: &str,
        id: &str,
        update: &PositionUpdate,
    ) -> Result<Option<TreeNode>, DatabaseError> {
        if update.is_empty() {
            return self.find_by_id(team_id, id).await;
        }

        let mut sets = Vec::new();
        let mut params: Vec<libsql::Value> = Vec::new();

        if let Some(ref parent_id) = update.parent_id {
            params.push(parent_id.as_deref().into());
            sets.push(format!("parent_id = ?{}", params.len()));
        }
        if let Some(ref path) = update.path {
            params.push(path.as_str().into());
            sets.push(format!("path = ?{}", params.len()));
        }
        if let Some(depth) = update.depth {
            params.push(depth.into());
            sets.push(format!("depth = ?{}", params.len()));
        }
        if let Some(order) = update.order {
            params.push(order.into());
            sets.push(format!("\"order\" = ?{}", params.len()));
        }
        params.push(Utc::now().to_rfc3339().into());
        sets.push(format!("updated_at = ?{}", params.len()));

        params.push(id.into());
        let id_idx = params.len();
        params.push(team_id.into());
        let team_idx = params.len();

        let sql = format!(
            "UPDATE decisions SET {} WHERE id = ?{id_idx} AND team_id = ?{team_idx} RETURNING {TREE_COLS}",
            sets.join(", ")
        );
        let mut rows = self
            .conn
            .query(&sql, libsql::params_from_iter(params))
            .await?;
        rows.next().await?.map(|row| row_to_node(&row)).transpose()
    }
}
