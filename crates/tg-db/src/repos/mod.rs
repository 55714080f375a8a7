//! Repository modules implementing CRUD for all Thinkgraph collections.
//!
//! Each module adds methods to `ThinkgraphService` via `impl ThinkgraphService`
//! blocks. The statements shared by every collection (owner-scoped update and
//! delete, team-scoped existence checks) live here.

pub mod audit;
pub mod criteria;
pub mod decision;
pub mod evaluation;
pub mod note;
pub mod option;

use chrono::{DateTime, Utc};
use tg_core::identity::Actor;

use crate::error::DatabaseError;

/// Dynamic `SET` clause list with positional parameters.
pub(crate) struct SetClauses {
    sets: Vec<String>,
    params: Vec<libsql::Value>,
}

impl SetClauses {
    pub(crate) const fn new() -> Self {
        Self {
            sets: Vec::new(),
            params: Vec::new(),
        }
    }

    pub(crate) fn push(&mut self, column: &str, value: impl Into<libsql::Value>) {
        self.params.push(value.into());
        self.sets.push(format!("{column} = ?{}", self.params.len()));
    }

    /// Stamp `updated_at`/`updated_by` and run the UPDATE against the row
    /// `id` that belongs to the actor's team and is owned by the actor.
    ///
    /// Returns the number of rows changed (0 or 1).
    pub(crate) async fn apply_owned(
        mut self,
        conn: &libsql::Connection,
        table: &str,
        actor: &Actor,
        id: &str,
        now: DateTime<Utc>,
    ) -> Result<u64, DatabaseError> {
        self.push("updated_at", now.to_rfc3339());
        self.push("updated_by", actor.user_id.as_str());

        let base = self.params.len();
        self.params.push(id.into());
        self.params.push(actor.team_id.as_str().into());
        self.params.push(actor.user_id.as_str().into());

        let sql = format!(
            "UPDATE {table} SET {} WHERE id = ?{} AND team_id = ?{} AND owner = ?{}",
            self.sets.join(", "),
            base + 1,
            base + 2,
            base + 3,
        );
        Ok(conn
            .execute(&sql, libsql::params_from_iter(self.params))
            .await?)
    }
}

/// Delete row `id` of `table` if it belongs to the actor's team and is owned
/// by the actor. Returns the number of rows removed.
pub(crate) async fn delete_owned(
    conn: &libsql::Connection,
    table: &str,
    actor: &Actor,
    id: &str,
) -> Result<u64, DatabaseError> {
    Ok(conn
        .execute(
            &format!("DELETE FROM {table} WHERE id = ?1 AND team_id = ?2 AND owner = ?3"),
            libsql::params![id, actor.team_id.as_str(), actor.user_id.as_str()],
        )
        .await?)
}

/// Whether row `id` of `table` exists in `team_id`.
pub(crate) async fn exists_in_team(
    conn: &libsql::Connection,
    table: &str,
    team_id: &str,
    id: &str,
) -> Result<bool, DatabaseError> {
    let mut rows = conn
        .query(
            &format!("SELECT 1 FROM {table} WHERE id = ?1 AND team_id = ?2"),
            libsql::params![id, team_id],
        )
        .await?;
    Ok(rows.next().await?.is_some())
}

/// Whether row `id` of `table` exists in the actor's team and is owned by the actor.
pub(crate) async fn owned_by(
    conn: &libsql::Connection,
    table: &str,
    actor: &Actor,
    id: &str,
) -> Result<bool, DatabaseError> {
    let mut rows = conn
        .query(
            &format!("SELECT 1 FROM {table} WHERE id = ?1 AND team_id = ?2 AND owner = ?3"),
            libsql::params![id, actor.team_id.as_str(), actor.user_id.as_str()],
        )
        .await?;
    Ok(rows.next().await?.is_some())
}

/// Fail with `InvalidArgument` unless `id` exists in the actor's team.
pub(crate) async fn require_reference(
    conn: &libsql::Connection,
    table: &str,
    team_id: &str,
    what: &str,
    id: &str,
) -> Result<(), DatabaseError> {
    if exists_in_team(conn, table, team_id, id).await? {
        Ok(())
    } else {
        Err(DatabaseError::InvalidArgument(format!("{what} {id} not found")))
    }
}
