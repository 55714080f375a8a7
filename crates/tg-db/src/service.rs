//! Service layer orchestrating database mutations with audit and trail.
//!
//! `ThinkgraphService` wraps `ThinkgraphDb` (raw database access) and
//! `TrailWriter` (JSONL persistence). All repo methods are implemented as
//! `impl ThinkgraphService` blocks under `repos/`.

use std::path::{Path, PathBuf};

use chrono::Utc;
use tg_config::ThinkgraphConfig;
use tg_core::entities::AuditEntry;
use tg_core::enums::{AuditAction, EntityType, TrailOp};
use tg_core::identity::Actor;
use tg_core::ids::PREFIX_AUDIT;
use tg_core::trail::TrailOperation;

use crate::ThinkgraphDb;
use crate::error::DatabaseError;
use crate::repos::audit::insert_audit;
use crate::trail::writer::TrailWriter;

/// Orchestrates database mutations with audit trail and JSONL trail.
///
/// Every mutation method follows this protocol:
/// 1. Begin write transaction (serialized)
/// 2. Execute SQL
/// 3. Append audit entry (inside transaction)
/// 4. Commit, or roll back on any error
/// 5. Append JSONL trail operation (file I/O)
pub struct ThinkgraphService {
    db: ThinkgraphDb,
    trail: TrailWriter,
}

impl ThinkgraphService {
    /// Create a new service wrapping a local database.
    ///
    /// * `db_path` - Path to the libSQL database file, or `":memory:"` for tests.
    /// * `trail_dir` - Directory for JSONL trail files. `None` disables the trail.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the database cannot be opened or the trail
    /// directory cannot be created.
    pub async fn new_local(
        db_path: &str,
        trail_dir: Option<PathBuf>,
    ) -> Result<Self, DatabaseError> {
        let db = ThinkgraphDb::open_local(db_path).await?;
        let trail = match trail_dir {
            Some(dir) => TrailWriter::new(dir)?,
            None => TrailWriter::disabled(),
        };
        Ok(Self { db, trail })
    }

    /// Open the database and trail described by `config` for the project
    /// rooted at `project_root`, creating parent directories as needed.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if directories cannot be created or the
    /// database cannot be opened.
    pub async fn from_config(
        config: &ThinkgraphConfig,
        project_root: &Path,
    ) -> Result<Self, DatabaseError> {
        let db_path = if config.database.is_in_memory() {
            config.database.path.clone()
        } else {
            let path = config.database.resolved_path(project_root);
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent).map_err(|e| DatabaseError::Other(e.into()))?;
            }
            path.to_string_lossy().into_owned()
        };
        let trail_dir = config
            .database
            .trail_enabled
            .then(|| config.database.resolved_trail_dir(project_root));
        Self::new_local(&db_path, trail_dir).await
    }

    /// Create from an existing `ThinkgraphDb` (for testing).
    #[must_use]
    pub const fn from_db(db: ThinkgraphDb, trail: TrailWriter) -> Self {
        Self { db, trail }
    }

    /// Access the underlying database handle.
    #[must_use]
    pub const fn db(&self) -> &ThinkgraphDb {
        &self.db
    }

    #[must_use]
    pub const fn trail(&self) -> &TrailWriter {
        &self.trail
    }

    pub const fn trail_mut(&mut self) -> &mut TrailWriter {
        &mut self.trail
    }

    /// Insert an audit row for `actor` on `conn` (normally the open `WriteTx`).
    pub(crate) async fn record_audit(
        &self,
        conn: &libsql::Connection,
        actor: &Actor,
        entity_type: EntityType,
        entity_id: &str,
        action: AuditAction,
        detail: Option<serde_json::Value>,
    ) -> Result<AuditEntry, DatabaseError> {
        let entry = AuditEntry {
            id: self.db.generate_id(PREFIX_AUDIT).await?,
            team_id: actor.team_id.clone(),
            actor: actor.user_id.clone(),
            entity_type,
            entity_id: entity_id.to_string(),
            action,
            detail,
            created_at: Utc::now(),
        };
        insert_audit(conn, &entry).await?;
        Ok(entry)
    }

    /// Append a trail line for a mutation that has already committed.
    ///
    /// The database is authoritative at this point, so a failed append is
    /// logged rather than reported as a failed mutation.
    pub(crate) fn record_trail(
        &self,
        actor: &Actor,
        op: TrailOp,
        entity: EntityType,
        id: &str,
        data: serde_json::Value,
    ) {
        let operation = TrailOperation {
            v: 1,
            ts: Utc::now().to_rfc3339(),
            team: actor.team_id.clone(),
            actor: actor.user_id.clone(),
            op,
            entity,
            id: id.to_string(),
            data,
        };
        if let Err(e) = self.trail.append(&operation) {
            tracing::warn!(error = %e, %entity, id, "failed to append trail operation");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn from_config_creates_database_and_trail_dirs() {
        let dir = tempfile::tempdir().unwrap();
        let config = ThinkgraphConfig::default();

        let svc = ThinkgraphService::from_config(&config, dir.path())
            .await
            .unwrap();

        assert!(dir.path().join(".thinkgraph/thinkgraph.db").exists());
        assert!(dir.path().join(".thinkgraph/trail").is_dir());
        assert!(svc.trail().is_enabled());
    }

    #[tokio::test]
    async fn from_config_respects_disabled_trail() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = ThinkgraphConfig::default();
        config.database.path = ":memory:".into();
        config.database.trail_enabled = false;

        let svc = ThinkgraphService::from_config(&config, dir.path())
            .await
            .unwrap();
        assert!(!svc.trail().is_enabled());
        assert!(!dir.path().join(".thinkgraph").exists());
    }
}
