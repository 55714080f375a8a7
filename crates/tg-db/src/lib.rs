//! # tg-db
//!
//! libSQL storage for Thinkgraph.
//!
//! Holds the five team-scoped collections (decisions, options, criteria,
//! evaluations, notes) plus the audit trail, and maintains the materialized
//! path hierarchy over decisions. Every mutation runs in one serialized
//! write transaction together with its audit row; committed mutations are
//! then appended to the per-team JSONL trail.

pub mod error;
pub mod helpers;
pub mod hierarchy;
mod migrations;
pub mod repos;
pub mod service;
pub mod trail;
mod tx;
pub mod updates;

#[cfg(test)]
mod test_support;

use error::DatabaseError;
use libsql::Builder;

pub use tx::{ReadConn, WriteTx};

/// Central database handle for all Thinkgraph state.
///
/// Wraps a libSQL database, its single connection, and the gate that keeps
/// reads out of open write transactions on that connection.
pub struct ThinkgraphDb {
    #[allow(dead_code)]
    db: libsql::Database,
    conn: libsql::Connection,
    gate: tokio::sync::RwLock<()>,
}

impl ThinkgraphDb {
    /// Open a local database at the given path (`":memory:"` for tests).
    ///
    /// Runs migrations automatically on open.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the database cannot be opened or
    /// migrations fail.
    pub async fn open_local(path: &str) -> Result<Self, DatabaseError> {
        let db = Builder::new_local(path).build().await?;
        let conn = db.connect()?;

        let tg_db = Self {
            db,
            conn,
            gate: tokio::sync::RwLock::new(()),
        };
        tg_db.run_migrations().await?;
        tracing::debug!(path, "opened database");
        Ok(tg_db)
    }

    /// The raw connection, bypassing the gate. Reads go through
    /// [`ThinkgraphDb::read`] and writes through [`ThinkgraphDb::begin_write`].
    #[must_use]
    pub(crate) const fn conn(&self) -> &libsql::Connection {
        &self.conn
    }

    /// Generate a prefixed ID via libSQL. Returns e.g., `"dec-a3f8b2c1"`.
    ///
    /// Uses `randomblob(4)` in SQL to produce 8-char hex, then prepends the prefix.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the query fails or returns no rows.
    pub async fn generate_id(&self, prefix: &str) -> Result<String, DatabaseError> {
        let mut rows = self
            .conn
            .query(
                &format!("SELECT '{prefix}-' || lower(hex(randomblob(4)))"),
                (),
            )
            .await?;
        let row = rows.next().await?.ok_or(DatabaseError::NoResult)?;
        Ok(row.get::<String>(0)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    async fn test_db() -> ThinkgraphDb {
        ThinkgraphDb::open_local(":memory:").await.unwrap()
    }

    #[tokio::test]
    async fn open_local_creates_schema() {
        let db = test_db().await;

        let tables = [
            "decisions",
            "options",
            "criteria",
            "evaluations",
            "notes",
            "audit_trail",
        ];
        for table in &tables {
            let mut rows = db
                .conn()
                .query(
                    "SELECT name FROM sqlite_master WHERE type='table' AND name=?1",
                    [*table],
                )
                .await
                .unwrap();
            let row = rows.next().await.unwrap();
            assert!(row.is_some(), "table '{table}' should exist");
        }
    }

    #[tokio::test]
    async fn generate_id_correct_format() {
        let db = test_db().await;
        let id = db.generate_id("dec").await.unwrap();
        assert!(id.starts_with("dec-"), "ID should start with 'dec-': {id}");
        assert_eq!(id.len(), 12, "ID should be 12 chars: {id}");
        assert!(id[4..].chars().all(|c| c.is_ascii_hexdigit()));
        assert!(!id.contains(tg_core::path::DELIMITER));
    }

    #[tokio::test]
    async fn generate_id_all_prefixes() {
        let db = test_db().await;
        for prefix in tg_core::ids::ALL_PREFIXES {
            let id = db.generate_id(prefix).await.unwrap();
            assert!(id.starts_with(&format!("{prefix}-")));
        }
    }

    #[tokio::test]
    async fn generate_id_uniqueness() {
        let db = test_db().await;
        let mut ids = HashSet::new();
        for _ in 0..100 {
            let id = db.generate_id("tst").await.unwrap();
            assert!(ids.insert(id.clone()), "Duplicate ID generated: {id}");
        }
    }

    #[tokio::test]
    async fn idempotent_migrations() {
        let db = test_db().await;
        db.run_migrations().await.unwrap();
    }

    #[tokio::test]
    async fn rolled_back_write_leaves_no_trace() {
        let db = test_db().await;

        let tx = db.begin_write().await.unwrap();
        tx.execute(
            "INSERT INTO audit_trail (id, team_id, actor, entity_type, entity_id, action)
             VALUES ('aud-t1', 'team-1', 'usr-1', 'decision', 'dec-1', 'created')",
            (),
        )
        .await
        .unwrap();
        tx.rollback().await.unwrap();

        let mut rows = db
            .conn()
            .query("SELECT COUNT(*) FROM audit_trail", ())
            .await
            .unwrap();
        let count: i64 = rows.next().await.unwrap().unwrap().get(0).unwrap();
        assert_eq!(count, 0);
    }

    #[tokio::test]
    async fn finish_commits_ok_and_rolls_back_err() {
        let db = test_db().await;

        let tx = db.begin_write().await.unwrap();
        let res = tx
            .execute(
                "INSERT INTO audit_trail (id, team_id, actor, entity_type, entity_id, action)
                 VALUES ('aud-ok', 'team-1', 'usr-1', 'decision', 'dec-1', 'created')",
                (),
            )
            .await
            .map_err(DatabaseError::from);
        tx.finish(res).await.unwrap();

        let tx = db.begin_write().await.unwrap();
        tx.execute(
            "INSERT INTO audit_trail (id, team_id, actor, entity_type, entity_id, action)
             VALUES ('aud-err', 'team-1', 'usr-1', 'decision', 'dec-1', 'created')",
            (),
        )
        .await
        .unwrap();
        let failed: Result<(), DatabaseError> = Err(DatabaseError::InvalidArgument("boom".into()));
        assert!(tx.finish(failed).await.is_err());

        let mut rows = db
            .conn()
            .query("SELECT id FROM audit_trail ORDER BY id", ())
            .await
            .unwrap();
        let mut ids = Vec::new();
        while let Some(row) = rows.next().await.unwrap() {
            ids.push(row.get::<String>(0).unwrap());
        }
        assert_eq!(ids, vec!["aud-ok".to_string()]);
    }
}
