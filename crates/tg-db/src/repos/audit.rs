//! Audit trail repository.
//!
//! Append-only audit entries, one per committed mutation, written inside the
//! mutation's own transaction.

use tg_core::entities::AuditEntry;
use tg_core::enums::{AuditAction, EntityType};

use crate::error::DatabaseError;
use crate::helpers::{get_opt_string, parse_datetime, parse_enum, parse_optional_json};
use crate::service::ThinkgraphService;

const AUDIT_COLS: &str = "id, team_id, actor, entity_type, entity_id, action, detail, created_at";

/// Filter criteria for audit queries. `team_id` is mandatory.
#[derive(Debug, Default)]
pub struct AuditFilter {
    pub team_id: String,
    pub entity_type: Option<EntityType>,
    pub entity_id: Option<String>,
    pub action: Option<AuditAction>,
    pub limit: Option<u32>,
}

impl AuditFilter {
    #[must_use]
    pub fn for_team(team_id: impl Into<String>) -> Self {
        Self {
            team_id: team_id.into(),
            ..Default::default()
        }
    }
}

fn row_to_audit(row: &libsql::Row) -> Result<AuditEntry, DatabaseError> {
    Ok(AuditEntry {
        id: row.get::<String>(0)?,
        team_id: row.get::<String>(1)?,
        actor: row.get::<String>(2)?,
        entity_type: parse_enum(&row.get::<String>(3)?)?,
        entity_id: row.get::<String>(4)?,
        action: parse_enum(&row.get::<String>(5)?)?,
        detail: parse_optional_json(get_opt_string(row, 6)?.as_deref())?,
        created_at: parse_datetime(&row.get::<String>(7)?)?,
    })
}

/// Insert an audit entry on `conn`.
pub(crate) async fn insert_audit(
    conn: &libsql::Connection,
    entry: &AuditEntry,
) -> Result<(), DatabaseError> {
    conn.execute(
        &format!("INSERT INTO audit_trail ({AUDIT_COLS}) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)"),
        libsql::params![
            entry.id.as_str(),
            entry.team_id.as_str(),
            entry.actor.as_str(),
            entry.entity_type.as_str(),
            entry.entity_id.as_str(),
            entry.action.as_str(),
            entry.detail.as_ref().map(std::string::ToString::to_string).as_deref(),
            entry.created_at.to_rfc3339()
        ],
    )
    .await?;
    Ok(())
}

impl ThinkgraphService {
    /// Append a pre-built audit entry outside of any mutation, e.g. when
    /// importing history.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the insert fails.
    pub async fn append_audit(&self, entry: &AuditEntry) -> Result<(), DatabaseError> {
        let tx = self.db().begin_write().await?;
        let result = insert_audit(&tx, entry).await;
        tx.finish(result).await
    }

    /// Query audit entries of one team with optional filters, newest first.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the query fails.
    pub async fn query_audit(
        &self,
        filter: &AuditFilter,
    ) -> Result<Vec<AuditEntry>, DatabaseError> {
        let mut conditions = vec!["team_id = ?1".to_string()];
        let mut params: Vec<libsql::Value> = vec![filter.team_id.as_str().into()];

        if let Some(ref et) = filter.entity_type {
            params.push(et.as_str().into());
            conditions.push(format!("entity_type = ?{}", params.len()));
        }
        if let Some(ref eid) = filter.entity_id {
            params.push(eid.as_str().into());
            conditions.push(format!("entity_id = ?{}", params.len()));
        }
        if let Some(ref action) = filter.action {
            params.push(action.as_str().into());
            conditions.push(format!("action = ?{}", params.len()));
        }

        let limit = filter.limit.unwrap_or(100);
        let sql = format!(
            "SELECT {AUDIT_COLS} FROM audit_trail WHERE {}
             ORDER BY created_at DESC, rowid DESC LIMIT {limit}",
            conditions.join(" AND ")
        );

        let conn = self.db().read().await;

        let mut rows = conn

            .query(&sql, libsql::params_from_iter(params))
            .await?;
        let mut entries = Vec::new();
        while let Some(row) = rows.next().await? {
            entries.push(row_to_audit(&row)?);
        }
        Ok(entries)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::helpers::{alice, alice_elsewhere, test_service};
    use crate::updates::decision::NewDecision;
    use chrono::Utc;

    #[tokio::test]
    async fn append_audit_is_visible_to_its_team_only() {
        let svc = test_service().await;
        svc.append_audit(&AuditEntry {
            id: "aud-00000001".to_string(),
            team_id: "team-1".to_string(),
            actor: "usr-alice".to_string(),
            entity_type: EntityType::Note,
            entity_id: "not-00000001".to_string(),
            action: AuditAction::Deleted,
            detail: Some(serde_json::json!({"reason": "import"})),
            created_at: Utc::now(),
        })
        .await
        .unwrap();

        let entries = svc.query_audit(&AuditFilter::for_team("team-1")).await.unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].detail.as_ref().unwrap()["reason"], "import");
        assert!(
            svc.query_audit(&AuditFilter::for_team("team-2"))
                .await
                .unwrap()
                .is_empty()
        );
    }

    #[tokio::test]
    async fn query_audit_filters_by_team_and_action() {
        let svc = test_service().await;
        let a = svc
            .create_decision(&alice(), NewDecision::titled("Root"))
            .await
            .unwrap();
        svc.create_decision(&alice_elsewhere(), NewDecision::titled("Other team"))
            .await
            .unwrap();
        svc.move_decision(&alice(), &a.id, None, 4.0).await.unwrap();

        let all = svc.query_audit(&AuditFilter::for_team("team-1")).await.unwrap();
        assert_eq!(all.len(), 2);
        assert!(all.iter().all(|e| e.team_id == "team-1"));
        assert_eq!(all[0].action, AuditAction::Moved);

        let created = svc
            .query_audit(&AuditFilter {
                action: Some(AuditAction::Created),
                ..AuditFilter::for_team("team-1")
            })
            .await
            .unwrap();
        assert_eq!(created.len(), 1);
        assert_eq!(created[0].entity_id, a.id);
        assert_eq!(created[0].actor, "usr-alice");
    }

    #[tokio::test]
    async fn query_audit_by_entity_and_limit() {
        let svc = test_service().await;
        let a = svc
            .create_decision(&alice(), NewDecision::titled("Root"))
            .await
            .unwrap();
        for order in 1..=3 {
            svc.move_decision(&alice(), &a.id, None, f64::from(order))
                .await
                .unwrap();
        }

        let entries = svc
            .query_audit(&AuditFilter {
                entity_type: Some(EntityType::Decision),
                entity_id: Some(a.id.clone()),
                limit: Some(2),
                ..AuditFilter::for_team("team-1")
            })
            .await
            .unwrap();
        assert_eq!(entries.len(), 2);
        let detail = entries[0].detail.as_ref().unwrap();
        assert_eq!(detail["order"], 3.0);
    }
}
