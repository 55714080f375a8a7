//! Criteria repository.

use chrono::Utc;
use serde_json::json;
use tracing::debug;

use tg_core::entities::Criterion;
use tg_core::enums::{AuditAction, EntityType, TrailOp};
use tg_core::identity::Actor;
use tg_core::ids::PREFIX_CRITERIA;

use crate::error::DatabaseError;
use crate::helpers::{get_opt_string, parse_datetime, placeholders, to_json};
use crate::repos::{SetClauses, delete_owned, require_reference};
use crate::service::ThinkgraphService;
use crate::updates::criteria::{CriterionUpdate, NewCriterion};

const TABLE: &str = "criteria";

const CRITERIA_COLS: &str = r#"id, team_id, owner, decision_id, title, description, weight, "order", created_by, updated_by, created_at, updated_at"#;

fn row_to_criterion(row: &libsql::Row) -> Result<Criterion, DatabaseError> {
    Ok(Criterion {
        id: row.get::<String>(0)?,
        team_id: row.get::<String>(1)?,
        owner: row.get::<String>(2)?,
        decision_id: row.get::<String>(3)?,
        title: row.get::<String>(4)?,
        description: get_opt_string(row, 5)?,
        weight: row.get::<Option<f64>>(6)?,
        order: row.get::<Option<i64>>(7)?,
        created_by: row.get::<String>(8)?,
        updated_by: row.get::<String>(9)?,
        created_at: parse_datetime(&row.get::<String>(10)?)?,
        updated_at: parse_datetime(&row.get::<String>(11)?)?,
    })
}

async fn collect(mut rows: libsql::Rows) -> Result<Vec<Criterion>, DatabaseError> {
    let mut criteria = Vec::new();
    while let Some(row) = rows.next().await? {
        criteria.push(row_to_criterion(&row)?);
    }
    Ok(criteria)
}

async fn fetch_criterion(
    conn: &libsql::Connection,
    team_id: &str,
    id: &str,
) -> Result<Option<Criterion>, DatabaseError> {
    let mut rows = conn
        .query(
            &format!("SELECT {CRITERIA_COLS} FROM criteria WHERE id = ?1 AND team_id = ?2"),
            libsql::params![id, team_id],
        )
        .await?;
    rows.next().await?.map(|row| row_to_criterion(&row)).transpose()
}

fn ensure_finite_weight(weight: Option<f64>) -> Result<(), DatabaseError> {
    match weight {
        Some(w) if !w.is_finite() => Err(DatabaseError::InvalidArgument(format!(
            "weight must be a finite number, got {w}"
        ))),
        _ => Ok(()),
    }
}

impl ThinkgraphService {
    /// # Errors
    ///
    /// `InvalidArgument` if the decision is not in the actor's team or the
    /// weight is not finite.
    pub async fn create_criterion(
        &self,
        actor: &Actor,
        new: NewCriterion,
    ) -> Result<Criterion, DatabaseError> {
        ensure_finite_weight(new.weight)?;

        let now = Utc::now();
        let id = self.db().generate_id(PREFIX_CRITERIA).await?;
        let criterion = Criterion {
            id: id.clone(),
            team_id: actor.team_id.clone(),
            owner: actor.user_id.clone(),
            decision_id: new.decision_id,
            title: new.title,
            description: new.description,
            weight: new.weight,
            order: new.order,
            created_by: actor.user_id.clone(),
            updated_by: actor.user_id.clone(),
            created_at: now,
            updated_at: now,
        };

        let tx = self.db().begin_write().await?;
        let result: Result<(), DatabaseError> = async {
            require_reference(&tx, "decisions", &actor.team_id, "decision", &criterion.decision_id)
                .await?;
            tx.execute(
                &format!(
                    "INSERT INTO criteria ({CRITERIA_COLS})
                     VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12)"
                ),
                libsql::params![
                    criterion.id.as_str(),
                    criterion.team_id.as_str(),
                    criterion.owner.as_str(),
                    criterion.decision_id.as_str(),
                    criterion.title.as_str(),
                    criterion.description.as_deref(),
                    criterion.weight,
                    criterion.order,
                    criterion.created_by.as_str(),
                    criterion.updated_by.as_str(),
                    now.to_rfc3339(),
                    now.to_rfc3339()
                ],
            )
            .await?;
            self.record_audit(&tx, actor, EntityType::Criteria, &id, AuditAction::Created, None)
                .await?;
            Ok(())
        }
        .await;
        tx.finish(result).await?;

        debug!(team_id = %actor.team_id, id = %criterion.id, "created criterion");
        self.record_trail(actor, TrailOp::Create, EntityType::Criteria, &id, to_json(&criterion)?);
        Ok(criterion)
    }

    /// # Errors
    ///
    /// `NotFound` when `id` does not exist in `team_id`.
    pub async fn get_criterion(&self, team_id: &str, id: &str) -> Result<Criterion, DatabaseError> {
        fetch_criterion(&*self.db().read().await, team_id, id)
            .await?
            .ok_or_else(|| DatabaseError::not_found(EntityType::Criteria, id))
    }

    /// Newest first.
    pub async fn list_criteria(
        &self,
        team_id: &str,
        limit: u32,
    ) -> Result<Vec<Criterion>, DatabaseError> {
        let conn = self.db().read().await;
        let rows = conn
            .query(
                &format!(
                    "SELECT {CRITERIA_COLS} FROM criteria WHERE team_id = ?1
                     ORDER BY created_at DESC, rowid DESC LIMIT {limit}"
                ),
                [team_id],
            )
            .await?;
        collect(rows).await
    }

    pub async fn list_criteria_by_ids(
        &self,
        team_id: &str,
        ids: &[String],
    ) -> Result<Vec<Criterion>, DatabaseError> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        let mut params: Vec<libsql::Value> = vec![team_id.into()];
        params.extend(ids.iter().map(|id| libsql::Value::from(id.as_str())));
        let conn = self.db().read().await;
        let rows = conn
            .query(
                &format!(
                    "SELECT {CRITERIA_COLS} FROM criteria WHERE team_id = ?1 AND id IN ({})
                     ORDER BY created_at DESC, rowid DESC",
                    placeholders(2, ids.len())
                ),
                libsql::params_from_iter(params),
            )
            .await?;
        collect(rows).await
    }

    /// Criteria of one decision, by `order` (unordered last), then age.
    pub async fn list_criteria_for_decision(
        &self,
        team_id: &str,
        decision_id: &str,
    ) -> Result<Vec<Criterion>, DatabaseError> {
        let conn = self.db().read().await;
        let rows = conn
            .query(
                &format!(
                    r#"SELECT {CRITERIA_COLS} FROM criteria WHERE team_id = ?1 AND decision_id = ?2
                       ORDER BY "order" IS NULL, "order", created_at"#
                ),
                libsql::params![team_id, decision_id],
            )
            .await?;
        collect(rows).await
    }

    /// # Errors
    ///
    /// `NotFound` when the criterion is not in the actor's team or not owned
    /// by the actor; `InvalidArgument` for a non-finite weight.
    pub async fn update_criterion(
        &self,
        actor: &Actor,
        id: &str,
        update: CriterionUpdate,
    ) -> Result<Criterion, DatabaseError> {
        let mut sets = SetClauses::new();
        if let Some(ref title) = update.title {
            sets.push("title", title.as_str());
        }
        if let Some(ref description) = update.description {
            sets.push("description", description.as_deref());
        }
        if let Some(weight) = update.weight {
            ensure_finite_weight(weight)?;
            sets.push("weight", weight);
        }
        if let Some(order) = update.order {
            sets.push("\"order\"", order);
        }

        let now = Utc::now();
        let detail = to_json(&update)?;

        let tx = self.db().begin_write().await?;
        let result: Result<Criterion, DatabaseError> = async {
            if sets.apply_owned(&tx, TABLE, actor, id, now).await? == 0 {
                return Err(DatabaseError::not_found(EntityType::Criteria, id));
            }
            let criterion = fetch_criterion(&tx, &actor.team_id, id)
                .await?
                .ok_or_else(|| DatabaseError::not_found(EntityType::Criteria, id))?;
            self.record_audit(
                &tx,
                actor,
                EntityType::Criteria,
                id,
                AuditAction::Updated,
                Some(detail.clone()),
            )
            .await?;
            Ok(criterion)
        }
        .await;
        let criterion = tx.finish(result).await?;

        debug!(team_id = %actor.team_id, id, "updated criterion");
        self.record_trail(actor, TrailOp::Update, EntityType::Criteria, id, detail);
        Ok(criterion)
    }

    /// # Errors
    ///
    /// `NotFound` when the criterion is not in the actor's team or not owned by the actor.
    pub async fn delete_criterion(&self, actor: &Actor, id: &str) -> Result<(), DatabaseError> {
        let tx = self.db().begin_write().await?;
        let result: Result<(), DatabaseError> = async {
            if delete_owned(&tx, TABLE, actor, id).await? == 0 {
                return Err(DatabaseError::not_found(EntityType::Criteria, id));
            }
            self.record_audit(&tx, actor, EntityType::Criteria, id, AuditAction::Deleted, None)
                .await?;
            Ok(())
        }
        .await;
        tx.finish(result).await?;

        debug!(team_id = %actor.team_id, id, "deleted criterion");
        self.record_trail(actor, TrailOp::Delete, EntityType::Criteria, id, json!({}));
        Ok(())
    }
}
