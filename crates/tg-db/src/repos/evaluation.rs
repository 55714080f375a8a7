//! Evaluation repository.

use chrono::Utc;
use serde_json::json;
use tracing::debug;

use tg_core::entities::Evaluation;
use tg_core::enums::{AuditAction, EntityType, TrailOp};
use tg_core::identity::Actor;
use tg_core::ids::PREFIX_EVALUATION;

use crate::error::DatabaseError;
use crate::helpers::{get_opt_string, parse_datetime, placeholders, to_json};
use crate::repos::{SetClauses, delete_owned, require_reference};
use crate::service::ThinkgraphService;
use crate::updates::evaluation::{EvaluationUpdate, NewEvaluation};

const TABLE: &str = "evaluations";

const EVALUATION_COLS: &str = "id, team_id, owner, decision_id, option_id, criteria_id, score, notes, created_by, updated_by, created_at, updated_at";

fn row_to_evaluation(row: &libsql::Row) -> Result<Evaluation, DatabaseError> {
    Ok(Evaluation {
        id: row.get::<String>(0)?,
        team_id: row.get::<String>(1)?,
        owner: row.get::<String>(2)?,
        decision_id: row.get::<String>(3)?,
        option_id: row.get::<String>(4)?,
        criteria_id: row.get::<String>(5)?,
        score: row.get::<i64>(6)?,
        notes: get_opt_string(row, 7)?,
        created_by: row.get::<String>(8)?,
        updated_by: row.get::<String>(9)?,
        created_at: parse_datetime(&row.get::<String>(10)?)?,
        updated_at: parse_datetime(&row.get::<String>(11)?)?,
    })
}

async fn collect(mut rows: libsql::Rows) -> Result<Vec<Evaluation>, DatabaseError> {
    let mut evaluations = Vec::new();
    while let Some(row) = rows.next().await? {
        evaluations.push(row_to_evaluation(&row)?);
    }
    Ok(evaluations)
}

async fn fetch_evaluation(
    conn: &libsql::Connection,
    team_id: &str,
    id: &str,
) -> Result<Option<Evaluation>, DatabaseError> {
    let mut rows = conn
        .query(
            &format!("SELECT {EVALUATION_COLS} FROM evaluations WHERE id = ?1 AND team_id = ?2"),
            libsql::params![id, team_id],
        )
        .await?;
    rows.next().await?.map(|row| row_to_evaluation(&row)).transpose()
}

impl ThinkgraphService {
    /// Score one option against one criterion.
    ///
    /// # Errors
    ///
    /// `InvalidArgument` if the decision, option or criterion is not in the
    /// actor's team.
    pub async fn create_evaluation(
        &self,
        actor: &Actor,
        new: NewEvaluation,
    ) -> Result<Evaluation, DatabaseError> {
        let now = Utc::now();
        let id = self.db().generate_id(PREFIX_EVALUATION).await?;
        let evaluation = Evaluation {
            id: id.clone(),
            team_id: actor.team_id.clone(),
            owner: actor.user_id.clone(),
            decision_id: new.decision_id,
            option_id: new.option_id,
            criteria_id: new.criteria_id,
            score: new.score,
            notes: new.notes,
            created_by: actor.user_id.clone(),
            updated_by: actor.user_id.clone(),
            created_at: now,
            updated_at: now,
        };

        let tx = self.db().begin_write().await?;
        let result: Result<(), DatabaseError> = async {
            let team = actor.team_id.as_str();
            require_reference(&tx, "decisions", team, "decision", &evaluation.decision_id).await?;
            require_reference(&tx, "options", team, "option", &evaluation.option_id).await?;
            require_reference(&tx, "criteria", team, "criterion", &evaluation.criteria_id).await?;
            tx.execute(
                &format!(
                    "INSERT INTO evaluations ({EVALUATION_COLS})
                     VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12)"
                ),
                libsql::params![
                    evaluation.id.as_str(),
                    evaluation.team_id.as_str(),
                    evaluation.owner.as_str(),
                    evaluation.decision_id.as_str(),
                    evaluation.option_id.as_str(),
                    evaluation.criteria_id.as_str(),
                    evaluation.score,
                    evaluation.notes.as_deref(),
                    evaluation.created_by.as_str(),
                    evaluation.updated_by.as_str(),
                    now.to_rfc3339(),
                    now.to_rfc3339()
                ],
            )
            .await?;
            self.record_audit(&tx, actor, EntityType::Evaluation, &id, AuditAction::Created, None)
                .await?;
            Ok(())
        }
        .await;
        tx.finish(result).await?;

        debug!(team_id = %actor.team_id, id = %evaluation.id, "created evaluation");
        self.record_trail(
            actor,
            TrailOp::Create,
            EntityType::Evaluation,
            &id,
            to_json(&evaluation)?,
        );
        Ok(evaluation)
    }

    /// # Errors
    ///
    /// `NotFound` when `id` does not exist in `team_id`.
    pub async fn get_evaluation(
        &self,
        team_id: &str,
        id: &str,
    ) -> Result<Evaluation, DatabaseError> {
        fetch_evaluation(&*self.db().read().await, team_id, id)
            .await?
            .ok_or_else(|| DatabaseError::not_found(EntityType::Evaluation, id))
    }

    /// Newest first.
    pub async fn list_evaluations(
        &self,
        team_id: &str,
        limit: u32,
    ) -> Result<Vec<Evaluation>, DatabaseError> {
        let conn = self.db().read().await;
        let rows = conn
            .query(
                &format!(
                    "SELECT {EVALUATION_COLS} FROM evaluations WHERE team_id = ?1
                     ORDER BY created_at DESC, rowid DESC LIMIT {limit}"
                ),
                [team_id],
            )
            .await?;
        collect(rows).await
    }

    pub async fn list_evaluations_by_ids(
        &self,
        team_id: &str,
        ids: &[String],
    ) -> Result<Vec<Evaluation>, DatabaseError> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        let mut params: Vec<libsql::Value> = vec![team_id.into()];
        params.extend(ids.iter().map(|id| libsql::Value::from(id.as_str())));
        let conn = self.db().read().await;
        let rows = conn
            .query(
                &format!(
                    "SELECT {EVALUATION_COLS} FROM evaluations WHERE team_id = ?1 AND id IN ({})
                     ORDER BY created_at DESC, rowid DESC",
                    placeholders(2, ids.len())
                ),
                libsql::params_from_iter(params),
            )
            .await?;
        collect(rows).await
    }

    /// All evaluations of one decision, oldest first.
    pub async fn list_evaluations_for_decision(
        &self,
        team_id: &str,
        decision_id: &str,
    ) -> Result<Vec<Evaluation>, DatabaseError> {
        let conn = self.db().read().await;
        let rows = conn
            .query(
                &format!(
                    "SELECT {EVALUATION_COLS} FROM evaluations WHERE team_id = ?1 AND decision_id = ?2
                     ORDER BY created_at, rowid"
                ),
                libsql::params![team_id, decision_id],
            )
            .await?;
        collect(rows).await
    }

    /// # Errors
    ///
    /// `NotFound` when the evaluation is not in the actor's team or not owned by the actor.
    pub async fn update_evaluation(
        &self,
        actor: &Actor,
        id: &str,
        update: EvaluationUpdate,
    ) -> Result<Evaluation, DatabaseError> {
        let mut sets = SetClauses::new();
        if let Some(score) = update.score {
            sets.push("score", score);
        }
        if let Some(ref notes) = update.notes {
            sets.push("notes", notes.as_deref());
        }

        let now = Utc::now();
        let detail = to_json(&update)?;

        let tx = self.db().begin_write().await?;
        let result: Result<Evaluation, DatabaseError> = async {
            if sets.apply_owned(&tx, TABLE, actor, id, now).await? == 0 {
                return Err(DatabaseError::not_found(EntityType::Evaluation, id));
            }
            let evaluation = fetch_evaluation(&tx, &actor.team_id, id)
                .await?
                .ok_or_else(|| DatabaseError::not_found(EntityType::Evaluation, id))?;
            self.record_audit(
                &tx,
                actor,
                EntityType::Evaluation,
                id,
                AuditAction::Updated,
                Some(detail.clone()),
            )
            .await?;
            Ok(evaluation)
        }
        .await;
        let evaluation = tx.finish(result).await?;

        debug!(team_id = %actor.team_id, id, "updated evaluation");
        self.record_trail(actor, TrailOp::Update, EntityType::Evaluation, id, detail);
        Ok(evaluation)
    }

    /// # Errors
    ///
    /// `NotFound` when the evaluation is not in the actor's team or not owned by the actor.
    pub async fn delete_evaluation(&self, actor: &Actor, id: &str) -> Result<(), DatabaseError> {
        let tx = self.db().begin_write().await?;
        let result: Result<(), DatabaseError> = async {
            if delete_owned(&tx, TABLE, actor, id).await? == 0 {
                return Err(DatabaseError::not_found(EntityType::Evaluation, id));
            }
            self.record_audit(&tx, actor, EntityType::Evaluation, id, AuditAction::Deleted, None)
                .await?;
            Ok(())
        }
        .await;
        tx.finish(result).await?;

        debug!(team_id = %actor.team_id, id, "deleted evaluation");
        self.record_trail(actor, TrailOp::Delete, EntityType::Evaluation, id, json!({}));
        Ok(())
    }
}
