//! Option repository.

use chrono::Utc;
use serde_json::json;
use tracing::debug;

use tg_core::entities::DecisionOption;
use tg_core::enums::{AuditAction, EntityType, TrailOp};
use tg_core::identity::Actor;
use tg_core::ids::PREFIX_OPTION;

use crate::error::DatabaseError;
use crate::helpers::{
    get_opt_string, opt_json_text, parse_datetime, parse_string_list, placeholders, to_json,
};
use crate::repos::{SetClauses, delete_owned, require_reference};
use crate::service::ThinkgraphService;
use crate::updates::option::{NewOption, OptionUpdate};

const TABLE: &str = "options";

const OPTION_COLS: &str = r#"id, team_id, owner, decision_id, title, description, pros, cons, "order", created_by, updated_by, created_at, updated_at"#;

fn row_to_option(row: &libsql::Row) -> Result<DecisionOption, DatabaseError> {
    Ok(DecisionOption {
        id: row.get::<String>(0)?,
        team_id: row.get::<String>(1)?,
        owner: row.get::<String>(2)?,
        decision_id: row.get::<String>(3)?,
        title: row.get::<String>(4)?,
        description: get_opt_string(row, 5)?,
        pros: parse_string_list(get_opt_string(row, 6)?.as_deref())?,
        cons: parse_string_list(get_opt_string(row, 7)?.as_deref())?,
        order: row.get::<Option<i64>>(8)?,
        created_by: row.get::<String>(9)?,
        updated_by: row.get::<String>(10)?,
        created_at: parse_datetime(&row.get::<String>(11)?)?,
        updated_at: parse_datetime(&row.get::<String>(12)?)?,
    })
}

async fn collect(mut rows: libsql::Rows) -> Result<Vec<DecisionOption>, DatabaseError> {
    let mut options = Vec::new();
    while let Some(row) = rows.next().await? {
        options.push(row_to_option(&row)?);
    }
    Ok(options)
}

async fn fetch_option(
    conn: &libsql::Connection,
    team_id: &str,
    id: &str,
) -> Result<Option<DecisionOption>, DatabaseError> {
    let mut rows = conn
        .query(
            &format!("SELECT {OPTION_COLS} FROM options WHERE id = ?1 AND team_id = ?2"),
            libsql::params![id, team_id],
        )
        .await?;
    rows.next().await?.map(|row| row_to_option(&row)).transpose()
}

impl ThinkgraphService {
    /// # Errors
    ///
    /// `InvalidArgument` if the decision is not in the actor's team.
    pub async fn create_option(
        &self,
        actor: &Actor,
        new: NewOption,
    ) -> Result<DecisionOption, DatabaseError> {
        let now = Utc::now();
        let id = self.db().generate_id(PREFIX_OPTION).await?;
        let option = DecisionOption {
            id: id.clone(),
            team_id: actor.team_id.clone(),
            owner: actor.user_id.clone(),
            decision_id: new.decision_id,
            title: new.title,
            description: new.description,
            pros: new.pros,
            cons: new.cons,
            order: new.order,
            created_by: actor.user_id.clone(),
            updated_by: actor.user_id.clone(),
            created_at: now,
            updated_at: now,
        };

        let tx = self.db().begin_write().await?;
        let result: Result<(), DatabaseError> = async {
            require_reference(&tx, "decisions", &actor.team_id, "decision", &option.decision_id)
                .await?;
            tx.execute(
                &format!(
                    "INSERT INTO options ({OPTION_COLS})
                     VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13)"
                ),
                libsql::params![
                    option.id.as_str(),
                    option.team_id.as_str(),
                    option.owner.as_str(),
                    option.decision_id.as_str(),
                    option.title.as_str(),
                    option.description.as_deref(),
                    opt_json_text(option.pros.as_ref())?,
                    opt_json_text(option.cons.as_ref())?,
                    option.order,
                    option.created_by.as_str(),
                    option.updated_by.as_str(),
                    now.to_rfc3339(),
                    now.to_rfc3339()
                ],
            )
            .await?;
            self.record_audit(&tx, actor, EntityType::Option, &id, AuditAction::Created, None)
                .await?;
            Ok(())
        }
        .await;
        tx.finish(result).await?;

        debug!(team_id = %actor.team_id, id = %option.id, "created option");
        self.record_trail(actor, TrailOp::Create, EntityType::Option, &id, to_json(&option)?);
        Ok(option)
    }

    /// # Errors
    ///
    /// `NotFound` when `id` does not exist in `team_id`.
    pub async fn get_option(
        &self,
        team_id: &str,
        id: &str,
    ) -> Result<DecisionOption, DatabaseError> {
        fetch_option(&*self.db().read().await, team_id, id)
            .await?
            .ok_or_else(|| DatabaseError::not_found(EntityType::Option, id))
    }

    /// Newest first.
    pub async fn list_options(
        &self,
        team_id: &str,
        limit: u32,
    ) -> Result<Vec<DecisionOption>, DatabaseError> {
        let conn = self.db().read().await;
        let rows = conn
            .query(
                &format!(
                    "SELECT {OPTION_COLS} FROM options WHERE team_id = ?1
                     ORDER BY created_at DESC, rowid DESC LIMIT {limit}"
                ),
                [team_id],
            )
            .await?;
        collect(rows).await
    }

    pub async fn list_options_by_ids(
        &self,
        team_id: &str,
        ids: &[String],
    ) -> Result<Vec<DecisionOption>, DatabaseError> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        let mut params: Vec<libsql::Value> = vec![team_id.into()];
        params.extend(ids.iter().map(|id| libsql::Value::from(id.as_str())));
        let conn = self.db().read().await;
        let rows = conn
            .query(
                &format!(
                    "SELECT {OPTION_COLS} FROM options WHERE team_id = ?1 AND id IN ({})
                     ORDER BY created_at DESC, rowid DESC",
                    placeholders(2, ids.len())
                ),
                libsql::params_from_iter(params),
            )
            .await?;
        collect(rows).await
    }

    /// Options of one decision, by `order` (unordered last), then age.
    pub async fn list_options_for_decision(
        &self,
        team_id: &str,
        decision_id: &str,
    ) -> Result<Vec<DecisionOption>, DatabaseError> {
        let conn = self.db().read().await;
        let rows = conn
            .query(
                &format!(
                    r#"SELECT {OPTION_COLS} FROM options WHERE team_id = ?1 AND decision_id = ?2
                       ORDER BY "order" IS NULL, "order", created_at"#
                ),
                libsql::params![team_id, decision_id],
            )
            .await?;
        collect(rows).await
    }

    /// # Errors
    ///
    /// `NotFound` when the option is not in the actor's team or not owned by the actor.
    pub async fn update_option(
        &self,
        actor: &Actor,
        id: &str,
        update: OptionUpdate,
    ) -> Result<DecisionOption, DatabaseError> {
        let mut sets = SetClauses::new();
        if let Some(ref title) = update.title {
            sets.push("title", title.as_str());
        }
        if let Some(ref description) = update.description {
            sets.push("description", description.as_deref());
        }
        if let Some(ref pros) = update.pros {
            sets.push("pros", opt_json_text(pros.as_ref())?);
        }
        if let Some(ref cons) = update.cons {
            sets.push("cons", opt_json_text(cons.as_ref())?);
        }
        if let Some(order) = update.order {
            sets.push("\"order\"", order);
        }

        let now = Utc::now();
        let detail = to_json(&update)?;

        let tx = self.db().begin_write().await?;
        let result: Result<DecisionOption, DatabaseError> = async {
            if sets.apply_owned(&tx, TABLE, actor, id, now).await? == 0 {
                return Err(DatabaseError::not_found(EntityType::Option, id));
            }
            let option = fetch_option(&tx, &actor.team_id, id)
                .await?
                .ok_or_else(|| DatabaseError::not_found(EntityType::Option, id))?;
            self.record_audit(
                &tx,
                actor,
                EntityType::Option,
                id,
                AuditAction::Updated,
                Some(detail.clone()),
            )
            .await?;
            Ok(option)
        }
        .await;
        let option = tx.finish(result).await?;

        debug!(team_id = %actor.team_id, id, "updated option");
        self.record_trail(actor, TrailOp::Update, EntityType::Option, id, detail);
        Ok(option)
    }

    /// # Errors
    ///
    /// `NotFound` when the option is not in the actor's team or not owned by the actor.
    pub async fn delete_option(&self, actor: &Actor, id: &str) -> Result<(), DatabaseError> {
        let tx = self.db().begin_write().await?;
        let result: Result<(), DatabaseError> = async {
            if delete_owned(&tx, TABLE, actor, id).await? == 0 {
                return Err(DatabaseError::not_found(EntityType::Option, id));
            }
            self.record_audit(&tx, actor, EntityType::Option, id, AuditAction::Deleted, None)
                .await?;
            Ok(())
        }
        .await;
        tx.finish(result).await?;

        debug!(team_id = %actor.team_id, id, "deleted option");
        self.record_trail(actor, TrailOp::Delete, EntityType::Option, id, json!({}));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::helpers::{alice, alice_elsewhere, bob, test_service};
    use crate::updates::decision::NewDecision;
    use crate::updates::option::OptionUpdateBuilder;
    use pretty_assertions::assert_eq;

    #[tokio::test]
    async fn create_and_list_for_decision() {
        let svc = test_service().await;
        let d = svc.create_decision(&alice(), NewDecision::titled("Queue")).await.unwrap();

        let nats = svc
            .create_option(
                &alice(),
                NewOption {
                    pros: Some(vec!["small".into()]),
                    order: Some(2),
                    ..NewOption::new(&d.id, "NATS")
                },
            )
            .await
            .unwrap();
        let kafka = svc
            .create_option(
                &alice(),
                NewOption {
                    order: Some(1),
                    ..NewOption::new(&d.id, "Kafka")
                },
            )
            .await
            .unwrap();
        let redis = svc
            .create_option(&alice(), NewOption::new(&d.id, "Redis"))
            .await
            .unwrap();

        assert!(nats.id.starts_with("opt-"));
        let listed = svc.list_options_for_decision("team-1", &d.id).await.unwrap();
        assert_eq!(
            listed.iter().map(|o| o.id.as_str()).collect::<Vec<_>>(),
            vec![kafka.id.as_str(), nats.id.as_str(), redis.id.as_str()]
        );
        assert_eq!(listed[1].pros, Some(vec!["small".to_string()]));
        assert_eq!(svc.get_option("team-1", &redis.id).await.unwrap(), redis);
    }

    #[tokio::test]
    async fn create_requires_decision_in_team() {
        let svc = test_service().await;
        let d = svc
            .create_decision(&alice_elsewhere(), NewDecision::titled("Elsewhere"))
            .await
            .unwrap();
        let err = svc
            .create_option(&alice(), NewOption::new(&d.id, "Nope"))
            .await
            .unwrap_err();
        assert!(matches!(err, DatabaseError::InvalidArgument(_)));
    }

    #[tokio::test]
    async fn update_and_delete_are_owner_scoped() {
        let svc = test_service().await;
        let d = svc.create_decision(&alice(), NewDecision::titled("Queue")).await.unwrap();
        let o = svc
            .create_option(&alice(), NewOption::new(&d.id, "NATS"))
            .await
            .unwrap();

        let update = OptionUpdateBuilder::new()
            .cons(Some(vec!["young".into()]))
            .order(Some(4))
            .build();
        assert!(svc.update_option(&bob(), &o.id, update.clone()).await.unwrap_err().is_not_found());
        let updated = svc.update_option(&alice(), &o.id, update).await.unwrap();
        assert_eq!(updated.cons, Some(vec!["young".to_string()]));
        assert_eq!(updated.order, Some(4));

        assert!(svc.delete_option(&bob(), &o.id).await.unwrap_err().is_not_found());
        svc.delete_option(&alice(), &o.id).await.unwrap();
        assert!(svc.get_option("team-1", &o.id).await.unwrap_err().is_not_found());
        assert!(svc.list_options_by_ids("team-1", &[o.id]).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn list_is_team_scoped() {
        let svc = test_service().await;
        let d = svc.create_decision(&alice(), NewDecision::titled("Queue")).await.unwrap();
        svc.create_option(&alice(), NewOption::new(&d.id, "NATS"))
            .await
            .unwrap();
        assert_eq!(svc.list_options("team-1", 10).await.unwrap().len(), 1);
        assert!(svc.list_options("team-2", 10).await.unwrap().is_empty());
    }
}
