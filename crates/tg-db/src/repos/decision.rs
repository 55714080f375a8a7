//! Decision repository: CRUD, tree reads, move and reorder.

use chrono::Utc;
use serde::Serialize;
use serde_json::json;
use tracing::{debug, info};

use tg_core::audit_detail::{MovedDetail, ReorderedDetail, SiblingOrder};
use tg_core::entities::Decision;
use tg_core::enums::{AuditAction, EntityType, TrailOp};
use tg_core::identity::Actor;
use tg_core::ids::PREFIX_DECISION;
use tg_core::path;

use crate::error::DatabaseError;
use crate::helpers::{
    ensure_finite_order, get_opt_string, json_text, opt_json_text, parse_datetime,
    parse_optional_datetime, parse_optional_json, parse_string_list, placeholders, to_json,
};
use crate::hierarchy::{self, DecisionTreeStore, LibsqlTreeStore};
use crate::repos::{SetClauses, delete_owned, owned_by};
use crate::service::ThinkgraphService;
use crate::updates::decision::{DecisionUpdate, NewDecision};

const TABLE: &str = "decisions";

/// Result of [`ThinkgraphService::reorder_decisions`].
#[derive(Debug, Clone, Serialize)]
pub struct ReorderOutcome {
    /// Decisions whose order was applied, as written.
    pub updated: Vec<Decision>,
    /// Requested ids not found in the team, in request order.
    pub skipped: Vec<String>,
}

const DECISION_COLS: &str = r#"id, team_id, owner, parent_id, path, depth, "order", title, description, status, position, due_date, priority, outcome, created_by, updated_by, created_at, updated_at"#;

fn row_to_decision(row: &libsql::Row) -> Result<Decision, DatabaseError> {
    let id = row.get::<String>(0)?;
    let node_path = row.get::<String>(4)?;
    let depth = row.get::<i64>(5)?;
    // The path ends in the row's own id and has one segment per level.
    if path::last_segment(&node_path) != Some(id.as_str()) || path::depth_of(&node_path) != depth {
        return Err(DatabaseError::InvalidState(format!(
            "decision {id} has path {node_path} at depth {depth}"
        )));
    }
    Ok(Decision {
        id,
        team_id: row.get::<String>(1)?,
        owner: row.get::<String>(2)?,
        parent_id: get_opt_string(row, 3)?,
        path: node_path,
        depth,
        order: row.get::<f64>(6)?,
        title: row.get::<String>(7)?,
        description: get_opt_string(row, 8)?,
        status: parse_string_list(get_opt_string(row, 9)?.as_deref())?,
        position: parse_optional_json(get_opt_string(row, 10)?.as_deref())?
            .unwrap_or_else(|| json!({})),
        due_date: parse_optional_datetime(get_opt_string(row, 11)?.as_deref())?,
        priority: parse_string_list(get_opt_string(row, 12)?.as_deref())?,
        outcome: get_opt_string(row, 13)?,
        created_by: row.get::<String>(14)?,
        updated_by: row.get::<String>(15)?,
        created_at: parse_datetime(&row.get::<String>(16)?)?,
        updated_at: parse_datetime(&row.get::<String>(17)?)?,
    })
}

async fn collect(mut rows: libsql::Rows) -> Result<Vec<Decision>, DatabaseError> {
    let mut decisions = Vec::new();
    while let Some(row) = rows.next().await? {
        decisions.push(row_to_decision(&row)?);
    }
    Ok(decisions)
}

/// Decision `id` in `team_id`, read on `conn`.
async fn fetch_decision(
    conn: &libsql::Connection,
    team_id: &str,
    id: &str,
) -> Result<Option<Decision>, DatabaseError> {
    let mut rows = conn
        .query(
            &format!("SELECT {DECISION_COLS} FROM decisions WHERE id = ?1 AND team_id = ?2"),
            libsql::params![id, team_id],
        )
        .await?;
    rows.next().await?.map(|row| row_to_decision(&row)).transpose()
}

async fn stamp_updated_by(
    conn: &libsql::Connection,
    actor: &Actor,
    id: &str,
) -> Result<(), DatabaseError> {
    conn.execute(
        "UPDATE decisions SET updated_by = ?1 WHERE id = ?2 AND team_id = ?3",
        libsql::params![actor.user_id.as_str(), id, actor.team_id.as_str()],
    )
    .await?;
    Ok(())
}

impl ThinkgraphService {
    /// Create a decision positioned as a root or under `new.parent_id`.
    ///
    /// # Errors
    ///
    /// `InvalidArgument` if the parent is not in the actor's team or the
    /// order is not finite.
    pub async fn create_decision(
        &self,
        actor: &Actor,
        new: NewDecision,
    ) -> Result<Decision, DatabaseError> {
        let order = new.order.unwrap_or(0.0);
        ensure_finite_order(order)?;

        let now = Utc::now();
        let id = self.db().generate_id(PREFIX_DECISION).await?;

        let tx = self.db().begin_write().await?;
        let result: Result<Decision, DatabaseError> = async {
            let (parent_id, path, depth) = match new.parent_id {
                Some(parent_id) => {
                    let parent = LibsqlTreeStore::new(&tx)
                        .find_by_id(&actor.team_id, &parent_id)
                        .await?
                        .ok_or_else(|| {
                            DatabaseError::InvalidArgument(format!(
                                "parent decision {parent_id} not found"
                            ))
                        })?;
                    let path = path::child_path(&parent.path, &id);
                    (Some(parent_id), path, parent.depth + 1)
                }
                None => (None, path::root_path(&id), 0),
            };

            let decision = Decision {
                id: id.clone(),
                team_id: actor.team_id.clone(),
                owner: actor.user_id.clone(),
                parent_id,
                path,
                depth,
                order,
                title: new.title,
                description: new.description,
                status: new.status,
                position: new.position.unwrap_or_else(|| json!({})),
                due_date: new.due_date,
                priority: new.priority,
                outcome: new.outcome,
                created_by: actor.user_id.clone(),
                updated_by: actor.user_id.clone(),
                created_at: now,
                updated_at: now,
            };

            tx.execute(
                &format!(
                    "INSERT INTO decisions ({DECISION_COLS})
                     VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14, ?15, ?16, ?17, ?18)"
                ),
                libsql::params![
                    decision.id.as_str(),
                    decision.team_id.as_str(),
                    decision.owner.as_str(),
                    decision.parent_id.as_deref(),
                    decision.path.as_str(),
                    decision.depth,
                    decision.order,
                    decision.title.as_str(),
                    decision.description.as_deref(),
                    opt_json_text(decision.status.as_ref())?,
                    json_text(&decision.position)?,
                    decision.due_date.map(|d| d.to_rfc3339()),
                    opt_json_text(decision.priority.as_ref())?,
                    decision.outcome.as_deref(),
                    decision.created_by.as_str(),
                    decision.updated_by.as_str(),
                    now.to_rfc3339(),
                    now.to_rfc3339()
                ],
            )
            .await?;

            self.record_audit(&tx, actor, EntityType::Decision, &id, AuditAction::Created, None)
                .await?;
            Ok(decision)
        }
        .await;
        let decision = tx.finish(result).await?;

        debug!(team_id = %actor.team_id, id = %decision.id, path = %decision.path, "created decision");
        self.record_trail(
            actor,
            TrailOp::Create,
            EntityType::Decision,
            &decision.id,
            to_json(&decision)?,
        );
        Ok(decision)
    }

    /// # Errors
    ///
    /// `NotFound` when `id` does not exist in `team_id`.
    pub async fn get_decision(&self, team_id: &str, id: &str) -> Result<Decision, DatabaseError> {
        fetch_decision(&*self.db().read().await, team_id, id)
            .await?
            .ok_or_else(|| DatabaseError::not_found(EntityType::Decision, id))
    }

    /// Newest first.
    pub async fn list_decisions(
        &self,
        team_id: &str,
        limit: u32,
    ) -> Result<Vec<Decision>, DatabaseError> {
        let conn = self.db().read().await;
        let rows = conn
            .query(
                &format!(
                    "SELECT {DECISION_COLS} FROM decisions WHERE team_id = ?1
                     ORDER BY created_at DESC, rowid DESC LIMIT {limit}"
                ),
                [team_id],
            )
            .await?;
        collect(rows).await
    }

    /// Decisions of `team_id` among `ids`; ids from other teams are ignored.
    pub async fn list_decisions_by_ids(
        &self,
        team_id: &str,
        ids: &[String],
    ) -> Result<Vec<Decision>, DatabaseError> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        let mut params: Vec<libsql::Value> = vec![team_id.into()];
        params.extend(ids.iter().map(|id| libsql::Value::from(id.as_str())));
        let conn = self.db().read().await;
        let rows = conn
            .query(
                &format!(
                    "SELECT {DECISION_COLS} FROM decisions
                     WHERE team_id = ?1 AND id IN ({})
                     ORDER BY created_at DESC, rowid DESC",
                    placeholders(2, ids.len())
                ),
                libsql::params_from_iter(params),
            )
            .await?;
        collect(rows).await
    }

    /// Every decision of the team, parents before their descendants.
    pub async fn decision_tree(&self, team_id: &str) -> Result<Vec<Decision>, DatabaseError> {
        let conn = self.db().read().await;
        let rows = conn
            .query(
                &format!(
                    r#"SELECT {DECISION_COLS} FROM decisions WHERE team_id = ?1 ORDER BY path, "order""#
                ),
                [team_id],
            )
            .await?;
        collect(rows).await
    }

    /// Direct children of `parent_id`, or the roots when `None`, by `order`.
    pub async fn decision_children(
        &self,
        team_id: &str,
        parent_id: Option<&str>,
    ) -> Result<Vec<Decision>, DatabaseError> {
        let conn = self.db().read().await;
        let rows = match parent_id {
            Some(parent_id) => {
                conn.query(
                    &format!(
                        r#"SELECT {DECISION_COLS} FROM decisions
                           WHERE team_id = ?1 AND parent_id = ?2 ORDER BY "order", created_at"#
                    ),
                    libsql::params![team_id, parent_id],
                )
                .await?
            }
            None => {
                conn.query(
                    &format!(
                        r#"SELECT {DECISION_COLS} FROM decisions
                           WHERE team_id = ?1 AND parent_id IS NULL ORDER BY "order", created_at"#
                    ),
                    [team_id],
                )
                .await?
            }
        };
        collect(rows).await
    }

    /// The decision `id` followed by all of its descendants, by path.
    ///
    /// # Errors
    ///
    /// `NotFound` when `id` does not exist in `team_id`.
    pub async fn decision_subtree(
        &self,
        team_id: &str,
        id: &str,
    ) -> Result<Vec<Decision>, DatabaseError> {
        let conn = self.db().read().await;
        let root = fetch_decision(&conn, team_id, id)
            .await?
            .ok_or_else(|| DatabaseError::not_found(EntityType::Decision, id))?;
        let rows = conn
            .query(
                &format!(
                    r#"SELECT {DECISION_COLS} FROM decisions
                       WHERE team_id = ?1 AND substr(path, 1, length(?2)) = ?2
                       ORDER BY path, "order""#
                ),
                libsql::params![team_id, root.path.as_str()],
            )
            .await?;
        collect(rows).await
    }

    /// Update payload fields of a decision the actor owns.
    ///
    /// # Errors
    ///
    /// `NotFound` when the decision is not in the actor's team or not owned
    /// by the actor.
    pub async fn update_decision(
        &self,
        actor: &Actor,
        id: &str,
        update: DecisionUpdate,
    ) -> Result<Decision, DatabaseError> {
        let mut sets = SetClauses::new();
        if let Some(ref title) = update.title {
            sets.push("title", title.as_str());
        }
        if let Some(ref description) = update.description {
            sets.push("description", description.as_deref());
        }
        if let Some(ref status) = update.status {
            sets.push("status", opt_json_text(status.as_ref())?);
        }
        if let Some(ref position) = update.position {
            sets.push("position", json_text(position)?);
        }
        if let Some(due_date) = update.due_date {
            sets.push("due_date", due_date.map(|d| d.to_rfc3339()));
        }
        if let Some(ref priority) = update.priority {
            sets.push("priority", opt_json_text(priority.as_ref())?);
        }
        if let Some(ref outcome) = update.outcome {
            sets.push("outcome", outcome.as_deref());
        }

        let now = Utc::now();
        let detail = to_json(&update)?;

        let tx = self.db().begin_write().await?;
        let result: Result<Decision, DatabaseError> = async {
            if sets.apply_owned(&tx, TABLE, actor, id, now).await? == 0 {
                return Err(DatabaseError::not_found(EntityType::Decision, id));
            }
            let decision = fetch_decision(&tx, &actor.team_id, id)
                .await?
                .ok_or_else(|| DatabaseError::not_found(EntityType::Decision, id))?;
            self.record_audit(
                &tx,
                actor,
                EntityType::Decision,
                id,
                AuditAction::Updated,
                Some(detail.clone()),
            )
            .await?;
            Ok(decision)
        }
        .await;
        let decision = tx.finish(result).await?;

        debug!(team_id = %actor.team_id, id, "updated decision");
        self.record_trail(actor, TrailOp::Update, EntityType::Decision, id, detail);
        Ok(decision)
    }

    /// Delete a childless decision the actor owns.
    ///
    /// # Errors
    ///
    /// `NotFound` when the decision is not in the actor's team or not owned
    /// by the actor; `InvalidArgument` while it still has child decisions.
    pub async fn delete_decision(&self, actor: &Actor, id: &str) -> Result<(), DatabaseError> {
        let tx = self.db().begin_write().await?;
        let result: Result<(), DatabaseError> = async {
            if !owned_by(&tx, TABLE, actor, id).await? {
                return Err(DatabaseError::not_found(EntityType::Decision, id));
            }
            let mut rows = tx
                .query(
                    "SELECT COUNT(*) FROM decisions WHERE team_id = ?1 AND parent_id = ?2",
                    libsql::params![actor.team_id.as_str(), id],
                )
                .await?;
            let children = match rows.next().await? {
                Some(row) => row.get::<i64>(0)?,
                None => 0,
            };
            if children > 0 {
                return Err(DatabaseError::InvalidArgument(format!(
                    "decision {id} still has {children} child decision(s); move or delete them first"
                )));
            }
            delete_owned(&tx, TABLE, actor, id).await?;
            self.record_audit(&tx, actor, EntityType::Decision, id, AuditAction::Deleted, None)
                .await?;
            Ok(())
        }
        .await;
        tx.finish(result).await?;

        debug!(team_id = %actor.team_id, id, "deleted decision");
        self.record_trail(actor, TrailOp::Delete, EntityType::Decision, id, json!({}));
        Ok(())
    }

    /// Re-parent decision `id` under `parent_id` (root when `None`) at `order`,
    /// rewriting the whole subtree in one transaction.
    ///
    /// Returns the moved decision as written.
    ///
    /// # Errors
    ///
    /// `NotFound` when the decision is not in the actor's team;
    /// `InvalidArgument` for a non-finite order, a missing parent, or a
    /// parent inside the decision's own subtree. Nothing is written on error.
    pub async fn move_decision(
        &self,
        actor: &Actor,
        id: &str,
        parent_id: Option<&str>,
        order: f64,
    ) -> Result<Decision, DatabaseError> {
        let tx = self.db().begin_write().await?;
        let result: Result<(Decision, MovedDetail), DatabaseError> = async {
            let store = LibsqlTreeStore::new(&tx);
            let report = hierarchy::move_node(&store, &actor.team_id, id, parent_id, order).await?;
            stamp_updated_by(&tx, actor, id).await?;

            let detail = MovedDetail {
                from_parent: report.from_parent,
                to_parent: report.node.parent_id.clone(),
                from_path: report.from_path,
                to_path: report.node.path.clone(),
                order,
                descendants: report.descendants,
            };
            self.record_audit(
                &tx,
                actor,
                EntityType::Decision,
                id,
                AuditAction::Moved,
                Some(to_json(&detail)?),
            )
            .await?;

            let decision = fetch_decision(&tx, &actor.team_id, id)
                .await?
                .ok_or_else(|| DatabaseError::not_found(EntityType::Decision, id))?;
            Ok((decision, detail))
        }
        .await;
        let (decision, detail) = tx.finish(result).await?;

        info!(
            team_id = %actor.team_id,
            id,
            from = %detail.from_path,
            to = %detail.to_path,
            descendants = detail.descendants,
            "moved decision"
        );
        self.record_trail(
            actor,
            TrailOp::Move,
            EntityType::Decision,
            id,
            to_json(&detail)?,
        );
        Ok(decision)
    }

    /// Set the sibling `order` of each listed decision. Unknown ids are
    /// skipped and reported in [`ReorderOutcome::skipped`].
    ///
    /// # Errors
    ///
    /// `InvalidArgument` if any order is non-finite; nothing is written then.
    pub async fn reorder_decisions(
        &self,
        actor: &Actor,
        updates: &[SiblingOrder],
    ) -> Result<ReorderOutcome, DatabaseError> {
        let tx = self.db().begin_write().await?;
        let result: Result<(Vec<Decision>, ReorderedDetail), DatabaseError> = async {
            let store = LibsqlTreeStore::new(&tx);
            let report = hierarchy::reorder_siblings(&store, &actor.team_id, updates).await?;

            let mut decisions = Vec::with_capacity(report.updated.len());
            for node in &report.updated {
                stamp_updated_by(&tx, actor, &node.id).await?;
                self.record_audit(
                    &tx,
                    actor,
                    EntityType::Decision,
                    &node.id,
                    AuditAction::Reordered,
                    Some(json!({ "order": node.order })),
                )
                .await?;
                let decision = fetch_decision(&tx, &actor.team_id, &node.id)
                    .await?
                    .ok_or_else(|| DatabaseError::not_found(EntityType::Decision, &node.id))?;
                decisions.push(decision);
            }

            let detail = ReorderedDetail {
                applied: report
                    .updated
                    .iter()
                    .map(|n| SiblingOrder {
                        id: n.id.clone(),
                        order: n.order,
                    })
                    .collect(),
                skipped: report.skipped,
            };
            Ok((decisions, detail))
        }
        .await;
        let (decisions, detail) = tx.finish(result).await?;

        debug!(
            team_id = %actor.team_id,
            applied = detail.applied.len(),
            skipped = detail.skipped.len(),
            "reordered decisions"
        );
        if !detail.applied.is_empty() {
            self.record_trail(
                actor,
                TrailOp::Reorder,
                EntityType::Decision,
                "",
                to_json(&detail)?,
            );
        }
        Ok(ReorderOutcome {
            updated: decisions,
            skipped: detail.skipped,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::helpers::{alice, alice_elsewhere, bob, test_service};
    use crate::test_support::memory_store::FailingStore;
    use crate::updates::decision::DecisionUpdateBuilder;
    use pretty_assertions::assert_eq;

    #[tokio::test]
    async fn create_root_and_child_positions() {
        let svc = test_service().await;
        let root = svc
            .create_decision(&alice(), NewDecision::titled("Storage engine"))
            .await
            .unwrap();
        assert!(root.id.starts_with("dec-"));
        assert_eq!(root.path, format!("/{}/", root.id));
        assert_eq!(root.depth, 0);
        assert_eq!(root.order, 0.0);
        assert_eq!(root.owner, "usr-alice");
        assert_eq!(root.position, json!({}));

        let child = svc
            .create_decision(&alice(), NewDecision::titled("Index format").under(&root.id).at(1.5))
            .await
            .unwrap();
        assert_eq!(child.parent_id.as_deref(), Some(root.id.as_str()));
        assert_eq!(child.path, format!("/{}/{}/", root.id, child.id));
        assert_eq!(child.depth, 1);
        assert_eq!(child.order, 1.5);

        let fetched = svc.get_decision("team-1", &child.id).await.unwrap();
        assert_eq!(fetched, child);
    }

    #[tokio::test]
    async fn create_under_missing_or_foreign_parent_fails() {
        let svc = test_service().await;
        let foreign = svc
            .create_decision(&alice_elsewhere(), NewDecision::titled("Elsewhere"))
            .await
            .unwrap();

        for parent in ["dec-missing0", foreign.id.as_str()] {
            let err = svc
                .create_decision(&alice(), NewDecision::titled("Orphan").under(parent))
                .await
                .unwrap_err();
            assert!(matches!(err, DatabaseError::InvalidArgument(_)), "{err}");
        }
        assert!(svc.list_decisions("team-1", 10).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn payload_roundtrips_through_columns() {
        let svc = test_service().await;
        let due = Utc::now();
        let new = NewDecision {
            status: Some(vec!["open".into(), "blocked".into()]),
            position: Some(json!({ "x": 10, "y": 20 })),
            due_date: Some(due),
            priority: Some(vec!["high".into()]),
            outcome: Some("pending".into()),
            description: Some("long text".into()),
            ..NewDecision::titled("Full")
        };
        let created = svc.create_decision(&alice(), new).await.unwrap();
        let fetched = svc.get_decision("team-1", &created.id).await.unwrap();

        assert_eq!(fetched.status, Some(vec!["open".to_string(), "blocked".to_string()]));
        assert_eq!(fetched.position, json!({ "x": 10, "y": 20 }));
        assert_eq!(fetched.priority, Some(vec!["high".to_string()]));
        assert_eq!(fetched.outcome.as_deref(), Some("pending"));
        assert_eq!(fetched.due_date.map(|d| d.timestamp()), Some(due.timestamp()));
    }

    #[tokio::test]
    async fn get_is_team_scoped() {
        let svc = test_service().await;
        let d = svc
            .create_decision(&alice(), NewDecision::titled("Mine"))
            .await
            .unwrap();
        let err = svc.get_decision("team-2", &d.id).await.unwrap_err();
        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn list_newest_first_and_by_ids() {
        let svc = test_service().await;
        let a = svc.create_decision(&alice(), NewDecision::titled("A")).await.unwrap();
        let b = svc.create_decision(&alice(), NewDecision::titled("B")).await.unwrap();
        let other = svc
            .create_decision(&alice_elsewhere(), NewDecision::titled("X"))
            .await
            .unwrap();

        let listed = svc.list_decisions("team-1", 10).await.unwrap();
        assert_eq!(
            listed.iter().map(|d| d.id.as_str()).collect::<Vec<_>>(),
            vec![b.id.as_str(), a.id.as_str()]
        );
        assert_eq!(svc.list_decisions("team-1", 1).await.unwrap().len(), 1);

        let by_ids = svc
            .list_decisions_by_ids("team-1", &[a.id.clone(), other.id.clone()])
            .await
            .unwrap();
        assert_eq!(by_ids.len(), 1);
        assert_eq!(by_ids[0].id, a.id);
        assert!(svc.list_decisions_by_ids("team-1", &[]).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn update_is_owner_scoped_and_keeps_position() {
        let svc = test_service().await;
        let d = svc
            .create_decision(&alice(), NewDecision::titled("Draft").at(2.0))
            .await
            .unwrap();

        let update = DecisionUpdateBuilder::new()
            .title("Final")
            .outcome(Some("chosen".into()))
            .build();
        let err = svc.update_decision(&bob(), &d.id, update.clone()).await.unwrap_err();
        assert!(err.is_not_found());

        let updated = svc.update_decision(&alice(), &d.id, update).await.unwrap();
        assert_eq!(updated.title, "Final");
        assert_eq!(updated.outcome.as_deref(), Some("chosen"));
        assert_eq!(updated.path, d.path);
        assert_eq!(updated.order, 2.0);
        assert!(updated.updated_at >= d.updated_at);

        let cleared = svc
            .update_decision(&alice(), &d.id, DecisionUpdateBuilder::new().outcome(None).build())
            .await
            .unwrap();
        assert_eq!(cleared.outcome, None);
    }

    #[tokio::test]
    async fn delete_refuses_parents_and_foreign_owners() {
        let svc = test_service().await;
        let root = svc.create_decision(&alice(), NewDecision::titled("Root")).await.unwrap();
        let child = svc
            .create_decision(&alice(), NewDecision::titled("Child").under(&root.id))
            .await
            .unwrap();

        let err = svc.delete_decision(&alice(), &root.id).await.unwrap_err();
        assert!(matches!(err, DatabaseError::InvalidArgument(_)));

        let err = svc.delete_decision(&bob(), &child.id).await.unwrap_err();
        assert!(err.is_not_found());

        svc.delete_decision(&alice(), &child.id).await.unwrap();
        svc.delete_decision(&alice(), &root.id).await.unwrap();
        assert!(svc.decision_tree("team-1").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn tree_children_and_subtree_reads() {
        let svc = test_service().await;
        let a = svc.create_decision(&alice(), NewDecision::titled("A")).await.unwrap();
        let b2 = svc
            .create_decision(&alice(), NewDecision::titled("B2").under(&a.id).at(2.0))
            .await
            .unwrap();
        let b1 = svc
            .create_decision(&alice(), NewDecision::titled("B1").under(&a.id).at(1.0))
            .await
            .unwrap();
        let c = svc
            .create_decision(&alice(), NewDecision::titled("C").under(&b1.id))
            .await
            .unwrap();
        let z = svc.create_decision(&alice(), NewDecision::titled("Z").at(5.0)).await.unwrap();

        let children = svc.decision_children("team-1", Some(&a.id)).await.unwrap();
        assert_eq!(
            children.iter().map(|d| d.id.as_str()).collect::<Vec<_>>(),
            vec![b1.id.as_str(), b2.id.as_str()]
        );

        let roots = svc.decision_children("team-1", None).await.unwrap();
        assert_eq!(
            roots.iter().map(|d| d.id.as_str()).collect::<Vec<_>>(),
            vec![a.id.as_str(), z.id.as_str()]
        );

        let subtree = svc.decision_subtree("team-1", &b1.id).await.unwrap();
        assert_eq!(
            subtree.iter().map(|d| d.id.as_str()).collect::<Vec<_>>(),
            vec![b1.id.as_str(), c.id.as_str()]
        );

        let tree = svc.decision_tree("team-1").await.unwrap();
        assert_eq!(tree.len(), 5);
        for d in &tree {
            if let Some(ref pid) = d.parent_id {
                let parent_pos = tree.iter().position(|p| &p.id == pid).unwrap();
                let own_pos = tree.iter().position(|p| p.id == d.id).unwrap();
                assert!(parent_pos < own_pos, "parent listed after child");
            }
        }
    }

    #[tokio::test]
    async fn move_stamps_actor_and_returns_new_position() {
        let svc = test_service().await;
        let a = svc.create_decision(&alice(), NewDecision::titled("A")).await.unwrap();
        let b = svc.create_decision(&alice(), NewDecision::titled("B")).await.unwrap();

        let moved = svc.move_decision(&bob(), &b.id, Some(&a.id), 3.0).await.unwrap();
        assert_eq!(moved.parent_id.as_deref(), Some(a.id.as_str()));
        assert_eq!(moved.path, format!("/{}/{}/", a.id, b.id));
        assert_eq!(moved.depth, 1);
        assert_eq!(moved.order, 3.0);
        assert_eq!(moved.updated_by, "usr-bob");
        assert_eq!(moved.owner, "usr-alice");
    }

    #[tokio::test]
    async fn failed_cascade_rolls_back_whole_move() {
        let svc = test_service().await;
        let a = svc.create_decision(&alice(), NewDecision::titled("A")).await.unwrap();
        let b = svc
            .create_decision(&alice(), NewDecision::titled("B").under(&a.id))
            .await
            .unwrap();
        let c = svc
            .create_decision(&alice(), NewDecision::titled("C").under(&b.id))
            .await
            .unwrap();
        let d = svc
            .create_decision(&alice(), NewDecision::titled("D").under(&c.id))
            .await
            .unwrap();
        let before = svc.decision_tree("team-1").await.unwrap();

        let tx = svc.db().begin_write().await.unwrap();
        // Node write succeeds, first descendant succeeds, second fails.
        let store = FailingStore::new(LibsqlTreeStore::new(&tx), 3);
        let result = hierarchy::move_node(&store, "team-1", &b.id, None, 0.0).await;
        assert!(result.is_err());
        assert!(tx.finish(result).await.is_err());

        assert_eq!(svc.decision_tree("team-1").await.unwrap(), before);
        assert_eq!(svc.get_decision("team-1", &d.id).await.unwrap().depth, 3);
    }

    #[tokio::test]
    async fn readers_wait_for_an_open_move() {
        use std::time::Duration;

        let svc = test_service().await;
        let a = svc.create_decision(&alice(), NewDecision::titled("A")).await.unwrap();
        let b = svc
            .create_decision(&alice(), NewDecision::titled("B").under(&a.id))
            .await
            .unwrap();
        let c = svc
            .create_decision(&alice(), NewDecision::titled("C").under(&b.id))
            .await
            .unwrap();

        let tx = svc.db().begin_write().await.unwrap();
        let store = LibsqlTreeStore::new(&tx);
        hierarchy::move_node(&store, "team-1", &b.id, None, 0.0)
            .await
            .unwrap();

        // The move is written but not committed: reads must not get through.
        let blocked = tokio::time::timeout(
            Duration::from_millis(50),
            svc.get_decision("team-1", &b.id),
        )
        .await;
        assert!(blocked.is_err());
        let blocked = tokio::time::timeout(
            Duration::from_millis(50),
            svc.decision_subtree("team-1", &a.id),
        )
        .await;
        assert!(blocked.is_err());

        tx.rollback().await.unwrap();

        assert_eq!(svc.get_decision("team-1", &b.id).await.unwrap().path, b.path);
        assert_eq!(svc.get_decision("team-1", &c.id).await.unwrap().path, c.path);
    }

    #[tokio::test]
    async fn inconsistent_stored_path_is_reported() {
        let svc = test_service().await;
        let a = svc.create_decision(&alice(), NewDecision::titled("A")).await.unwrap();
        let b = svc
            .create_decision(&alice(), NewDecision::titled("B").under(&a.id))
            .await
            .unwrap();

        svc.db()
            .conn()
            .execute("UPDATE decisions SET depth = 5 WHERE id = ?1", [b.id.as_str()])
            .await
            .unwrap();

        let err = svc.get_decision("team-1", &b.id).await.unwrap_err();
        assert!(matches!(err, DatabaseError::InvalidState(_)));
        assert_eq!(svc.get_decision("team-1", &a.id).await.unwrap().depth, 0);
    }
}
