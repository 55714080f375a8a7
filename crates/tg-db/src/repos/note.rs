//! Note repository. Notes attach to any non-audit record in the same team.

use chrono::Utc;
use serde_json::json;
use tracing::debug;

use tg_core::entities::Note;
use tg_core::enums::{AuditAction, EntityType, TrailOp};
use tg_core::identity::Actor;
use tg_core::ids::PREFIX_NOTE;

use crate::error::DatabaseError;
use crate::helpers::{
    get_opt_string, opt_json_text, parse_datetime, parse_enum, parse_string_list, placeholders,
    to_json,
};
use crate::repos::{SetClauses, delete_owned, require_reference};
use crate::service::ThinkgraphService;
use crate::updates::note::{NewNote, NoteUpdate};

const TABLE: &str = "notes";

const NOTE_COLS: &str = "id, team_id, owner, entity_type, entity_id, content, type, created_by, updated_by, created_at, updated_at";

fn row_to_note(row: &libsql::Row) -> Result<Note, DatabaseError> {
    Ok(Note {
        id: row.get::<String>(0)?,
        team_id: row.get::<String>(1)?,
        owner: row.get::<String>(2)?,
        entity_type: parse_enum(&row.get::<String>(3)?)?,
        entity_id: row.get::<String>(4)?,
        content: row.get::<String>(5)?,
        note_type: parse_string_list(get_opt_string(row, 6)?.as_deref())?,
        created_by: row.get::<String>(7)?,
        updated_by: row.get::<String>(8)?,
        created_at: parse_datetime(&row.get::<String>(9)?)?,
        updated_at: parse_datetime(&row.get::<String>(10)?)?,
    })
}

async fn collect(mut rows: libsql::Rows) -> Result<Vec<Note>, DatabaseError> {
    let mut notes = Vec::new();
    while let Some(row) = rows.next().await? {
        notes.push(row_to_note(&row)?);
    }
    Ok(notes)
}

async fn fetch_note(
    conn: &libsql::Connection,
    team_id: &str,
    id: &str,
) -> Result<Option<Note>, DatabaseError> {
    let mut rows = conn
        .query(
            &format!("SELECT {NOTE_COLS} FROM notes WHERE id = ?1 AND team_id = ?2"),
            libsql::params![id, team_id],
        )
        .await?;
    rows.next().await?.map(|row| row_to_note(&row)).transpose()
}

impl ThinkgraphService {
    /// # Errors
    ///
    /// `InvalidArgument` when the target is an audit entry or does not exist
    /// in the actor's team.
    pub async fn create_note(&self, actor: &Actor, new: NewNote) -> Result<Note, DatabaseError> {
        if new.entity_type == EntityType::Audit {
            return Err(DatabaseError::InvalidArgument(
                "notes cannot be attached to audit entries".into(),
            ));
        }

        let now = Utc::now();
        let id = self.db().generate_id(PREFIX_NOTE).await?;
        let note = Note {
            id: id.clone(),
            team_id: actor.team_id.clone(),
            owner: actor.user_id.clone(),
            entity_type: new.entity_type,
            entity_id: new.entity_id,
            content: new.content,
            note_type: new.note_type,
            created_by: actor.user_id.clone(),
            updated_by: actor.user_id.clone(),
            created_at: now,
            updated_at: now,
        };

        let tx = self.db().begin_write().await?;
        let result: Result<(), DatabaseError> = async {
            require_reference(
                &tx,
                note.entity_type.table(),
                &actor.team_id,
                note.entity_type.as_str(),
                &note.entity_id,
            )
            .await?;
            tx.execute(
                &format!(
                    "INSERT INTO notes ({NOTE_COLS})
                     VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11)"
                ),
                libsql::params![
                    note.id.as_str(),
                    note.team_id.as_str(),
                    note.owner.as_str(),
                    note.entity_type.as_str(),
                    note.entity_id.as_str(),
                    note.content.as_str(),
                    opt_json_text(note.note_type.as_ref())?,
                    note.created_by.as_str(),
                    note.updated_by.as_str(),
                    now.to_rfc3339(),
                    now.to_rfc3339()
                ],
            )
            .await?;
            self.record_audit(&tx, actor, EntityType::Note, &id, AuditAction::Created, None)
                .await?;
            Ok(())
        }
        .await;
        tx.finish(result).await?;

        debug!(
            team_id = %actor.team_id,
            id = %note.id,
            entity_type = %note.entity_type,
            entity_id = %note.entity_id,
            "created note"
        );
        self.record_trail(actor, TrailOp::Create, EntityType::Note, &id, to_json(&note)?);
        Ok(note)
    }

    /// # Errors
    ///
    /// `NotFound` when `id` does not exist in `team_id`.
    pub async fn get_note(&self, team_id: &str, id: &str) -> Result<Note, DatabaseError> {
        fetch_note(&*self.db().read().await, team_id, id)
            .await?
            .ok_or_else(|| DatabaseError::not_found(EntityType::Note, id))
    }

    /// Newest first.
    pub async fn list_notes(&self, team_id: &str, limit: u32) -> Result<Vec<Note>, DatabaseError> {
        let conn = self.db().read().await;
        let rows = conn
            .query(
                &format!(
                    "SELECT {NOTE_COLS} FROM notes WHERE team_id = ?1
                     ORDER BY created_at DESC, rowid DESC LIMIT {limit}"
                ),
                [team_id],
            )
            .await?;
        collect(rows).await
    }

    pub async fn list_notes_by_ids(
        &self,
        team_id: &str,
        ids: &[String],
    ) -> Result<Vec<Note>, DatabaseError> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        let mut params: Vec<libsql::Value> = vec![team_id.into()];
        params.extend(ids.iter().map(|id| libsql::Value::from(id.as_str())));
        let conn = self.db().read().await;
        let rows = conn
            .query(
                &format!(
                    "SELECT {NOTE_COLS} FROM notes WHERE team_id = ?1 AND id IN ({})
                     ORDER BY created_at DESC, rowid DESC",
                    placeholders(2, ids.len())
                ),
                libsql::params_from_iter(params),
            )
            .await?;
        collect(rows).await
    }

    /// Notes attached to one record, oldest first.
    pub async fn list_notes_for_entity(
        &self,
        team_id: &str,
        entity_type: EntityType,
        entity_id: &str,
    ) -> Result<Vec<Note>, DatabaseError> {
        let conn = self.db().read().await;
        let rows = conn
            .query(
                &format!(
                    "SELECT {NOTE_COLS} FROM notes
                     WHERE team_id = ?1 AND entity_type = ?2 AND entity_id = ?3
                     ORDER BY created_at, rowid"
                ),
                libsql::params![team_id, entity_type.as_str(), entity_id],
            )
            .await?;
        collect(rows).await
    }

    /// # Errors
    ///
    /// `NotFound` when the note is not in the actor's team or not owned by the actor.
    pub async fn update_note(
        &self,
        actor: &Actor,
        id: &str,
        update: NoteUpdate,
    ) -> Result<Note, DatabaseError> {
        let mut sets = SetClauses::new();
        if let Some(ref content) = update.content {
            sets.push("content", content.as_str());
        }
        if let Some(ref note_type) = update.note_type {
            sets.push("type", opt_json_text(note_type.as_ref())?);
        }

        let now = Utc::now();
        let detail = to_json(&update)?;

        let tx = self.db().begin_write().await?;
        let result: Result<Note, DatabaseError> = async {
            if sets.apply_owned(&tx, TABLE, actor, id, now).await? == 0 {
                return Err(DatabaseError::not_found(EntityType::Note, id));
            }
            let note = fetch_note(&tx, &actor.team_id, id)
                .await?
                .ok_or_else(|| DatabaseError::not_found(EntityType::Note, id))?;
            self.record_audit(
                &tx,
                actor,
                EntityType::Note,
                id,
                AuditAction::Updated,
                Some(detail.clone()),
            )
            .await?;
            Ok(note)
        }
        .await;
        let note = tx.finish(result).await?;

        debug!(team_id = %actor.team_id, id, "updated note");
        self.record_trail(actor, TrailOp::Update, EntityType::Note, id, detail);
        Ok(note)
    }

    /// # Errors
    ///
    /// `NotFound` when the note is not in the actor's team or not owned by the actor.
    pub async fn delete_note(&self, actor: &Actor, id: &str) -> Result<(), DatabaseError> {
        let tx = self.db().begin_write().await?;
        let result: Result<(), DatabaseError> = async {
            if delete_owned(&tx, TABLE, actor, id).await? == 0 {
                return Err(DatabaseError::not_found(EntityType::Note, id));
            }
            self.record_audit(&tx, actor, EntityType::Note, id, AuditAction::Deleted, None)
                .await?;
            Ok(())
        }
        .await;
        tx.finish(result).await?;

        debug!(team_id = %actor.team_id, id, "deleted note");
        self.record_trail(actor, TrailOp::Delete, EntityType::Note, id, json!({}));
        Ok(())
    }
}
