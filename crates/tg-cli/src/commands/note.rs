use serde_json::json;
use tg_core::enums::EntityType;
use tg_db::updates::note::{NewNote, NoteUpdateBuilder};

use crate::cli::GlobalFlags;
use crate::cli::subcommands::NoteCommands;
use crate::commands::shared::limit::effective_limit;
use crate::commands::shared::parse::{non_empty, parse_enum};
use crate::context::AppContext;
use crate::output::output;

/// Handle `tg note`.
pub async fn handle(
    action: &NoteCommands,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    match action {
        NoteCommands::Create {
            entity_type,
            entity_id,
            content,
            note_type,
        } => {
            let actor = ctx.actor()?;
            let new = NewNote {
                entity_type: parse_enum::<EntityType>(entity_type, "entity-type")?,
                entity_id: entity_id.clone(),
                content: content.clone(),
                note_type: non_empty(note_type),
            };
            output(&ctx.service.create_note(&actor, new).await?, flags.format)
        }
        NoteCommands::Get { id } => {
            let team = ctx.team_id()?;
            output(&ctx.service.get_note(&team, id).await?, flags.format)
        }
        NoteCommands::List {
            entity_type,
            entity_id,
            ids,
        } => {
            let team = ctx.team_id()?;
            let notes = match (entity_type, entity_id) {
                (Some(entity_type), Some(entity_id)) => {
                    let entity_type = parse_enum::<EntityType>(entity_type, "entity-type")?;
                    ctx.service
                        .list_notes_for_entity(&team, entity_type, entity_id)
                        .await?
                }
                _ if !ids.is_empty() => ctx.service.list_notes_by_ids(&team, ids).await?,
                _ => {
                    let limit = effective_limit(None, flags.limit, ctx.default_limit());
                    ctx.service.list_notes(&team, limit).await?
                }
            };
            output(&notes, flags.format)
        }
        NoteCommands::Update {
            id,
            content,
            note_type,
        } => {
            if content.is_none() && note_type.is_empty() {
                anyhow::bail!("At least one of --content or --type must be provided");
            }
            let actor = ctx.actor()?;
            let mut builder = NoteUpdateBuilder::new();
            if let Some(content) = content {
                builder = builder.content(content);
            }
            if !note_type.is_empty() {
                builder = builder.note_type(Some(note_type.clone()));
            }
            let note = ctx.service.update_note(&actor, id, builder.build()).await?;
            output(&note, flags.format)
        }
        NoteCommands::Delete { id } => {
            let actor = ctx.actor()?;
            ctx.service.delete_note(&actor, id).await?;
            output(&json!({ "deleted": id }), flags.format)
        }
    }
}
