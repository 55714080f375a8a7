use serde_json::json;
use tg_db::updates::criteria::{CriterionUpdateBuilder, NewCriterion};

use crate::cli::GlobalFlags;
use crate::cli::subcommands::CriteriaCommands;
use crate::commands::shared::limit::effective_limit;
use crate::context::AppContext;
use crate::output::output;

/// Handle `tg criteria`.
pub async fn handle(
    action: &CriteriaCommands,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    match action {
        CriteriaCommands::Create {
            decision,
            title,
            description,
            weight,
            order,
        } => {
            let actor = ctx.actor()?;
            let new = NewCriterion {
                description: description.clone(),
                weight: *weight,
                order: *order,
                ..NewCriterion::new(decision, title)
            };
            output(&ctx.service.create_criterion(&actor, new).await?, flags.format)
        }
        CriteriaCommands::Get { id } => {
            let team = ctx.team_id()?;
            output(&ctx.service.get_criterion(&team, id).await?, flags.format)
        }
        CriteriaCommands::List {
            decision,
            ids,
        } => {
            let team = ctx.team_id()?;
            let criteria = if let Some(decision) = decision {
                ctx.service.list_criteria_for_decision(&team, decision).await?
            } else if !ids.is_empty() {
                ctx.service.list_criteria_by_ids(&team, ids).await?
            } else {
                let limit = effective_limit(None, flags.limit, ctx.default_limit());
                ctx.service.list_criteria(&team, limit).await?
            };
            output(&criteria, flags.format)
        }
        CriteriaCommands::Update {
            id,
            title,
            description,
            weight,
            order,
        } => {
            if title.is_none() && description.is_none() && weight.is_none() && order.is_none() {
                anyhow::bail!(
                    "At least one of --title, --description, --weight, or --order must be provided"
                );
            }
            let actor = ctx.actor()?;
            let mut builder = CriterionUpdateBuilder::new();
            if let Some(title) = title {
                builder = builder.title(title);
            }
            if let Some(description) = description {
                builder = builder.description(Some(description.clone()));
            }
            if let Some(weight) = weight {
                builder = builder.weight(Some(*weight));
            }
            if let Some(order) = order {
                builder = builder.order(Some(*order));
            }
            let criterion = ctx
                .service
                .update_criterion(&actor, id, builder.build())
                .await?;
            output(&criterion, flags.format)
        }
        CriteriaCommands::Delete { id } => {
            let actor = ctx.actor()?;
            ctx.service.delete_criterion(&actor, id).await?;
            output(&json!({ "deleted": id }), flags.format)
        }
    }
}
