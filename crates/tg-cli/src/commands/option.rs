use serde_json::json;
use tg_db::updates::option::{NewOption, OptionUpdateBuilder};

use crate::cli::GlobalFlags;
use crate::cli::subcommands::OptionCommands;
use crate::commands::shared::limit::effective_limit;
use crate::commands::shared::parse::non_empty;
use crate::context::AppContext;
use crate::output::output;

/// Handle `tg option`.
pub async fn handle(
    action: &OptionCommands,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    match action {
        OptionCommands::Create {
            decision,
            title,
            description,
            pros,
            cons,
            order,
        } => {
            let actor = ctx.actor()?;
            let new = NewOption {
                description: description.clone(),
                pros: non_empty(pros),
                cons: non_empty(cons),
                order: *order,
                ..NewOption::new(decision, title)
            };
            output(&ctx.service.create_option(&actor, new).await?, flags.format)
        }
        OptionCommands::Get { id } => {
            let team = ctx.team_id()?;
            output(&ctx.service.get_option(&team, id).await?, flags.format)
        }
        OptionCommands::List {
            decision,
            ids,
        } => {
            let team = ctx.team_id()?;
            let options = if let Some(decision) = decision {
                ctx.service.list_options_for_decision(&team, decision).await?
            } else if !ids.is_empty() {
                ctx.service.list_options_by_ids(&team, ids).await?
            } else {
                let limit = effective_limit(None, flags.limit, ctx.default_limit());
                ctx.service.list_options(&team, limit).await?
            };
            output(&options, flags.format)
        }
        OptionCommands::Update {
            id,
            title,
            description,
            pros,
            cons,
            order,
        } => {
            if title.is_none()
                && description.is_none()
                && pros.is_empty()
                && cons.is_empty()
                && order.is_none()
            {
                anyhow::bail!(
                    "At least one of --title, --description, --pro, --con, or --order must be provided"
                );
            }
            let actor = ctx.actor()?;
            let mut builder = OptionUpdateBuilder::new();
            if let Some(title) = title {
                builder = builder.title(title);
            }
            if let Some(description) = description {
                builder = builder.description(Some(description.clone()));
            }
            if !pros.is_empty() {
                builder = builder.pros(Some(pros.clone()));
            }
            if !cons.is_empty() {
                builder = builder.cons(Some(cons.clone()));
            }
            if let Some(order) = order {
                builder = builder.order(Some(*order));
            }
            let option = ctx.service.update_option(&actor, id, builder.build()).await?;
            output(&option, flags.format)
        }
        OptionCommands::Delete { id } => {
            let actor = ctx.actor()?;
            ctx.service.delete_option(&actor, id).await?;
            output(&json!({ "deleted": id }), flags.format)
        }
    }
}
