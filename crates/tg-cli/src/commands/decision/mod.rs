mod create;
mod delete;
mod get;
mod list;
mod move_to;
mod reorder;
mod tree;
mod update;

use crate::cli::GlobalFlags;
use crate::cli::subcommands::DecisionCommands;
use crate::context::AppContext;

/// Handle `tg decision`.
pub async fn handle(
    action: &DecisionCommands,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    match action {
        DecisionCommands::Create {
            title,
            parent,
            order,
            description,
            status,
            priority,
            due,
            outcome,
            position,
        } => {
            create::run(
                create::CreateArgs {
                    title,
                    parent: parent.as_deref(),
                    order: *order,
                    description: description.as_deref(),
                    status,
                    priority,
                    due: due.as_deref(),
                    outcome: outcome.as_deref(),
                    position: position.as_deref(),
                },
                ctx,
                flags,
            )
            .await
        }
        DecisionCommands::Get { id } => get::run(id, ctx, flags).await,
        DecisionCommands::List { ids } => list::run(ids, ctx, flags).await,
        DecisionCommands::Update {
            id,
            title,
            description,
            status,
            priority,
            due,
            outcome,
            position,
        } => {
            update::run(
                id,
                update::UpdateArgs {
                    title: title.as_deref(),
                    description: description.as_deref(),
                    status,
                    priority,
                    due: due.as_deref(),
                    outcome: outcome.as_deref(),
                    position: position.as_deref(),
                },
                ctx,
                flags,
            )
            .await
        }
        DecisionCommands::Delete { id } => delete::run(id, ctx, flags).await,
        DecisionCommands::Move {
            id,
            parent,
            root,
            order,
        } => {
            let parent = if *root { None } else { parent.as_deref() };
            move_to::run(id, parent, *order, ctx, flags).await
        }
        DecisionCommands::Reorder { pairs } => reorder::run(pairs, ctx, flags).await,
        DecisionCommands::Tree => tree::run_tree(ctx, flags).await,
        DecisionCommands::Children { parent } => {
            tree::run_children(parent.as_deref(), ctx, flags).await
        }
        DecisionCommands::Subtree { id } => tree::run_subtree(id, ctx, flags).await,
    }
}
