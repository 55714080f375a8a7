use serde_json::json;
use tg_db::updates::evaluation::{EvaluationUpdateBuilder, NewEvaluation};

use crate::cli::GlobalFlags;
use crate::cli::subcommands::EvaluationCommands;
use crate::commands::shared::limit::effective_limit;
use crate::context::AppContext;
use crate::output::output;

/// Handle `tg evaluation`.
pub async fn handle(
    action: &EvaluationCommands,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    match action {
        EvaluationCommands::Create {
            decision,
            option,
            criteria,
            score,
            notes,
        } => {
            let actor = ctx.actor()?;
            let new = NewEvaluation {
                decision_id: decision.clone(),
                option_id: option.clone(),
                criteria_id: criteria.clone(),
                score: *score,
                notes: notes.clone(),
            };
            output(&ctx.service.create_evaluation(&actor, new).await?, flags.format)
        }
        EvaluationCommands::Get { id } => {
            let team = ctx.team_id()?;
            output(&ctx.service.get_evaluation(&team, id).await?, flags.format)
        }
        EvaluationCommands::List {
            decision,
            ids,
        } => {
            let team = ctx.team_id()?;
            let evaluations = if let Some(decision) = decision {
                ctx.service
                    .list_evaluations_for_decision(&team, decision)
                    .await?
            } else if !ids.is_empty() {
                ctx.service.list_evaluations_by_ids(&team, ids).await?
            } else {
                let limit = effective_limit(None, flags.limit, ctx.default_limit());
                ctx.service.list_evaluations(&team, limit).await?
            };
            output(&evaluations, flags.format)
        }
        EvaluationCommands::Update { id, score, notes } => {
            if score.is_none() && notes.is_none() {
                anyhow::bail!("At least one of --score or --notes must be provided");
            }
            let actor = ctx.actor()?;
            let mut builder = EvaluationUpdateBuilder::new();
            if let Some(score) = score {
                builder = builder.score(*score);
            }
            if let Some(notes) = notes {
                builder = builder.notes(Some(notes.clone()));
            }
            let evaluation = ctx
                .service
                .update_evaluation(&actor, id, builder.build())
                .await?;
            output(&evaluation, flags.format)
        }
        EvaluationCommands::Delete { id } => {
            let actor = ctx.actor()?;
            ctx.service.delete_evaluation(&actor, id).await?;
            output(&json!({ "deleted": id }), flags.format)
        }
    }
}
