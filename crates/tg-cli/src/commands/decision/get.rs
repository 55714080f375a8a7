use serde::Serialize;
use tg_core::entities::{Criterion, Decision, DecisionOption, Evaluation, Note};
use tg_core::enums::EntityType;

use crate::cli::GlobalFlags;
use crate::context::AppContext;
use crate::output::output;

#[derive(Debug, Serialize)]
struct DecisionDetailResponse {
    decision: Decision,
    children: Vec<Decision>,
    options: Vec<DecisionOption>,
    criteria: Vec<Criterion>,
    evaluations: Vec<Evaluation>,
    notes: Vec<Note>,
}

pub async fn run(id: &str, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let team = ctx.team_id()?;
    let decision = ctx.service.get_decision(&team, id).await?;
    let children = ctx.service.decision_children(&team, Some(id)).await?;
    let options = ctx.service.list_options_for_decision(&team, id).await?;
    let criteria = ctx.service.list_criteria_for_decision(&team, id).await?;
    let evaluations = ctx.service.list_evaluations_for_decision(&team, id).await?;
    let notes = ctx
        .service
        .list_notes_for_entity(&team, EntityType::Decision, id)
        .await?;

    output(
        &DecisionDetailResponse {
            decision,
            children,
            options,
            criteria,
            evaluations,
            notes,
        },
        flags.format,
    )
}
