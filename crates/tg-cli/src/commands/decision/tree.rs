use crate::cli::GlobalFlags;
use crate::context::AppContext;
use crate::output::output;

pub async fn run_tree(ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let team = ctx.team_id()?;
    let decisions = ctx.service.decision_tree(&team).await?;
    output(&decisions, flags.format)
}

pub async fn run_children(
    parent: Option<&str>,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let team = ctx.team_id()?;
    let decisions = ctx.service.decision_children(&team, parent).await?;
    output(&decisions, flags.format)
}

pub async fn run_subtree(id: &str, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let team = ctx.team_id()?;
    let decisions = ctx.service.decision_subtree(&team, id).await?;
    output(&decisions, flags.format)
}
