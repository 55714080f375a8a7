use crate::cli::GlobalFlags;
use crate::commands::shared::limit::effective_limit;
use crate::context::AppContext;
use crate::output::output;

pub async fn run(
    ids: &[String],
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let team = ctx.team_id()?;
    let decisions = if ids.is_empty() {
        let limit = effective_limit(None, flags.limit, ctx.default_limit());
        ctx.service.list_decisions(&team, limit).await?
    } else {
        ctx.service.list_decisions_by_ids(&team, ids).await?
    };
    output(&decisions, flags.format)
}
