use crate::cli::GlobalFlags;
use crate::context::AppContext;
use crate::output::output;

/// `order` was already checked to be finite by the argument parser.
pub async fn run(
    id: &str,
    parent: Option<&str>,
    order: f64,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let actor = ctx.actor()?;
    let decision = ctx.service.move_decision(&actor, id, parent, order).await?;
    output(&decision, flags.format)
}
