use tg_core::audit_detail::SiblingOrder;

use crate::cli::GlobalFlags;
use crate::context::AppContext;
use crate::output::output;

pub async fn run(pairs: &[SiblingOrder], ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let actor = ctx.actor()?;
    let outcome = ctx.service.reorder_decisions(&actor, pairs).await?;
    output(&outcome, flags.format)
}
