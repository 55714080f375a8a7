use crate::cli::{Commands, GlobalFlags};
use crate::commands;
use crate::context::AppContext;

/// Route a parsed command to its handler.
pub async fn dispatch(
    command: Commands,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    match command {
        Commands::Decision { action } => commands::decision::handle(&action, ctx, flags).await,
        Commands::Option { action } => commands::option::handle(&action, ctx, flags).await,
        Commands::Criteria { action } => commands::criteria::handle(&action, ctx, flags).await,
        Commands::Evaluation { action } => {
            commands::evaluation::handle(&action, ctx, flags).await
        }
        Commands::Note { action } => commands::note::handle(&action, ctx, flags).await,
        Commands::Audit(args) => commands::audit::handle(&args, ctx, flags).await,
        Commands::Init(_) => unreachable!("init is pre-dispatched in main"),
    }
}
