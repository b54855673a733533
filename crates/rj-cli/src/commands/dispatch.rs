use crate::cli::{Commands, GlobalFlags};
use crate::context::AppContext;

/// Route a parsed command to its handler.
pub async fn dispatch(command: Commands, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    match command {
        Commands::Tasks { action } => crate::commands::tasks::handle(&action, ctx, flags),
        Commands::Insights { action } => crate::commands::insights::handle(&action, ctx, flags).await,
        Commands::Summary => crate::commands::summary::handle(ctx, flags).await,
        Commands::Shell => crate::commands::shell::handle(ctx, flags).await,
    }
}
