use crate::cli::GlobalFlags;
use crate::cli::subcommands::InsightCommands;
use crate::context::AppContext;
use crate::output::output;

/// Handle `rj insights`.
pub async fn handle(
    action: &InsightCommands,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let response = match action {
        InsightCommands::Get { id } => ctx.get_insights(id).await?,
        InsightCommands::Refresh { id } => ctx.refresh_insights(id).await?,
    };
    if let Some(degraded) = &response.insight.degraded {
        tracing::info!(task_id = %response.task_id, reason = %degraded.reason, "insight is a fallback");
    }
    output(&response, flags.format)
}
