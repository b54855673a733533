use crate::cli::GlobalFlags;
use crate::context::AppContext;
use crate::output::output;

/// Handle `rj summary`.
pub async fn handle(ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let summary = ctx.daily_summary().await;
    output(&summary, flags.format)
}
