use std::io::Write;
use std::ops::ControlFlow;

use rj_core::enums::StopPolicy;
use serde_json::json;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader};

use crate::cli::shell::{ShellCommand, ShellLine};
use crate::cli::{GlobalFlags, OutputFormat};
use crate::commands::tasks::write_tasks;
use crate::context::AppContext;
use crate::output::write_to;

/// Handle `rj shell`: one command per stdin line until `quit` or EOF.
pub async fn handle(ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let stdin = BufReader::new(tokio::io::stdin());
    run(ctx, flags.format, stdin, &mut std::io::stdout()).await
}

/// Drive the shell over any line source. A failing command prints its error
/// and the shell keeps going.
pub async fn run<R, W>(
    ctx: &AppContext,
    format: OutputFormat,
    reader: R,
    out: &mut W,
) -> anyhow::Result<()>
where
    R: AsyncBufRead + Unpin,
    W: Write,
{
    let mut lines = reader.lines();
    while let Some(line) = lines.next_line().await? {
        let command = match ShellLine::parse_line(&line) {
            Ok(Some(command)) => command,
            Ok(None) => continue,
            Err(error) => {
                write!(out, "{}", error.render())?;
                continue;
            }
        };
        match execute(ctx, command, format, out).await {
            Ok(ControlFlow::Continue(())) => {}
            Ok(ControlFlow::Break(())) => break,
            Err(error) => writeln!(out, "error: {error:#}")?,
        }
        out.flush()?;
    }
    Ok(())
}

async fn execute<W: Write>(
    ctx: &AppContext,
    command: ShellCommand,
    format: OutputFormat,
    out: &mut W,
) -> anyhow::Result<ControlFlow<()>> {
    match command {
        ShellCommand::Start { id } => write_to(out, &ctx.start_task(&id).await?, format)?,
        ShellCommand::Pause => write_to(out, &ctx.pause_current().await, format)?,
        ShellCommand::Resume { id } => write_to(out, &ctx.resume_task(&id).await?, format)?,
        ShellCommand::Stop {
            id,
            keep_status,
            done,
        } => {
            let policy = if keep_status {
                Some(StopPolicy::KeepStatus)
            } else if done {
                Some(StopPolicy::MarkDone)
            } else {
                None
            };
            write_to(out, &ctx.stop_task(&id, policy).await?, format)?;
        }
        ShellCommand::Notes { text } => {
            let updated = ctx.set_session_notes(&text.join(" "));
            write_to(out, &json!({ "updated": updated }), format)?;
        }
        ShellCommand::Status => write_to(out, &ctx.status(), format)?,
        ShellCommand::Current => write_to(out, &ctx.current_session(), format)?,
        ShellCommand::Paused => write_to(out, &ctx.paused_sessions(), format)?,
        ShellCommand::Last => write_to(out, &ctx.last_completed(), format)?,
        ShellCommand::Cached { id } => write_to(out, &ctx.insight_snapshot(&id), format)?,
        ShellCommand::Tasks => write_tasks(out, ctx, &ctx.tasks(), format)?,
        ShellCommand::Insights { id } => write_to(out, &ctx.get_insights(&id).await?, format)?,
        ShellCommand::Refresh { id } => {
            write_to(out, &ctx.refresh_insights(&id).await?, format)?;
        }
        ShellCommand::Quit => return Ok(ControlFlow::Break(())),
    }
    Ok(ControlFlow::Continue(()))
}
