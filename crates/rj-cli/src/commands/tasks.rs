use std::io::Write;

use rj_core::entities::Task;
use rj_core::enums::TaskStatus;
use serde::Serialize;

use crate::cli::subcommands::TaskCommands;
use crate::cli::{GlobalFlags, OutputFormat};
use crate::commands::shared::duration::format_ms;
use crate::commands::shared::parse::parse_enum;
use crate::context::AppContext;
use crate::output::write_to;

/// One line of the task table.
#[derive(Debug, Serialize)]
struct TaskRow {
    id: String,
    title: String,
    status: TaskStatus,
    priority: String,
    company: String,
    time_spent: String,
    sessions: usize,
}

/// Handle `rj tasks`.
pub fn handle(action: &TaskCommands, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    match action {
        TaskCommands::List { status } => {
            let status = status
                .as_deref()
                .map(|raw| parse_enum::<TaskStatus>(raw, "status"))
                .transpose()?;
            let tasks = ctx
                .tasks()
                .into_iter()
                .filter(|task| status.is_none_or(|s| task.status == s))
                .collect::<Vec<_>>();
            write_tasks(&mut std::io::stdout().lock(), ctx, &tasks, flags.format)
        }
    }
}

/// Full records for JSON output, a condensed row per task for tables.
pub fn write_tasks<W: Write>(
    writer: &mut W,
    ctx: &AppContext,
    tasks: &[Task],
    format: OutputFormat,
) -> anyhow::Result<()> {
    if format != OutputFormat::Table {
        return write_to(writer, &tasks, format);
    }
    let rows = tasks
        .iter()
        .map(|task| TaskRow {
            id: task.id.clone(),
            title: task.title.clone(),
            status: task.status,
            priority: task.priority.to_string(),
            company: task
                .job_id
                .as_deref()
                .and_then(|job_id| ctx.seed.job(job_id))
                .map_or_else(|| String::from("-"), |job| job.company.clone()),
            time_spent: format_ms(task.total_time_spent_ms),
            sessions: task.work_sessions.len(),
        })
        .collect::<Vec<_>>();
    write_to(writer, &rows, format)
}
