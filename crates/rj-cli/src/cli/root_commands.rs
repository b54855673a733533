use clap::Subcommand;

use super::subcommands::{InsightCommands, TaskCommands};

#[derive(Clone, Debug, Subcommand)]
pub enum Commands {
    /// Browse workspace tasks.
    Tasks {
        #[command(subcommand)]
        action: TaskCommands,
    },
    /// Task insights (cached, generated on demand).
    Insights {
        #[command(subcommand)]
        action: InsightCommands,
    },
    /// Daily summary of finished and ongoing work.
    Summary,
    /// Interactive session: start, pause, resume, and stop tasks from stdin.
    Shell,
}
