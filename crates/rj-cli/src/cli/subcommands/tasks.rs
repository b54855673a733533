use clap::Subcommand;

/// Task commands.
#[derive(Clone, Debug, Subcommand)]
pub enum TaskCommands {
    /// List tasks.
    List {
        /// Only tasks in this column (todo, in-progress, done).
        #[arg(long)]
        status: Option<String>,
    },
}
