use clap::Subcommand;

/// Insight commands.
#[derive(Clone, Debug, Subcommand)]
pub enum InsightCommands {
    /// Cached insight for a task, generating it on first use.
    Get { id: String },
    /// Generate a new insight, ignoring the cache.
    Refresh { id: String },
}
