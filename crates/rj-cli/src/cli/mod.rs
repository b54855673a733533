use clap::Parser;

pub mod global;
pub mod root_commands;
pub mod shell;
pub mod subcommands;

pub use global::{GlobalFlags, OutputFormat};
pub use root_commands::Commands;

/// Top-level CLI parser for the `rj` binary.
#[derive(Debug, Parser)]
#[command(name = "rj", version, about = "RoleJuggler - one task at a time, across every job")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Output format: json, table, raw
    #[arg(short, long, global = true, default_value = "json")]
    pub format: OutputFormat,

    /// Quiet mode (errors only)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Verbose mode (debug logging)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Workspace seed file (overrides general.seed_path)
    #[arg(short, long, global = true)]
    pub seed: Option<String>,
}

impl Cli {
    /// Extract ergonomic global flags struct for command handlers.
    #[must_use]
    pub fn global_flags(&self) -> GlobalFlags {
        GlobalFlags {
            format: self.format,
            quiet: self.quiet,
            seed: self.seed.clone(),
        }
    }
}
