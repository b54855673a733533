//! Grammar of one `rj shell` input line.

use clap::{Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(
    name = "rj>",
    no_binary_name = true,
    disable_version_flag = true,
    help_template = "{subcommands}"
)]
pub struct ShellLine {
    #[command(subcommand)]
    pub command: ShellCommand,
}

#[derive(Clone, Debug, Eq, PartialEq, Subcommand)]
pub enum ShellCommand {
    /// Start tracking a task, pausing whatever is active.
    Start { id: String },
    /// Pause the active session.
    Pause,
    /// Resume a paused task.
    Resume { id: String },
    /// Stop tracking a task.
    Stop {
        id: String,
        /// Leave the task's status unchanged.
        #[arg(long, conflicts_with = "done")]
        keep_status: bool,
        /// Mark the task done.
        #[arg(long)]
        done: bool,
    },
    /// Replace the active session's notes.
    Notes {
        #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
        text: Vec<String>,
    },
    /// Current session, paused sessions, and startable tasks.
    Status,
    /// The active session.
    Current,
    /// Paused sessions, most recent first.
    Paused,
    /// The most recently stopped session.
    Last,
    /// What the insight cache holds for a task, without fetching.
    Cached { id: String },
    /// All tasks with their booked time.
    Tasks,
    /// Insight for a task.
    Insights { id: String },
    /// Regenerate the insight for a task.
    Refresh { id: String },
    /// Leave the shell.
    #[command(alias = "exit")]
    Quit,
}

impl ShellLine {
    /// Parse a whitespace-separated line. `Ok(None)` for blank lines.
    pub fn parse_line(line: &str) -> Result<Option<ShellCommand>, clap::Error> {
        let words: Vec<&str> = line.split_whitespace().collect();
        if words.is_empty() {
            return Ok(None);
        }
        Self::try_parse_from(words).map(|parsed| Some(parsed.command))
    }
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn shell_grammar_is_valid() {
        ShellLine::command().debug_assert();
    }

    #[test]
    fn parses_commands_with_arguments() {
        assert_eq!(
            ShellLine::parse_line("start t1").unwrap(),
            Some(ShellCommand::Start { id: "t1".into() })
        );
        assert_eq!(
            ShellLine::parse_line("  stop t1 --keep-status ").unwrap(),
            Some(ShellCommand::Stop {
                id: "t1".into(),
                keep_status: true,
                done: false,
            })
        );
        assert_eq!(ShellLine::parse_line("exit").unwrap(), Some(ShellCommand::Quit));
        assert_eq!(
            ShellLine::parse_line("cached t2").unwrap(),
            Some(ShellCommand::Cached { id: "t2".into() })
        );
    }

    #[test]
    fn notes_keep_every_word() {
        assert_eq!(
            ShellLine::parse_line("notes drafted intro - see --wiki").unwrap(),
            Some(ShellCommand::Notes {
                text: vec![
                    "drafted".into(),
                    "intro".into(),
                    "-".into(),
                    "see".into(),
                    "--wiki".into()
                ]
            })
        );
    }

    #[test]
    fn blank_and_invalid_lines() {
        assert_eq!(ShellLine::parse_line("   ").unwrap(), None);
        assert!(ShellLine::parse_line("launch t1").is_err());
        assert!(ShellLine::parse_line("resume").is_err());
        assert!(ShellLine::parse_line("stop t1 --keep-status --done").is_err());
    }
}
