//! Status, priority, and policy enums for RoleJuggler.
//!
//! Task-facing enums serialize in the kebab-case form the task backend uses
//! (`in-progress`); internal markers use `snake_case`.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;

// ---------------------------------------------------------------------------
// TaskStatus
// ---------------------------------------------------------------------------

/// Kanban column of a task.
///
/// ```text
/// todo → in-progress → done
/// ```
///
/// Any column may move to any other; the board does not enforce ordering.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "kebab-case")]
pub enum TaskStatus {
    #[default]
    Todo,
    InProgress,
    Done,
}

impl TaskStatus {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Todo => "todo",
            Self::InProgress => "in-progress",
            Self::Done => "done",
        }
    }

    /// Progress estimate used when no generated estimate is available.
    #[must_use]
    pub const fn baseline_progress(self) -> u8 {
        match self {
            Self::Todo => 0,
            Self::InProgress => 50,
            Self::Done => 100,
        }
    }
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Priority
// ---------------------------------------------------------------------------

/// Priority of a task.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "kebab-case")]
pub enum Priority {
    Low,
    #[default]
    Medium,
    High,
}

impl Priority {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// DegradedReason
// ---------------------------------------------------------------------------

/// Why an insight payload is a stand-in rather than a generated analysis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum DegradedReason {
    /// The generator call failed (transport, API, or runtime error).
    GenerationFailed,
    /// The generator answered but no JSON object could be read from it.
    Unparseable,
    /// No generator is configured.
    Unavailable,
}

impl DegradedReason {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::GenerationFailed => "generation_failed",
            Self::Unparseable => "unparseable",
            Self::Unavailable => "unavailable",
        }
    }
}

impl fmt::Display for DegradedReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// StopPolicy
// ---------------------------------------------------------------------------

/// What `stop` does to the task's status besides closing the tracked session.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum StopPolicy {
    /// Leave the status as it is.
    KeepStatus,
    /// Move the task to `done`.
    #[default]
    MarkDone,
}

impl StopPolicy {
    #[must_use]
    pub const fn from_mark_done(mark_done: bool) -> Self {
        if mark_done {
            Self::MarkDone
        } else {
            Self::KeepStatus
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::KeepStatus => "keep_status",
            Self::MarkDone => "mark_done",
        }
    }
}

impl fmt::Display for StopPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn task_status_uses_kebab_case_on_the_wire() {
        let json = serde_json::to_string(&TaskStatus::InProgress).unwrap();
        assert_eq!(json, "\"in-progress\"");
        let parsed: TaskStatus = serde_json::from_str("\"todo\"").unwrap();
        assert_eq!(parsed, TaskStatus::Todo);
    }

    #[test]
    fn display_matches_serde() {
        for status in [TaskStatus::Todo, TaskStatus::InProgress, TaskStatus::Done] {
            let json = serde_json::to_string(&status).unwrap();
            assert_eq!(json.trim_matches('"'), status.to_string());
        }
        for reason in [
            DegradedReason::GenerationFailed,
            DegradedReason::Unparseable,
            DegradedReason::Unavailable,
        ] {
            let json = serde_json::to_string(&reason).unwrap();
            assert_eq!(json.trim_matches('"'), reason.to_string());
        }
    }

    #[test]
    fn baseline_progress_follows_column() {
        assert_eq!(TaskStatus::Todo.baseline_progress(), 0);
        assert_eq!(TaskStatus::InProgress.baseline_progress(), 50);
        assert_eq!(TaskStatus::Done.baseline_progress(), 100);
    }

    #[test]
    fn stop_policy_from_flag() {
        assert_eq!(StopPolicy::from_mark_done(true), StopPolicy::MarkDone);
        assert_eq!(StopPolicy::from_mark_done(false), StopPolicy::KeepStatus);
    }
}
