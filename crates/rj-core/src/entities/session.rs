use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// The single span of work currently accruing time.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct ActiveSession {
    pub task_id: String,
    pub title: String,
    pub job_id: Option<String>,
    pub start_time: DateTime<Utc>,
    pub session_notes: String,
}

/// A suspended span. Its time is already booked on the task.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct PausedSession {
    pub task_id: String,
    pub title: String,
    pub job_id: Option<String>,
    /// Start of the span this entry suspended.
    pub started_at: DateTime<Utc>,
    /// Time accrued in this suspension cycle, in milliseconds.
    pub total_time_ms: u64,
    pub last_paused: DateTime<Utc>,
    pub session_notes: String,
}

/// The most recently stopped session.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct LastCompleted {
    pub task_id: String,
    pub title: String,
    pub job_id: Option<String>,
    pub duration_ms: u64,
    pub completed_at: DateTime<Utc>,
}

/// Read-only view of the tracker at one instant.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct TrackerSnapshot {
    pub current: Option<ActiveSession>,
    /// Elapsed time of the current session, in milliseconds.
    pub current_elapsed_ms: u64,
    /// Most recently paused first.
    pub paused: Vec<PausedSession>,
    pub last_completed: Option<LastCompleted>,
}
