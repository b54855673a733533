use chrono::{DateTime, NaiveDate, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::entities::InsightPayload;
use crate::enums::{Priority, TaskStatus};

/// A unit of work for one job. Time fields are owned by the session tracker.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct Task {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub job_id: Option<String>,
    #[serde(default)]
    pub status: TaskStatus,
    #[serde(default)]
    pub priority: Priority,
    #[serde(default)]
    pub deadline: Option<NaiveDate>,
    /// Cumulative booked time in milliseconds. Never decreases.
    #[serde(default)]
    pub total_time_spent_ms: u64,
    #[serde(default)]
    pub last_worked_on: Option<DateTime<Utc>>,
    #[serde(default)]
    pub work_sessions: Vec<WorkSession>,
    /// Last insight stored alongside the task, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub insight: Option<InsightPayload>,
}

impl Task {
    /// A `todo` task with no history.
    #[must_use]
    pub fn new(id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            description: None,
            job_id: None,
            status: TaskStatus::Todo,
            priority: Priority::Medium,
            deadline: None,
            total_time_spent_ms: 0,
            last_worked_on: None,
            work_sessions: Vec::new(),
            insight: None,
        }
    }

    #[must_use]
    pub fn with_job(mut self, job_id: impl Into<String>) -> Self {
        self.job_id = Some(job_id.into());
        self
    }

    #[must_use]
    pub const fn with_status(mut self, status: TaskStatus) -> Self {
        self.status = status;
        self
    }
}

/// One completed stretch of tracked work, appended on stop.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct WorkSession {
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub duration_ms: u64,
    #[serde(default)]
    pub notes: String,
}
