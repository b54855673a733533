//! Partial task updates.

use chrono::{DateTime, Utc};
use rj_core::entities::{Task, WorkSession};
use rj_core::enums::TaskStatus;
use serde::Serialize;

/// Fields a caller asks the store to change. `None` leaves the field alone.
///
/// `total_time_spent_ms` is an absolute value, not a delta: the tracker's local
/// view is authoritative for timing and sends the total it computed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct TaskUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<TaskStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_time_spent_ms: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_worked_on: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub append_work_session: Option<WorkSession>,
}

impl TaskUpdate {
    #[must_use]
    pub fn builder() -> TaskUpdateBuilder {
        TaskUpdateBuilder::new()
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.status.is_none()
            && self.total_time_spent_ms.is_none()
            && self.last_worked_on.is_none()
            && self.append_work_session.is_none()
    }

    /// Write the requested fields into `task`.
    pub fn apply_to(&self, task: &mut Task) {
        if let Some(status) = self.status {
            task.status = status;
        }
        if let Some(total) = self.total_time_spent_ms {
            task.total_time_spent_ms = total;
        }
        if let Some(at) = self.last_worked_on {
            task.last_worked_on = Some(at);
        }
        if let Some(ref session) = self.append_work_session {
            task.work_sessions.push(session.clone());
        }
    }
}

#[derive(Debug, Default)]
pub struct TaskUpdateBuilder(TaskUpdate);

impl TaskUpdateBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self(TaskUpdate::default())
    }

    #[must_use]
    pub const fn status(mut self, status: TaskStatus) -> Self {
        self.0.status = Some(status);
        self
    }

    #[must_use]
    pub const fn total_time_spent_ms(mut self, total: u64) -> Self {
        self.0.total_time_spent_ms = Some(total);
        self
    }

    #[must_use]
    pub const fn last_worked_on(mut self, at: DateTime<Utc>) -> Self {
        self.0.last_worked_on = Some(at);
        self
    }

    #[must_use]
    pub fn append_work_session(mut self, session: WorkSession) -> Self {
        self.0.append_work_session = Some(session);
        self
    }

    #[must_use]
    pub fn build(self) -> TaskUpdate {
        self.0
    }
}
