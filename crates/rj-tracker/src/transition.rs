use rj_core::entities::{ActiveSession, LastCompleted, PausedSession};
use serde::{Deserialize, Serialize};

/// What a tracker operation changed.
///
/// Local bookkeeping has already happened when this is returned. Store writes
/// that failed are listed in `persistence_failures`; they are not retried.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transition {
    /// Session suspended because another task took over.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub preempted: Option<PausedSession>,
    /// Session suspended by an explicit pause.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub paused: Option<PausedSession>,
    /// Session that became active.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub active: Option<ActiveSession>,
    /// Session that was stopped.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completed: Option<LastCompleted>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub persistence_failures: Vec<PersistenceFailure>,
}

impl Transition {
    /// Nothing changed (e.g. `pause` with no active session).
    #[must_use]
    pub const fn is_noop(&self) -> bool {
        self.preempted.is_none()
            && self.paused.is_none()
            && self.active.is_none()
            && self.completed.is_none()
    }

    /// Every store write for this transition succeeded.
    #[must_use]
    pub fn persisted(&self) -> bool {
        self.persistence_failures.is_empty()
    }
}

/// A store write that failed after the local state had changed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersistenceFailure {
    pub task_id: String,
    pub message: String,
}
