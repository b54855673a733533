use std::fmt;

use rj_store::StoreError;
use thiserror::Error;

/// What an operation was looking for when it came up empty.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Lookup {
    /// `start`: the task itself, locally and in the store.
    Task,
    /// `resume`: a paused session for the task.
    PausedSession,
    /// `stop`: an active or paused session for the task.
    TrackedSession,
}

impl fmt::Display for Lookup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Task => "task",
            Self::PausedSession => "paused session",
            Self::TrackedSession => "active or paused session",
        })
    }
}

#[derive(Debug, Error)]
pub enum TrackerError {
    /// A transition named a task it cannot act on.
    #[error("Not found: {lookup} for task {id}")]
    NotFound { id: String, lookup: Lookup },

    /// Reading the task list failed. Only `load` and `refresh` return this;
    /// transitions report store failures in their [`Transition`](crate::Transition).
    #[error("Task store error: {0}")]
    Store(#[from] StoreError),
}

impl TrackerError {
    pub(crate) fn not_found(id: &str, lookup: Lookup) -> Self {
        Self::NotFound {
            id: id.to_string(),
            lookup,
        }
    }
}
