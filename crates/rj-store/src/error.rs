use thiserror::Error;

/// Errors returned by a [`TaskStore`](crate::TaskStore).
#[derive(Debug, Error)]
pub enum StoreError {
    /// The store has no task with this id.
    #[error("Task not found: {id}")]
    NotFound { id: String },

    /// The store refused the update (validation, conflict).
    #[error("Update rejected: {0}")]
    Rejected(String),

    /// The store could not be reached.
    #[error("Store unavailable: {0}")]
    Unavailable(String),

    /// Catch-all for unexpected errors.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}
