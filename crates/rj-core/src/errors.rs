//! Cross-cutting error types for RoleJuggler.
//!
//! Domain-specific errors (`StoreError`, `TrackerError`, `GenerationError`) are
//! defined in their respective crates. The binary converges them through `anyhow`.

use thiserror::Error;

/// Errors that can be raised by any RoleJuggler crate.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Entity lookup returned no result.
    #[error("Entity not found: {entity_type} {id}")]
    NotFound { entity_type: String, id: String },

    /// Data failed validation (schema, format, constraints).
    #[error("Validation error: {0}")]
    Validation(String),

    /// Catch-all for unexpected errors.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl CoreError {
    /// Shorthand for a missing task.
    #[must_use]
    pub fn task_not_found(id: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: "task".to_string(),
            id: id.into(),
        }
    }
}
