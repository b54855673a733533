//! # rj-store
//!
//! The task store seam used by the session tracker and insight lookups.
//!
//! [`TaskStore`] is the contract: list every task, and apply a partial
//! [`TaskUpdate`] to one. [`MemoryTaskStore`] is the in-process implementation
//! backing the CLI and the test suites; [`Seed`] loads a workspace file of
//! jobs, tasks, and notes into it.

mod error;
mod memory;
mod seed;
mod update;

pub use error::StoreError;
pub use memory::MemoryTaskStore;
pub use seed::Seed;
pub use update::{TaskUpdate, TaskUpdateBuilder};

use async_trait::async_trait;
use rj_core::entities::Task;

/// Holder of task records.
///
/// Implementations must apply an update atomically with respect to other
/// updates of the same task.
#[async_trait]
pub trait TaskStore: Send + Sync {
    /// Every task the store knows about.
    async fn list(&self) -> Result<Vec<Task>, StoreError>;

    /// Apply `update` to the task and return the stored result.
    async fn update(&self, task_id: &str, update: TaskUpdate) -> Result<Task, StoreError>;

    /// Fetch one task. The default scans [`list`](Self::list).
    async fn get(&self, task_id: &str) -> Result<Task, StoreError> {
        self.list()
            .await?
            .into_iter()
            .find(|t| t.id == task_id)
            .ok_or_else(|| StoreError::NotFound {
                id: task_id.to_string(),
            })
    }
}
