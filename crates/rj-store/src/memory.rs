//! In-process task store.

use std::sync::{Mutex, MutexGuard, PoisonError};

use async_trait::async_trait;
use rj_core::entities::{InsightPayload, Task};

use crate::{StoreError, TaskStore, TaskUpdate};

#[derive(Debug, Default)]
struct Inner {
    tasks: Vec<Task>,
    /// Successful updates, in arrival order.
    log: Vec<(String, TaskUpdate)>,
    fail_next: usize,
    offline: bool,
}

/// A [`TaskStore`] holding tasks in memory, in insertion order.
///
/// Failure injection (`fail_next_updates`, `set_offline`) lets callers exercise
/// the "store write failed" paths without a real backend.
#[derive(Debug, Default)]
pub struct MemoryTaskStore {
    inner: Mutex<Inner>,
}

impl MemoryTaskStore {
    #[must_use]
    pub fn new(tasks: Vec<Task>) -> Self {
        Self {
            inner: Mutex::new(Inner {
                tasks,
                ..Inner::default()
            }),
        }
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Insert a task, replacing any task with the same id.
    pub fn insert(&self, task: Task) {
        let mut inner = self.lock();
        if let Some(existing) = inner.tasks.iter_mut().find(|t| t.id == task.id) {
            *existing = task;
        } else {
            inner.tasks.push(task);
        }
    }

    /// Current copy of one task.
    #[must_use]
    pub fn snapshot(&self, task_id: &str) -> Option<Task> {
        self.lock().tasks.iter().find(|t| t.id == task_id).cloned()
    }

    /// Store an insight alongside a task. Returns `false` for unknown ids.
    pub fn set_insight(&self, task_id: &str, insight: InsightPayload) -> bool {
        let mut inner = self.lock();
        match inner.tasks.iter_mut().find(|t| t.id == task_id) {
            Some(task) => {
                task.insight = Some(insight);
                true
            }
            None => false,
        }
    }

    /// Make the next `n` calls to `update` fail with [`StoreError::Unavailable`].
    pub fn fail_next_updates(&self, n: usize) {
        self.lock().fail_next = n;
    }

    /// While offline, every call fails with [`StoreError::Unavailable`].
    pub fn set_offline(&self, offline: bool) {
        self.lock().offline = offline;
    }

    /// Updates that were applied, in the order they arrived.
    #[must_use]
    pub fn update_log(&self) -> Vec<(String, TaskUpdate)> {
        self.lock().log.clone()
    }
}

#[async_trait]
impl TaskStore for MemoryTaskStore {
    async fn list(&self) -> Result<Vec<Task>, StoreError> {
        let inner = self.lock();
        if inner.offline {
            return Err(StoreError::Unavailable("store is offline".into()));
        }
        Ok(inner.tasks.clone())
    }

    async fn update(&self, task_id: &str, update: TaskUpdate) -> Result<Task, StoreError> {
        let mut inner = self.lock();
        if inner.offline {
            return Err(StoreError::Unavailable("store is offline".into()));
        }
        if inner.fail_next > 0 {
            inner.fail_next -= 1;
            return Err(StoreError::Unavailable("injected update failure".into()));
        }

        let task = inner
            .tasks
            .iter_mut()
            .find(|t| t.id == task_id)
            .ok_or_else(|| StoreError::NotFound {
                id: task_id.to_string(),
            })?;

        if let Some(total) = update.total_time_spent_ms {
            if total < task.total_time_spent_ms {
                return Err(StoreError::Rejected(format!(
                    "total_time_spent_ms would decrease from {} to {total}",
                    task.total_time_spent_ms
                )));
            }
        }

        update.apply_to(task);
        let stored = task.clone();
        tracing::debug!(task_id, "memory store applied update");
        inner.log.push((task_id.to_string(), update));
        Ok(stored)
    }
}
