use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use rj_core::clock::Clock;
use rj_core::entities::{ActiveSession, LastCompleted, PausedSession, Task, TrackerSnapshot};
use rj_core::enums::StopPolicy;
use rj_store::TaskStore;

use crate::state::{PendingWrite, TrackerState};
use crate::{PersistenceFailure, TrackerError, Transition};

/// Owner of the single active session, the paused set, and the last stop.
///
/// Operations are serialized: each one runs its bookkeeping and then its store
/// writes before the next operation begins, so writes reach the store in
/// transition order. Observers (`snapshot`, `task`, ...) never wait on the
/// store.
pub struct SessionTracker {
    store: Arc<dyn TaskStore>,
    clock: Arc<dyn Clock>,
    state: Mutex<TrackerState>,
    op_gate: tokio::sync::Mutex<()>,
}

impl std::fmt::Debug for SessionTracker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionTracker")
            .field("clock", &self.clock)
            .field("state", &self.state)
            .finish_non_exhaustive()
    }
}

impl SessionTracker {
    /// Build a tracker over an already-known task list.
    pub fn new(store: Arc<dyn TaskStore>, clock: Arc<dyn Clock>, tasks: Vec<Task>) -> Self {
        Self {
            store,
            clock,
            state: Mutex::new(TrackerState::new(tasks)),
            op_gate: tokio::sync::Mutex::new(()),
        }
    }

    /// Build a tracker whose local view is the store's current task list.
    ///
    /// # Errors
    ///
    /// Returns [`TrackerError::Store`] if the store cannot list tasks.
    pub async fn load(
        store: Arc<dyn TaskStore>,
        clock: Arc<dyn Clock>,
    ) -> Result<Self, TrackerError> {
        let tasks = store.list().await?;
        tracing::debug!(count = tasks.len(), "tracker loaded tasks");
        Ok(Self::new(store, clock, tasks))
    }

    fn state(&self) -> MutexGuard<'_, TrackerState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Start tracking a task. Any active session is preempted first.
    ///
    /// A task unknown to the local view triggers one [`refresh`](Self::refresh)
    /// before the lookup fails.
    ///
    /// # Errors
    ///
    /// Returns [`TrackerError::NotFound`] if the task is unknown after refreshing.
    pub async fn start(&self, task_id: &str) -> Result<Transition, TrackerError> {
        let _gate = self.op_gate.lock().await;

        if self.state().task(task_id).is_none() {
            if let Err(error) = self.reload().await {
                tracing::warn!(task_id, %error, "refresh before start failed");
            }
        }

        let mut writes = Vec::new();
        let transition = {
            let now = self.clock.now();
            self.state().start(task_id, now, &mut writes)?
        };
        Ok(self.persist(transition, writes).await)
    }

    /// Suspend the active session. Does nothing if none is active.
    pub async fn pause(&self) -> Transition {
        let _gate = self.op_gate.lock().await;

        let mut writes = Vec::new();
        let transition = {
            let now = self.clock.now();
            self.state().pause(now, &mut writes)
        };
        self.persist(transition, writes).await
    }

    /// Reactivate a paused task, preempting any other active session.
    ///
    /// # Errors
    ///
    /// Returns [`TrackerError::NotFound`] if the task has no paused session.
    pub async fn resume(&self, task_id: &str) -> Result<Transition, TrackerError> {
        let _gate = self.op_gate.lock().await;

        let mut writes = Vec::new();
        let transition = {
            let now = self.clock.now();
            self.state().resume(task_id, now, &mut writes)?
        };
        Ok(self.persist(transition, writes).await)
    }

    /// Stop tracking a task that is active or paused.
    ///
    /// # Errors
    ///
    /// Returns [`TrackerError::NotFound`] if the task is neither.
    pub async fn stop(
        &self,
        task_id: &str,
        policy: StopPolicy,
    ) -> Result<Transition, TrackerError> {
        let _gate = self.op_gate.lock().await;

        let mut writes = Vec::new();
        let transition = {
            let now = self.clock.now();
            self.state().stop(task_id, policy, now, &mut writes)?
        };
        Ok(self.persist(transition, writes).await)
    }

    /// Replace the active session's notes. Returns `false` if nothing is active.
    pub fn set_session_notes(&self, notes: impl Into<String>) -> bool {
        self.state().set_session_notes(notes.into())
    }

    /// Re-read the store and reconcile the local view.
    ///
    /// # Errors
    ///
    /// Returns [`TrackerError::Store`] if the store cannot list tasks. The
    /// local view is unchanged in that case.
    pub async fn refresh(&self) -> Result<(), TrackerError> {
        let _gate = self.op_gate.lock().await;
        self.reload().await
    }

    /// Refresh body; the caller holds the operation gate.
    async fn reload(&self) -> Result<(), TrackerError> {
        let remote = self.store.list().await?;
        self.state().merge_remote(remote);
        Ok(())
    }

    async fn persist(&self, mut transition: Transition, writes: Vec<PendingWrite>) -> Transition {
        for (task_id, update) in writes {
            if let Err(error) = self.store.update(&task_id, update).await {
                tracing::warn!(
                    task_id = %task_id,
                    %error,
                    "task store update failed, keeping local state"
                );
                transition.persistence_failures.push(PersistenceFailure {
                    task_id,
                    message: error.to_string(),
                });
            }
        }
        transition
    }

    /// Elapsed milliseconds of the active session, or 0.
    pub fn current_elapsed(&self) -> u64 {
        let now = self.clock.now();
        self.state().elapsed_ms(now)
    }

    pub fn current_session(&self) -> Option<ActiveSession> {
        self.state().current().cloned()
    }

    /// Paused sessions, most recently paused first.
    pub fn paused_sessions(&self) -> Vec<PausedSession> {
        self.state().paused().to_vec()
    }

    pub fn last_completed(&self) -> Option<LastCompleted> {
        self.state().last_completed().cloned()
    }

    pub fn snapshot(&self) -> TrackerSnapshot {
        let now = self.clock.now();
        self.state().snapshot(now)
    }

    /// The tracker's view of one task.
    pub fn task(&self, task_id: &str) -> Option<Task> {
        self.state().task(task_id).cloned()
    }

    pub fn tasks(&self) -> Vec<Task> {
        self.state().tasks().to_vec()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::DateTime;
    use rj_core::clock::ManualClock;
    use rj_store::MemoryTaskStore;

    use crate::Lookup;

    fn setup() -> (Arc<MemoryTaskStore>, Arc<ManualClock>, SessionTracker) {
        let store = Arc::new(MemoryTaskStore::new(vec![Task::new("t1", "Report")]));
        let clock = Arc::new(ManualClock::new(
            DateTime::from_timestamp(1_700_000_000, 0).unwrap(),
        ));
        let tracker = SessionTracker::new(store.clone(), clock.clone(), store_tasks(&store));
        (store, clock, tracker)
    }

    fn store_tasks(store: &MemoryTaskStore) -> Vec<Task> {
        store.snapshot("t1").into_iter().collect()
    }

    #[tokio::test]
    async fn start_unknown_refreshes_once_then_fails() {
        let (store, _clock, tracker) = setup();

        let err = tracker.start("t9").await.unwrap_err();
        assert!(matches!(err, TrackerError::NotFound { ref id, lookup: Lookup::Task } if id == "t9"));

        store.insert(Task::new("t9", "Late arrival"));
        let transition = tracker.start("t9").await.unwrap();
        assert_eq!(transition.active.unwrap().task_id, "t9");
    }

    #[tokio::test]
    async fn current_elapsed_follows_clock() {
        let (_store, clock, tracker) = setup();
        assert_eq!(tracker.current_elapsed(), 0);

        tracker.start("t1").await.unwrap();
        clock.advance_secs(12);
        assert_eq!(tracker.current_elapsed(), 12_000);
        assert_eq!(tracker.snapshot().current_elapsed_ms, 12_000);
    }

    #[tokio::test]
    async fn refresh_failure_leaves_view_untouched() {
        let (store, _clock, tracker) = setup();
        store.set_offline(true);
        assert!(matches!(
            tracker.refresh().await,
            Err(TrackerError::Store(_))
        ));
        assert_eq!(tracker.tasks().len(), 1);
    }
}
