//! Transitions issued at the same time run one after the other.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use chrono::DateTime;
use pretty_assertions::assert_eq;
use rj_core::clock::ManualClock;
use rj_core::entities::Task;
use rj_store::{MemoryTaskStore, StoreError, TaskStore, TaskUpdate};
use rj_tracker::SessionTracker;
use tokio::sync::Semaphore;

/// Holds every update until a permit is released.
struct GatedStore {
    inner: MemoryTaskStore,
    gate: Semaphore,
    entered: AtomicUsize,
}

#[async_trait]
impl TaskStore for GatedStore {
    async fn list(&self) -> Result<Vec<Task>, StoreError> {
        self.inner.list().await
    }

    async fn update(&self, task_id: &str, update: TaskUpdate) -> Result<Task, StoreError> {
        self.entered.fetch_add(1, Ordering::SeqCst);
        self.gate
            .acquire()
            .await
            .map_err(|e| StoreError::Unavailable(e.to_string()))?
            .forget();
        self.inner.update(task_id, update).await
    }
}

fn tasks() -> Vec<Task> {
    vec![Task::new("T1", "Report"), Task::new("T2", "Audit")]
}

fn clock() -> Arc<ManualClock> {
    Arc::new(ManualClock::new(
        DateTime::from_timestamp(1_700_000_000, 0).unwrap(),
    ))
}

/// The store log produced by running the two starts one after the other.
async fn serial_log(first: &str, second: &str) -> Vec<(String, TaskUpdate)> {
    let store = Arc::new(MemoryTaskStore::new(tasks()));
    let tracker = SessionTracker::new(store.clone(), clock(), tasks());
    tracker.start(first).await.unwrap();
    tracker.start(second).await.unwrap();
    store.update_log()
}

#[tokio::test]
async fn concurrent_starts_are_serialized() {
    let store = Arc::new(GatedStore {
        inner: MemoryTaskStore::new(tasks()),
        gate: Semaphore::new(0),
        entered: AtomicUsize::new(0),
    });
    let tracker = Arc::new(SessionTracker::new(store.clone(), clock(), tasks()));

    let a = tokio::spawn({
        let tracker = Arc::clone(&tracker);
        async move { tracker.start("T1").await }
    });
    let b = tokio::spawn({
        let tracker = Arc::clone(&tracker);
        async move { tracker.start("T2").await }
    });

    while store.entered.load(Ordering::SeqCst) == 0 {
        tokio::task::yield_now().await;
    }
    for _ in 0..50 {
        tokio::task::yield_now().await;
    }

    // The first start is parked in its store write; the second has not begun.
    assert_eq!(store.entered.load(Ordering::SeqCst), 1);
    let first = tracker.current_session().unwrap().task_id;
    assert!(tracker.paused_sessions().is_empty());
    let second = if first == "T1" { "T2" } else { "T1" };

    store.gate.add_permits(16);
    a.await.unwrap().unwrap();
    b.await.unwrap().unwrap();

    let current = tracker.current_session().unwrap();
    assert_eq!(current.task_id, second);
    let paused: Vec<String> = tracker
        .paused_sessions()
        .into_iter()
        .map(|p| p.task_id)
        .collect();
    assert_eq!(paused, vec![first.clone()]);
    assert!(!paused.contains(&current.task_id));

    assert_eq!(store.inner.update_log(), serial_log(&first, second).await);
}

#[tokio::test]
async fn observers_do_not_wait_for_the_store() {
    let store = Arc::new(GatedStore {
        inner: MemoryTaskStore::new(tasks()),
        gate: Semaphore::new(0),
        entered: AtomicUsize::new(0),
    });
    let tracker = Arc::new(SessionTracker::new(store.clone(), clock(), tasks()));

    let start = tokio::spawn({
        let tracker = Arc::clone(&tracker);
        async move { tracker.start("T1").await }
    });
    while store.entered.load(Ordering::SeqCst) == 0 {
        tokio::task::yield_now().await;
    }

    let snapshot = tracker.snapshot();
    assert_eq!(snapshot.current.unwrap().task_id, "T1");
    assert!(!start.is_finished());

    store.gate.add_permits(1);
    let transition = start.await.unwrap().unwrap();
    assert!(transition.persisted());
}
