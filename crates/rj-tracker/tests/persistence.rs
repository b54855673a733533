//! Task store failures never undo local bookkeeping.

use std::sync::Arc;

use chrono::DateTime;
use rj_core::clock::ManualClock;
use rj_core::entities::Task;
use rj_core::enums::StopPolicy;
use rj_store::{MemoryTaskStore, TaskStore};
use rj_tracker::SessionTracker;

fn setup() -> (Arc<MemoryTaskStore>, Arc<ManualClock>, SessionTracker) {
    let tasks = vec![Task::new("T1", "Report"), Task::new("T2", "Audit")];
    let store = Arc::new(MemoryTaskStore::new(tasks.clone()));
    let clock = Arc::new(ManualClock::new(
        DateTime::from_timestamp(1_700_000_000, 0).unwrap(),
    ));
    let tracker = SessionTracker::new(store.clone(), clock.clone(), tasks);
    (store, clock, tracker)
}

#[tokio::test]
async fn failed_pause_write_keeps_local_state_and_next_write_proceeds() {
    let (store, clock, tracker) = setup();

    tracker.start("T1").await.unwrap();
    clock.advance_secs(30);
    store.fail_next_updates(1);
    let transition = tracker.pause().await;

    assert!(!transition.persisted());
    assert_eq!(transition.persistence_failures.len(), 1);
    assert_eq!(transition.persistence_failures[0].task_id, "T1");
    assert_eq!(tracker.task("T1").unwrap().total_time_spent_ms, 30_000);
    assert_eq!(tracker.paused_sessions()[0].total_time_ms, 30_000);
    assert_eq!(store.get("T1").await.unwrap().total_time_spent_ms, 0);

    // The next transition sends the absolute total and catches the store up.
    tracker.resume("T1").await.unwrap();
    clock.advance_secs(10);
    let stopped = tracker.stop("T1", StopPolicy::KeepStatus).await.unwrap();
    assert!(stopped.persisted());
    assert_eq!(store.get("T1").await.unwrap().total_time_spent_ms, 40_000);
}

#[tokio::test]
async fn offline_store_does_not_block_transitions() {
    let (store, clock, tracker) = setup();
    store.set_offline(true);

    let started = tracker.start("T1").await.unwrap();
    assert_eq!(started.persistence_failures.len(), 1);

    clock.advance_secs(10);
    let switched = tracker.start("T2").await.unwrap();
    assert_eq!(switched.preempted.unwrap().total_time_ms, 10_000);
    assert_eq!(tracker.current_session().unwrap().task_id, "T2");
    assert_eq!(switched.persistence_failures.len(), 2);
}

#[tokio::test]
async fn refresh_never_rewinds_booked_time() {
    let (store, clock, tracker) = setup();

    tracker.start("T1").await.unwrap();
    clock.advance_secs(30);
    store.fail_next_updates(1);
    tracker.pause().await;

    tracker.refresh().await.unwrap();
    assert_eq!(tracker.task("T1").unwrap().total_time_spent_ms, 30_000);
}
