//! Randomized operation sequences against the tracker.
//!
//! Each case replays a sequence of operations and clock advances, keeping an
//! independent ledger of every span that ended. After each step the tracker
//! must have at most one active session that is never also paused, and each
//! task's booked total must equal the ledger.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::DateTime;
use proptest::prelude::*;
use rj_core::clock::{Clock, ManualClock, elapsed_ms};
use rj_core::entities::Task;
use rj_core::enums::StopPolicy;
use rj_store::MemoryTaskStore;
use rj_tracker::SessionTracker;

const TASKS: [&str; 3] = ["A", "B", "C"];

#[derive(Debug, Clone)]
enum Op {
    Start(usize),
    Pause,
    Resume(usize),
    Stop(usize, bool),
    Advance(i64),
}

fn op() -> impl Strategy<Value = Op> {
    prop_oneof![
        (0..TASKS.len()).prop_map(Op::Start),
        Just(Op::Pause),
        (0..TASKS.len()).prop_map(Op::Resume),
        (0..TASKS.len(), any::<bool>()).prop_map(|(i, d)| Op::Stop(i, d)),
        (0i64..120).prop_map(Op::Advance),
    ]
}

fn run(ops: &[Op]) -> Result<(), TestCaseError> {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .build()
        .map_err(|e| TestCaseError::fail(e.to_string()))?;

    runtime.block_on(async {
        let tasks: Vec<Task> = TASKS.iter().map(|id| Task::new(*id, *id)).collect();
        let store = Arc::new(MemoryTaskStore::new(tasks.clone()));
        let clock = Arc::new(ManualClock::new(
            DateTime::from_timestamp(1_700_000_000, 0).unwrap(),
        ));
        let tracker = SessionTracker::new(store, clock.clone(), tasks);
        let mut ledger: HashMap<String, u64> = HashMap::new();

        for op in ops {
            // Span the active session would book if this op ends it.
            let pending = tracker
                .current_session()
                .map(|c| (c.task_id.clone(), elapsed_ms(c.start_time, clock.now())));

            match op {
                Op::Advance(secs) => clock.advance_secs(*secs),
                Op::Pause => {
                    let t = tracker.pause().await;
                    if let Some(p) = t.paused {
                        prop_assert_eq!(
                            pending.as_ref().map(|(_, span)| *span),
                            Some(p.total_time_ms)
                        );
                        *ledger.entry(p.task_id).or_default() += p.total_time_ms;
                    }
                }
                Op::Start(i) => {
                    let t = tracker.start(TASKS[*i]).await.unwrap();
                    if let Some(p) = t.preempted {
                        prop_assert_eq!(
                            pending.as_ref().map(|(_, span)| *span),
                            Some(p.total_time_ms)
                        );
                        *ledger.entry(p.task_id).or_default() += p.total_time_ms;
                    }
                }
                Op::Resume(i) => {
                    if let Ok(t) = tracker.resume(TASKS[*i]).await {
                        if let Some(p) = t.preempted {
                            *ledger.entry(p.task_id).or_default() += p.total_time_ms;
                        }
                    }
                }
                Op::Stop(i, done) => {
                    let id = TASKS[*i];
                    let was_active = pending.as_ref().is_some_and(|(a, _)| a == id);
                    if let Ok(t) = tracker.stop(id, StopPolicy::from_mark_done(*done)).await {
                        let completed = t.completed.unwrap();
                        if was_active {
                            *ledger.entry(id.to_string()).or_default() += completed.duration_ms;
                        }
                    }
                }
            }

            let current = tracker.current_session();
            let paused = tracker.paused_sessions();
            if let Some(ref c) = current {
                prop_assert!(
                    paused.iter().all(|p| p.task_id != c.task_id),
                    "active task {} is also paused",
                    c.task_id
                );
            }
            let mut keys: Vec<_> = paused.iter().map(|p| p.task_id.as_str()).collect();
            keys.sort_unstable();
            keys.dedup();
            prop_assert_eq!(keys.len(), paused.len(), "paused set has duplicate keys");

            for id in TASKS {
                let booked = tracker.task(id).unwrap().total_time_spent_ms;
                prop_assert_eq!(booked, ledger.get(id).copied().unwrap_or(0));
            }
        }
        Ok(())
    })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(128))]

    #[test]
    fn random_sequences_keep_invariants(ops in prop::collection::vec(op(), 1..60)) {
        run(&ops)?;
    }
}
