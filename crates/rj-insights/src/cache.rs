//! Per-task single-flight insight cache.
//!
//! Lookup order for [`InsightsCache::get`]:
//!
//! 1. a fresh cached entry (unless forced);
//! 2. a non-empty payload from the secondary source, adopted into the cache
//!    (unless forced, and only while the cache holds no entry of its own for
//!    the task);
//! 3. for automatic lookups of a task whose attempt is spent, the last known
//!    payload;
//! 4. the fetch already in flight for the task;
//! 5. a new fetch, registered as in flight before anything awaits.
//!
//! A fetch runs on its own Tokio task. It writes its own outcome into the
//! cache when it settles, so callers may drop their futures without losing
//! or cancelling it.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use chrono::{DateTime, Utc};
use futures::FutureExt;
use futures::future::{BoxFuture, Shared};
use rj_core::clock::Clock;
use rj_core::entities::{InsightPayload, InsightSnapshot};
use rj_core::enums::TaskStatus;

use crate::{
    GenerationError, InsightContext, InsightGenerator, SecondaryInsightSource, fallback,
};

type SharedFetch = Shared<BoxFuture<'static, InsightPayload>>;

/// How a lookup may use the cache.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FetchOptions {
    /// Skip the fresh-entry and secondary-source checks.
    pub force: bool,
    /// Ignore the one-automatic-attempt limit.
    pub manual: bool,
}

impl FetchOptions {
    /// A lookup made on the caller's behalf, e.g. when a task is displayed.
    pub const AUTOMATIC: Self = Self {
        force: false,
        manual: false,
    };

    /// An explicit user request for a new analysis.
    pub const REFRESH: Self = Self {
        force: true,
        manual: true,
    };
}

#[derive(Debug, Clone)]
struct CacheEntry {
    payload: InsightPayload,
    fetched_at: DateTime<Utc>,
}

struct InFlight {
    id: u64,
    fetch: SharedFetch,
}

#[derive(Default)]
struct TaskSlot {
    /// Last successful (or adopted) payload.
    entry: Option<CacheEntry>,
    /// Last payload handed out, fallbacks included.
    last_known: Option<InsightPayload>,
    last_error: Option<String>,
    attempted: bool,
    in_flight: Option<InFlight>,
}

type Slots = Arc<Mutex<HashMap<String, TaskSlot>>>;

fn lock(slots: &Mutex<HashMap<String, TaskSlot>>) -> MutexGuard<'_, HashMap<String, TaskSlot>> {
    slots.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Single-flight, TTL-bounded cache of task insights.
///
/// One instance per application session; tests build their own.
pub struct InsightsCache {
    generator: Arc<dyn InsightGenerator>,
    secondary: Option<Arc<dyn SecondaryInsightSource>>,
    clock: Arc<dyn Clock>,
    ttl: chrono::Duration,
    slots: Slots,
    next_fetch_id: AtomicU64,
}

impl InsightsCache {
    /// A cache with the default 15 minute freshness window.
    pub fn new(generator: Arc<dyn InsightGenerator>, clock: Arc<dyn Clock>) -> Self {
        Self {
            generator,
            secondary: None,
            clock,
            ttl: chrono::Duration::minutes(15),
            slots: Arc::default(),
            next_fetch_id: AtomicU64::new(0),
        }
    }

    #[must_use]
    pub fn with_ttl(mut self, ttl: Duration) -> Self {
        self.ttl = chrono::Duration::from_std(ttl).unwrap_or(chrono::Duration::MAX);
        self
    }

    #[must_use]
    pub fn with_secondary(mut self, secondary: Arc<dyn SecondaryInsightSource>) -> Self {
        self.secondary = Some(secondary);
        self
    }

    fn is_fresh(&self, entry: &CacheEntry, now: DateTime<Utc>) -> bool {
        now - entry.fetched_at < self.ttl
    }

    /// Insight for the context's task. Never fails: generator errors resolve
    /// to a fallback payload marked `generation_failed`.
    pub async fn get(&self, context: &InsightContext, options: FetchOptions) -> InsightPayload {
        let task_id = context.task_id();

        if !options.force {
            if let Some(payload) = self.fresh_payload(task_id) {
                tracing::debug!(task_id, "insight cache hit");
                return payload;
            }
            // Only tasks this cache has never held are seeded from the
            // secondary source; a stale entry of our own means a new fetch.
            if !self.has_entry(task_id) {
                if let Some(payload) = self.lookup_secondary(task_id).await {
                    return payload;
                }
            }
        }

        let fetch = {
            let mut slots = lock(&self.slots);
            let now = self.clock.now();
            let slot = slots.entry(task_id.to_string()).or_default();

            if !options.manual {
                // The cycle that produced this entry is over once it goes stale.
                let cycle_over = slot.last_error.is_none()
                    && slot
                        .entry
                        .as_ref()
                        .is_some_and(|e| !self.is_fresh(e, now));
                if slot.attempted && cycle_over {
                    tracing::debug!(task_id, "cached insight expired, starting a new cycle");
                    slot.attempted = false;
                }
                if slot.attempted {
                    if let Some(ref payload) = slot.last_known {
                        tracing::debug!(task_id, "automatic attempt already spent");
                        return payload.clone();
                    }
                }
            }

            if let Some(ref in_flight) = slot.in_flight {
                tracing::debug!(task_id, "joining in-flight insight fetch");
                in_flight.fetch.clone()
            } else {
                let id = self.next_fetch_id.fetch_add(1, Ordering::Relaxed);
                let fetch = self.spawn_fetch(id, context.clone());
                slot.in_flight = Some(InFlight {
                    id,
                    fetch: fetch.clone(),
                });
                tracing::debug!(task_id, fetch_id = id, manual = options.manual, "insight fetch started");
                fetch
            }
        };

        fetch.await
    }

    /// Force a new fetch, ignoring freshness and the automatic-attempt limit.
    pub async fn refresh(&self, context: &InsightContext) -> InsightPayload {
        self.get(context, FetchOptions::REFRESH).await
    }

    /// Let the next automatic lookup fetch again, e.g. after the task changed.
    pub fn reset_attempt(&self, task_id: &str) {
        if let Some(slot) = lock(&self.slots).get_mut(task_id) {
            slot.attempted = false;
        }
    }

    /// What the cache currently knows about a task.
    pub fn snapshot(&self, task_id: &str) -> InsightSnapshot {
        let now = self.clock.now();
        let slots = lock(&self.slots);
        let slot = slots.get(task_id);
        let entry = slot.and_then(|s| s.entry.as_ref());
        InsightSnapshot {
            task_id: task_id.to_string(),
            payload: slot.and_then(|s| s.last_known.clone()),
            fetched_at: entry.map(|e| e.fetched_at),
            fresh: entry.is_some_and(|e| self.is_fresh(e, now)),
            attempted: slot.is_some_and(|s| s.attempted),
            in_flight: slot.is_some_and(|s| s.in_flight.is_some()),
            last_error: slot.and_then(|s| s.last_error.clone()),
        }
    }

    fn fresh_payload(&self, task_id: &str) -> Option<InsightPayload> {
        let now = self.clock.now();
        let slots = lock(&self.slots);
        let entry = slots.get(task_id)?.entry.as_ref()?;
        self.is_fresh(entry, now).then(|| entry.payload.clone())
    }

    fn has_entry(&self, task_id: &str) -> bool {
        lock(&self.slots)
            .get(task_id)
            .is_some_and(|slot| slot.entry.is_some())
    }

    async fn lookup_secondary(&self, task_id: &str) -> Option<InsightPayload> {
        let secondary = self.secondary.as_ref()?;
        match secondary.lookup(task_id).await {
            Ok(Some(payload)) if !payload.is_empty() => {
                let now = self.clock.now();
                let mut slots = lock(&self.slots);
                let slot = slots.entry(task_id.to_string()).or_default();
                slot.entry = Some(CacheEntry {
                    payload: payload.clone(),
                    fetched_at: now,
                });
                slot.last_known = Some(payload.clone());
                tracing::debug!(task_id, "adopted insight from secondary source");
                Some(payload)
            }
            Ok(_) => None,
            Err(error) => {
                tracing::warn!(task_id, %error, "secondary insight lookup failed");
                None
            }
        }
    }

    fn spawn_fetch(&self, id: u64, context: InsightContext) -> SharedFetch {
        let generator = Arc::clone(&self.generator);
        let clock = Arc::clone(&self.clock);
        let slots = Arc::clone(&self.slots);
        let task_id = context.task.id.clone();
        let status = context.task.status;

        let handle = tokio::spawn(async move {
            // The generator runs in its own task so a panic there still settles.
            let outcome = match tokio::spawn(async move { generator.generate(&context).await }).await
            {
                Ok(result) => result,
                Err(join) => Err(GenerationError::Join(join.to_string())),
            };
            settle(&slots, &task_id, id, status, outcome, clock.now())
        });

        async move {
            handle
                .await
                .unwrap_or_else(|join| fallback::generation_failed(status, join.to_string()))
        }
        .boxed()
        .shared()
    }
}

/// Record a finished fetch and return what its callers receive.
fn settle(
    slots: &Mutex<HashMap<String, TaskSlot>>,
    task_id: &str,
    fetch_id: u64,
    status: TaskStatus,
    outcome: Result<InsightPayload, GenerationError>,
    now: DateTime<Utc>,
) -> InsightPayload {
    let mut slots = lock(slots);
    let slot = slots.entry(task_id.to_string()).or_default();

    let payload = match outcome {
        Ok(payload) => {
            tracing::debug!(task_id, fetch_id, "insight fetch succeeded");
            slot.entry = Some(CacheEntry {
                payload: payload.clone(),
                fetched_at: now,
            });
            slot.last_error = None;
            payload
        }
        Err(error) => {
            tracing::warn!(task_id, fetch_id, %error, "insight generation failed");
            let message = error.to_string();
            slot.last_error = Some(message.clone());
            fallback::generation_failed(status, message)
        }
    };

    slot.last_known = Some(payload.clone());
    slot.attempted = true;
    if slot.in_flight.as_ref().is_some_and(|f| f.id == fetch_id) {
        slot.in_flight = None;
    }
    payload
}
