//! Seams in front of the expensive insight source.

use std::sync::Arc;

use async_trait::async_trait;
use rj_core::entities::InsightPayload;
use rj_store::{StoreError, TaskStore};

use crate::{GenerationError, InsightContext, fallback};

/// Produces an insight for one task. May be slow and may fail.
#[async_trait]
pub trait InsightGenerator: Send + Sync {
    async fn generate(&self, context: &InsightContext) -> Result<InsightPayload, GenerationError>;
}

/// A cheaper place a previously generated insight may already live.
#[async_trait]
pub trait SecondaryInsightSource: Send + Sync {
    async fn lookup(&self, task_id: &str) -> Result<Option<InsightPayload>, StoreError>;
}

/// Generator used when no API key is configured.
#[derive(Debug, Clone, Copy, Default)]
pub struct UnavailableGenerator;

#[async_trait]
impl InsightGenerator for UnavailableGenerator {
    async fn generate(&self, context: &InsightContext) -> Result<InsightPayload, GenerationError> {
        Ok(fallback::unavailable(context.task.status))
    }
}

/// Reads the insight stored on the task record itself.
pub struct TaskSnapshotSource {
    store: Arc<dyn TaskStore>,
}

impl TaskSnapshotSource {
    pub fn new(store: Arc<dyn TaskStore>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl SecondaryInsightSource for TaskSnapshotSource {
    async fn lookup(&self, task_id: &str) -> Result<Option<InsightPayload>, StoreError> {
        match self.store.get(task_id).await {
            Ok(task) => Ok(task.insight.filter(|p| !p.is_empty())),
            Err(StoreError::NotFound { .. }) => Ok(None),
            Err(e) => Err(e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rj_core::entities::Task;
    use rj_core::enums::DegradedReason;
    use rj_store::MemoryTaskStore;

    #[tokio::test]
    async fn unavailable_generator_marks_payload() {
        let ctx = InsightContext::assemble(&Task::new("t1", "x"), &[], &[], &[], "Acme");
        let payload = UnavailableGenerator.generate(&ctx).await.unwrap();
        assert_eq!(
            payload.degraded.map(|d| d.reason),
            Some(DegradedReason::Unavailable)
        );
    }

    #[tokio::test]
    async fn snapshot_source_reads_non_empty_task_insight() {
        let store = Arc::new(MemoryTaskStore::new(vec![
            Task::new("t1", "With insight"),
            Task::new("t2", "Without"),
        ]));
        store.set_insight(
            "t1",
            InsightPayload {
                what_was_done: vec!["Drafted".into()],
                progress: 20,
                ..InsightPayload::default()
            },
        );
        store.set_insight("t2", InsightPayload::default());
        let source = TaskSnapshotSource::new(store.clone());

        assert_eq!(source.lookup("t1").await.unwrap().unwrap().progress, 20);
        assert!(source.lookup("t2").await.unwrap().is_none(), "empty payload is a miss");
        assert!(source.lookup("nope").await.unwrap().is_none());

        store.set_offline(true);
        assert!(source.lookup("t1").await.is_err());
    }
}
