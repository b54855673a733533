use std::sync::Arc;

use anyhow::Context;
use rj_config::RjConfig;
use rj_core::clock::{Clock, SystemClock};
use rj_core::entities::{
    ActiveSession, InsightPayload, InsightSnapshot, LastCompleted, PausedSession, Task,
};
use rj_core::enums::{StopPolicy, TaskStatus};
use rj_core::errors::CoreError;
use rj_core::responses::{DailySummary, InsightResponse, StatusResponse};
use rj_insights::{
    FetchOptions, GeminiGenerator, InsightContext, InsightGenerator, InsightsCache,
    TaskSnapshotSource, UnavailableGenerator, fallback,
};
use rj_store::{MemoryTaskStore, Seed, TaskStore};
use rj_tracker::{SessionTracker, Transition};

/// Everything a command needs: the workspace, the session tracker, and the
/// insight cache, wired to one store and one clock.
pub struct AppContext {
    pub config: RjConfig,
    pub seed: Seed,
    pub store: Arc<MemoryTaskStore>,
    pub tracker: SessionTracker,
    pub insights: InsightsCache,
    summarizer: Option<GeminiGenerator>,
}

impl AppContext {
    /// Wire the context against the system clock and, when an API key is
    /// configured, the Gemini generator.
    pub async fn init(config: RjConfig, seed: Seed) -> anyhow::Result<Self> {
        let summarizer = match GeminiGenerator::from_config(&config.insights) {
            Ok(generator) => Some(generator),
            Err(error) => {
                tracing::debug!(%error, "insight generation unavailable");
                None
            }
        };
        let generator: Arc<dyn InsightGenerator> = match &summarizer {
            Some(gemini) => Arc::new(gemini.clone()),
            None => Arc::new(UnavailableGenerator),
        };
        Self::build(config, seed, Arc::new(SystemClock), generator, summarizer).await
    }

    pub async fn build(
        config: RjConfig,
        seed: Seed,
        clock: Arc<dyn Clock>,
        generator: Arc<dyn InsightGenerator>,
        summarizer: Option<GeminiGenerator>,
    ) -> anyhow::Result<Self> {
        let store = Arc::new(seed.to_store());
        let task_store: Arc<dyn TaskStore> = store.clone();

        let tracker = SessionTracker::load(Arc::clone(&task_store), Arc::clone(&clock))
            .await
            .context("failed to load tasks")?;
        let insights = InsightsCache::new(generator, clock)
            .with_ttl(config.insights.ttl()?)
            .with_secondary(Arc::new(TaskSnapshotSource::new(task_store)));

        Ok(Self {
            config,
            seed,
            store,
            tracker,
            insights,
            summarizer,
        })
    }

    pub async fn start_task(&self, task_id: &str) -> anyhow::Result<Transition> {
        if self.config.tracker.start_requires_not_done
            && self
                .tracker
                .task(task_id)
                .is_some_and(|task| task.status == TaskStatus::Done)
        {
            return Err(CoreError::Validation(format!("task {task_id} is already done")).into());
        }
        Ok(self.tracker.start(task_id).await?)
    }

    pub async fn pause_current(&self) -> Transition {
        self.tracker.pause().await
    }

    pub async fn resume_task(&self, task_id: &str) -> anyhow::Result<Transition> {
        Ok(self.tracker.resume(task_id).await?)
    }

    /// Stop a tracked task. Without an explicit policy, `tracker.stop_marks_done`
    /// decides.
    pub async fn stop_task(
        &self,
        task_id: &str,
        policy: Option<StopPolicy>,
    ) -> anyhow::Result<Transition> {
        let policy = policy
            .unwrap_or_else(|| StopPolicy::from_mark_done(self.config.tracker.stop_marks_done));
        Ok(self.tracker.stop(task_id, policy).await?)
    }

    pub fn set_session_notes(&self, notes: &str) -> bool {
        self.tracker.set_session_notes(notes)
    }

    pub async fn get_insights(&self, task_id: &str) -> anyhow::Result<InsightResponse> {
        self.insights_with(task_id, FetchOptions::AUTOMATIC).await
    }

    pub async fn refresh_insights(&self, task_id: &str) -> anyhow::Result<InsightResponse> {
        self.insights_with(task_id, FetchOptions::REFRESH).await
    }

    async fn insights_with(
        &self,
        task_id: &str,
        options: FetchOptions,
    ) -> anyhow::Result<InsightResponse> {
        let task = self
            .tracker
            .task(task_id)
            .ok_or_else(|| CoreError::task_not_found(task_id))?;
        let context = InsightContext::assemble(
            &task,
            &self.seed.jobs,
            &self.tracker.tasks(),
            &self.seed.notes,
            &self.config.general.default_company,
        );

        let insight = self.insights.get(&context, options).await;
        self.remember_insight(task_id, &insight);

        Ok(InsightResponse {
            task_id: task_id.to_string(),
            insight,
            snapshot: self.insights.snapshot(task_id),
        })
    }

    /// Keep good results on the task record, where a later process finds them.
    fn remember_insight(&self, task_id: &str, insight: &InsightPayload) {
        if insight.is_degraded() || insight.is_empty() {
            return;
        }
        if !self.store.set_insight(task_id, insight.clone()) {
            tracing::debug!(task_id, "task vanished before its insight was stored");
        }
    }

    pub fn insight_snapshot(&self, task_id: &str) -> InsightSnapshot {
        self.insights.snapshot(task_id)
    }

    pub fn current_session(&self) -> Option<ActiveSession> {
        self.tracker.current_session()
    }

    pub fn paused_sessions(&self) -> Vec<PausedSession> {
        self.tracker.paused_sessions()
    }

    pub fn last_completed(&self) -> Option<LastCompleted> {
        self.tracker.last_completed()
    }

    pub fn tasks(&self) -> Vec<Task> {
        self.tracker.tasks()
    }

    /// Tracker state plus the tasks that could be started right now.
    pub fn status(&self) -> StatusResponse {
        let tracker = self.tracker.snapshot();
        let available = self
            .tracker
            .tasks()
            .into_iter()
            .filter(|task| {
                task.status != TaskStatus::Done
                    && tracker
                        .current
                        .as_ref()
                        .is_none_or(|current| current.task_id != task.id)
                    && !tracker.paused.iter().any(|p| p.task_id == task.id)
            })
            .collect();
        StatusResponse { tracker, available }
    }

    /// End-of-day overview. Never cached; failures become a stand-in summary.
    pub async fn daily_summary(&self) -> DailySummary {
        let tasks = self.tracker.tasks();
        let (completed, current): (Vec<Task>, Vec<Task>) = tasks
            .into_iter()
            .filter(|task| task.status != TaskStatus::Todo)
            .partition(|task| task.status == TaskStatus::Done);

        let Some(summarizer) = &self.summarizer else {
            tracing::warn!("insights.api_key is not configured, returning placeholder summary");
            return fallback::summary_failed();
        };
        summarizer
            .daily_summary(&completed, &current, &self.summary_company())
            .await
    }

    /// Company of the active session's job, else the configured default.
    fn summary_company(&self) -> String {
        self.tracker
            .current_session()
            .and_then(|session| session.job_id)
            .and_then(|job_id| self.seed.job(&job_id).map(|job| job.company.clone()))
            .unwrap_or_else(|| self.config.general.default_company.clone())
    }
}
