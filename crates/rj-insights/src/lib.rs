//! # rj-insights
//!
//! Task insights: an expensive, unreliable, per-task analysis behind a cache.
//!
//! - [`InsightsCache`] fetches at most once per task per automatic cycle,
//!   shares in-flight fetches between callers, and serves results for a
//!   freshness window (15 minutes by default).
//! - [`InsightGenerator`] is the expensive source; [`GeminiGenerator`] calls
//!   the Google Generative Language API, [`UnavailableGenerator`] stands in
//!   when no API key is configured.
//! - [`SecondaryInsightSource`] is a cheaper place a previous result may live;
//!   [`TaskSnapshotSource`] reads the insight stored on the task record.
//!
//! Generator failures never reach callers. They become [`fallback`] payloads
//! carrying a `degraded` marker.

mod cache;
mod context;
mod error;
pub mod fallback;
mod gemini;
mod generator;
mod http;
pub mod prompt;

pub use cache::{FetchOptions, InsightsCache};
pub use context::InsightContext;
pub use error::GenerationError;
pub use gemini::GeminiGenerator;
pub use generator::{
    InsightGenerator, SecondaryInsightSource, TaskSnapshotSource, UnavailableGenerator,
};
