use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::enums::DegradedReason;

/// Generated analysis of a task.
///
/// Field names follow the generator's JSON contract (`whatWasDone`, ...).
/// A payload with `degraded` set is a stand-in, not an analysis: an empty
/// `blockers` list on a non-degraded payload means "nothing notable".
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct InsightPayload {
    #[serde(default)]
    pub what_was_done: Vec<String>,
    #[serde(default)]
    pub what_needs_to_be_next: Vec<String>,
    #[serde(default)]
    pub estimated_time_left: String,
    #[serde(default)]
    pub blockers: Vec<String>,
    /// Percent complete, 0-100.
    #[serde(default)]
    pub progress: u8,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub degraded: Option<Degraded>,
}

impl InsightPayload {
    #[must_use]
    pub const fn is_degraded(&self) -> bool {
        self.degraded.is_some()
    }

    /// Whether the payload carries anything a reader could use.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.what_was_done.is_empty()
            && self.what_needs_to_be_next.is_empty()
            && self.estimated_time_left.is_empty()
            && self.blockers.is_empty()
    }
}

/// Marker attached to fallback payloads.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct Degraded {
    pub reason: DegradedReason,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// What the insight cache knows about one task.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct InsightSnapshot {
    pub task_id: String,
    pub payload: Option<InsightPayload>,
    pub fetched_at: Option<DateTime<Utc>>,
    pub fresh: bool,
    pub attempted: bool,
    pub in_flight: bool,
    pub last_error: Option<String>,
}
