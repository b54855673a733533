//! CLI response types returned as JSON by `rj` commands.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::entities::{InsightPayload, InsightSnapshot, Task, TrackerSnapshot};

/// Response from `rj insights get` / `rj insights refresh`.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct InsightResponse {
    pub task_id: String,
    pub insight: InsightPayload,
    pub snapshot: InsightSnapshot,
}

/// Response from the shell's `status` command.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct StatusResponse {
    pub tracker: TrackerSnapshot,
    /// Tasks that can be started: not done, not current, not paused.
    pub available: Vec<Task>,
}

/// Daily overview produced by `rj summary`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct DailySummary {
    #[serde(default)]
    pub summary: String,
    #[serde(default)]
    pub suggestions: Vec<String>,
    /// 0-100.
    #[serde(default)]
    pub productivity_score: u8,
    #[serde(default)]
    pub focus_areas: Vec<String>,
}
