//! Session tracker policy.

use serde::{Deserialize, Serialize};

const fn default_stop_marks_done() -> bool {
    true
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct TrackerConfig {
    /// Whether stopping a tracked task also moves it to `done`.
    #[serde(default = "default_stop_marks_done")]
    pub stop_marks_done: bool,

    /// Refuse to start tasks that are already `done`.
    #[serde(default)]
    pub start_requires_not_done: bool,
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            stop_marks_done: default_stop_marks_done(),
            start_requires_not_done: false,
        }
    }
}
