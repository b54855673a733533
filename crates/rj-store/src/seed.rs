//! Workspace seed files.
//!
//! A seed is a JSON document with the jobs, tasks, and sticky notes the CLI
//! works against:
//!
//! ```json
//! {
//!   "jobs":  [{ "id": "j1", "name": "Platform", "company": "Acme" }],
//!   "tasks": [{ "id": "t1", "title": "Quarterly report", "job_id": "j1" }],
//!   "notes": [{ "id": "n1", "content": "Ask about Q3 numbers" }]
//! }
//! ```

use std::collections::HashSet;
use std::path::Path;

use anyhow::Context;
use rj_core::entities::{Job, StickyNote, Task};
use rj_core::errors::CoreError;
use serde::{Deserialize, Serialize};

use crate::MemoryTaskStore;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Seed {
    #[serde(default)]
    pub jobs: Vec<Job>,
    #[serde(default)]
    pub tasks: Vec<Task>,
    #[serde(default)]
    pub notes: Vec<StickyNote>,
}

impl Seed {
    /// Read and validate a seed file.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::Other`] if the file cannot be read and
    /// [`CoreError::Validation`] if it is not a valid seed.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, CoreError> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("reading seed file {}", path.display()))?;
        Self::from_json(&raw)
    }

    /// Parse and validate a seed document.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::Validation`] on malformed JSON, duplicate ids, or
    /// a task that names an unknown job.
    pub fn from_json(raw: &str) -> Result<Self, CoreError> {
        let seed: Self = serde_json::from_str(raw)
            .map_err(|e| CoreError::Validation(format!("invalid seed JSON: {e}")))?;
        seed.validate()?;
        Ok(seed)
    }

    fn validate(&self) -> Result<(), CoreError> {
        let mut job_ids = HashSet::new();
        for job in &self.jobs {
            if !job_ids.insert(job.id.as_str()) {
                return Err(CoreError::Validation(format!("duplicate job id '{}'", job.id)));
            }
        }

        let mut task_ids = HashSet::new();
        for task in &self.tasks {
            if task.id.is_empty() {
                return Err(CoreError::Validation(format!(
                    "task '{}' has an empty id",
                    task.title
                )));
            }
            if !task_ids.insert(task.id.as_str()) {
                return Err(CoreError::Validation(format!("duplicate task id '{}'", task.id)));
            }
            if let Some(ref job_id) = task.job_id {
                if !job_ids.contains(job_id.as_str()) {
                    return Err(CoreError::Validation(format!(
                        "task '{}' references unknown job '{job_id}'",
                        task.id
                    )));
                }
            }
        }
        Ok(())
    }

    #[must_use]
    pub fn job(&self, job_id: &str) -> Option<&Job> {
        self.jobs.iter().find(|j| j.id == job_id)
    }

    /// A memory store holding a copy of the seed's tasks.
    #[must_use]
    pub fn to_store(&self) -> MemoryTaskStore {
        MemoryTaskStore::new(self.tasks.clone())
    }
}
