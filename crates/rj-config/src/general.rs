//! General application configuration.

use serde::{Deserialize, Serialize};

fn default_company() -> String {
    "Unknown Company".to_string()
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct GeneralConfig {
    /// Company name used for tasks whose job cannot be resolved.
    #[serde(default = "default_company")]
    pub default_company: String,

    /// Workspace seed file (jobs, tasks, notes) loaded by the CLI.
    #[serde(default)]
    pub seed_path: String,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            default_company: default_company(),
            seed_path: String::new(),
        }
    }
}

impl GeneralConfig {
    pub fn has_seed(&self) -> bool {
        !self.seed_path.is_empty()
    }
}
