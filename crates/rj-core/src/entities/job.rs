use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// An employer engagement. Tasks belong to at most one job.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct Job {
    pub id: String,
    pub name: String,
    pub company: String,
    #[serde(default = "default_color")]
    pub color: String,
}

fn default_color() -> String {
    "#3B82F6".to_string()
}
