use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// A free-form note, fed to insight generation as user context.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct StickyNote {
    pub id: String,
    pub content: String,
    #[serde(default)]
    pub color: Option<String>,
}
