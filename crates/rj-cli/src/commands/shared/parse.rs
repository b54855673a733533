use serde::de::DeserializeOwned;

/// Parse a kebab-case enum value using serde-deserialization.
///
/// Underscores and case are tolerated, so `in_progress` and `In-Progress`
/// both name `in-progress`.
pub fn parse_enum<T>(raw: &str, field: &str) -> anyhow::Result<T>
where
    T: DeserializeOwned,
{
    let normalized = raw.trim().to_ascii_lowercase().replace('_', "-");
    let json = format!("\"{normalized}\"");
    serde_json::from_str(&json).map_err(|error| anyhow::anyhow!("invalid {field} '{raw}': {error}"))
}
