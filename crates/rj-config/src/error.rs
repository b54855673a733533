//! Errors from loading and validating RoleJuggler settings.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    /// A config file or `ROLEJUGGLER_*` variable could not be read into
    /// [`RjConfig`](crate::RjConfig), e.g. `ttl_secs = "soon"`.
    #[error("Failed to load RoleJuggler configuration: {0}")]
    Load(#[from] figment::Error),

    /// A setting a feature depends on is empty, e.g. `insights.api_key`.
    #[error("{key} is not set (add it to config.toml or export {env_var})")]
    Missing {
        key: &'static str,
        env_var: &'static str,
    },

    /// A setting loaded fine but cannot be used, e.g. `insights.ttl_secs = 0`.
    #[error("Invalid value for {key}: {reason}")]
    InvalidValue {
        key: &'static str,
        reason: &'static str,
    },
}
