//! # rj-config
//!
//! Layered configuration loading for RoleJuggler using figment.
//!
//! Configuration sources (in priority order, highest wins):
//! 1. Environment variables (`ROLEJUGGLER_*` prefix, `__` as separator)
//! 2. Project-level `.rolejuggler/config.toml`
//! 3. User-level `~/.config/rolejuggler/config.toml`
//! 4. Built-in defaults
//!
//! # Environment Variable Mapping
//!
//! Figment maps `ROLEJUGGLER_INSIGHTS__API_KEY` -> `insights.api_key`,
//! `ROLEJUGGLER_TRACKER__STOP_MARKS_DONE` -> `tracker.stop_marks_done`, etc.
//! The `__` (double underscore) separates nested config sections.
//!
//! # Usage
//!
//! ```no_run
//! use rj_config::RjConfig;
//!
//! let config = RjConfig::load_with_dotenv().expect("config");
//!
//! if config.insights.is_configured() {
//!     println!("model: {}", config.insights.model);
//! }
//! ```

mod error;
mod general;
mod insights;
mod tracker;

pub use error::ConfigError;
pub use general::GeneralConfig;
pub use insights::InsightsConfig;
pub use tracker::TrackerConfig;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct RjConfig {
    #[serde(default)]
    pub insights: InsightsConfig,
    #[serde(default)]
    pub tracker: TrackerConfig,
    #[serde(default)]
    pub general: GeneralConfig,
}

impl RjConfig {
    /// Load configuration from all sources (TOML files + environment variables).
    ///
    /// Does NOT call `dotenvy` -- use [`Self::load_with_dotenv`] if you need `.env` file loading.
    pub fn load() -> Result<Self, ConfigError> {
        Self::figment().extract().map_err(ConfigError::from)
    }

    /// Load configuration with `.env` file support.
    pub fn load_with_dotenv() -> Result<Self, ConfigError> {
        Self::load_dotenv_from_workspace();
        Self::load()
    }

    /// Build the figment provider chain.
    ///
    /// This is public so tests can inspect the figment directly or add
    /// additional providers on top.
    pub fn figment() -> Figment {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        if let Some(global_path) = Self::global_config_path() {
            if global_path.exists() {
                figment = figment.merge(Toml::file(global_path));
            }
        }

        let local_path = PathBuf::from(".rolejuggler/config.toml");
        if local_path.exists() {
            figment = figment.merge(Toml::file(local_path));
        }

        figment.merge(Env::prefixed("ROLEJUGGLER_").split("__"))
    }

    fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("rolejuggler").join("config.toml"))
    }

    /// Load `.env` from the workspace root, falling back to the current directory.
    fn load_dotenv_from_workspace() {
        if let Ok(manifest_dir) = std::env::var("CARGO_MANIFEST_DIR") {
            let mut dir = PathBuf::from(manifest_dir);
            // crate -> crates/ -> workspace root
            for _ in 0..3 {
                let env_path = dir.join(".env");
                if env_path.exists() {
                    let _ = dotenvy::from_path(&env_path);
                    return;
                }
                if !dir.pop() {
                    break;
                }
            }
        }

        let _ = dotenvy::dotenv();
    }
}
