mod app_context;
mod config_warnings;

use std::path::Path;

use anyhow::Context;
use rj_config::RjConfig;
use rj_store::Seed;

pub use app_context::AppContext;
pub use config_warnings::warn_unconfigured;

use crate::cli::GlobalFlags;

/// Load the workspace named by `--seed`, else `general.seed_path`.
///
/// With neither set the workspace is empty.
pub fn load_seed(flags: &GlobalFlags, config: &RjConfig) -> anyhow::Result<Seed> {
    let path = match flags.seed.as_deref() {
        Some(path) => path,
        None if config.general.has_seed() => config.general.seed_path.as_str(),
        None => {
            tracing::warn!("no seed file configured (use --seed or general.seed_path)");
            return Ok(Seed::default());
        }
    };
    Seed::from_path(Path::new(path)).with_context(|| format!("failed to load seed '{path}'"))
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use crate::cli::OutputFormat;

    use super::*;

    fn flags(seed: Option<String>) -> GlobalFlags {
        GlobalFlags {
            format: OutputFormat::Json,
            quiet: false,
            seed,
        }
    }

    #[test]
    fn flag_wins_over_config() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"tasks": [{{"id": "t1", "title": "Report"}}]}}"#).unwrap();

        let mut config = RjConfig::default();
        config.general.seed_path = "/definitely/not/here.json".to_string();

        let seed = load_seed(
            &flags(Some(file.path().display().to_string())),
            &config,
        )
        .unwrap();
        assert_eq!(seed.tasks.len(), 1);
    }

    #[test]
    fn missing_seed_file_names_the_path() {
        let mut config = RjConfig::default();
        config.general.seed_path = "/definitely/not/here.json".to_string();

        let err = load_seed(&flags(None), &config).unwrap_err();
        assert!(format!("{err:#}").contains("/definitely/not/here.json"));
    }

    #[test]
    fn no_seed_means_empty_workspace() {
        let seed = load_seed(&flags(None), &RjConfig::default()).unwrap();
        assert!(seed.tasks.is_empty());
    }
}
