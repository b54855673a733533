use rj_config::RjConfig;

/// Emit warnings for likely mistyped env var keys that silently fell back to defaults.
pub fn warn_unconfigured(config: &RjConfig) {
    for warning in collect_unconfigured_warnings(config, std::env::vars()) {
        tracing::warn!("{warning}");
    }
}

fn collect_unconfigured_warnings<I>(config: &RjConfig, env: I) -> Vec<String>
where
    I: IntoIterator<Item = (String, String)>,
{
    let env_keys = env.into_iter().map(|(key, _)| key).collect::<Vec<_>>();

    let mut warnings = Vec::new();

    if !config.insights.is_configured() && has_env_prefix(&env_keys, "ROLEJUGGLER_INSIGHTS") {
        warnings.push(
            "Insights config appears default while ROLEJUGGLER_INSIGHTS* env vars exist. Use double underscores (example: ROLEJUGGLER_INSIGHTS__API_KEY)."
                .to_string(),
        );
    }

    // Single-underscore keys land at the top level and are ignored.
    for section in ["TRACKER", "GENERAL"] {
        let single = format!("ROLEJUGGLER_{section}_");
        let double = format!("ROLEJUGGLER_{section}__");
        if env_keys
            .iter()
            .any(|key| key.starts_with(&single) && !key.starts_with(&double))
        {
            warnings.push(format!(
                "ROLEJUGGLER_{section}_* env vars are ignored. Use double underscores (example: ROLEJUGGLER_{section}__...)."
            ));
        }
    }

    warnings
}

fn has_env_prefix(keys: &[String], prefix: &str) -> bool {
    keys.iter().any(|key| key.starts_with(prefix))
}
