use figment::Jail;
use pretty_assertions::assert_eq;
use rj_config::RjConfig;

#[test]
fn env_fills_nested_sections() {
    Jail::expect_with(|jail| {
        jail.set_env("ROLEJUGGLER_INSIGHTS__API_KEY", "env-key");
        jail.set_env("ROLEJUGGLER_TRACKER__STOP_MARKS_DONE", "false");

        let config = RjConfig::load().expect("config loads");
        assert_eq!(config.insights.api_key, "env-key");
        assert!(config.insights.is_configured());
        assert!(!config.tracker.stop_marks_done);
        Ok(())
    });
}

#[test]
fn env_beats_project_toml() {
    Jail::expect_with(|jail| {
        jail.set_env("XDG_CONFIG_HOME", jail.directory().join("xdg").display());
        jail.create_dir(".rolejuggler")?;
        jail.create_file(
            ".rolejuggler/config.toml",
            "[general]\ndefault_company = \"From Toml\"\n",
        )?;
        jail.set_env("ROLEJUGGLER_GENERAL__DEFAULT_COMPANY", "From Env");

        let config = RjConfig::load().expect("config loads");
        assert_eq!(config.general.default_company, "From Env");
        Ok(())
    });
}

#[test]
fn unrelated_env_is_ignored() {
    Jail::expect_with(|jail| {
        jail.set_env("OTHERAPP_INSIGHTS__API_KEY", "nope");

        let config = RjConfig::load().expect("config loads");
        assert!(!config.insights.is_configured());
        Ok(())
    });
}
