use figment::Jail;
use pretty_assertions::assert_eq;
use tg_config::ThinkgraphConfig;

#[test]
fn env_overrides_nested_fields() {
    Jail::expect_with(|jail| {
        jail.set_env("THINKGRAPH_DATABASE__PATH", ":memory:");
        jail.set_env("THINKGRAPH_DATABASE__TRAIL_ENABLED", "false");
        jail.set_env("THINKGRAPH_GENERAL__DEFAULT_TEAM", "team-env");

        let config: ThinkgraphConfig = ThinkgraphConfig::figment().extract()?;
        assert_eq!(config.database.path, ":memory:");
        assert!(config.database.is_in_memory());
        assert!(!config.database.trail_enabled);
        assert_eq!(config.general.default_team, "team-env");
        Ok(())
    });
}

#[test]
fn env_beats_project_toml() {
    Jail::expect_with(|jail| {
        std::fs::create_dir_all(jail.directory().join(".thinkgraph"))
            .map_err(|e| e.to_string())?;
        jail.create_file(
            ".thinkgraph/config.toml",
            "[general]\ndefault_user = \"from-toml\"\n",
        )?;
        jail.set_env("THINKGRAPH_GENERAL__DEFAULT_USER", "from-env");

        let config = ThinkgraphConfig::load().map_err(|e| e.to_string())?;
        assert_eq!(config.general.default_user, "from-env");
        Ok(())
    });
}

#[test]
fn numeric_env_values_are_parsed() {
    Jail::expect_with(|jail| {
        jail.set_env("THINKGRAPH_GENERAL__DEFAULT_LIMIT", "5");
        let config = ThinkgraphConfig::load().map_err(|e| e.to_string())?;
        assert_eq!(config.general.default_limit, 5);
        Ok(())
    });
}
