use figment::Jail;
use pretty_assertions::assert_eq;
use qval_config::QvalConfig;

#[test]
fn env_sets_nested_criteria() {
    Jail::expect_with(|jail| {
        jail.set_env("QVAL_CRITERIA__R_SQUARED_MIN", "0.998");
        jail.set_env("QVAL_WORKFLOW__ALLOW_STAGE_RESET", "true");

        let config = QvalConfig::load().expect("config loads");
        assert!((config.criteria.r_squared_min - 0.998).abs() < f64::EPSILON);
        assert!(config.workflow.allow_stage_reset);
        Ok(())
    });
}

#[test]
fn env_beats_project_file() {
    Jail::expect_with(|jail| {
        std::fs::create_dir_all(jail.directory().join(".qval")).map_err(|e| e.to_string())?;
        jail.create_file(
            ".qval/config.toml",
            "[general]\ndefault_format = \"text\"\nactor = \"from-file\"\n",
        )?;
        jail.set_env("QVAL_GENERAL__ACTOR", "from-env");

        let config = QvalConfig::load().expect("config loads");
        assert_eq!(config.general.actor, "from-env");
        assert_eq!(config.general.default_format, "text");
        Ok(())
    });
}

#[test]
fn invalid_env_value_fails_validation() {
    Jail::expect_with(|jail| {
        jail.set_env("QVAL_GENERAL__DEFAULT_FORMAT", "yaml");
        assert!(QvalConfig::load().is_err());
        Ok(())
    });
}
