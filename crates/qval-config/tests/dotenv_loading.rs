//! `.env` discovery for `QvalConfig::load_with_dotenv`.
//!
//! Variables read from `.env` are set on the process and outlive the Jail, so
//! this file holds a single test and runs as its own binary.

use figment::Jail;
use pretty_assertions::assert_eq;
use qval_config::QvalConfig;

#[test]
fn dotenv_in_manifest_dir_feeds_env_layer() {
    Jail::expect_with(|jail| {
        let dir = jail.directory().display().to_string();
        jail.set_env("CARGO_MANIFEST_DIR", dir);
        jail.set_env("QVAL_WORKFLOW__ALLOW_STAGE_RESET", "false");
        jail.create_file(
            ".env",
            "QVAL_GENERAL__ACTOR=dotenv-analyst\n\
             QVAL_CRITERIA__RSD_LIMIT_FULL=1.5\n\
             QVAL_WORKFLOW__ALLOW_STAGE_RESET=true\n",
        )?;

        let config = QvalConfig::load_with_dotenv().expect("config loads");
        assert_eq!(config.general.actor, "dotenv-analyst");
        assert!((config.criteria.rsd_limit_full - 1.5).abs() < f64::EPSILON);
        // Variables already in the environment win over `.env`.
        assert!(!config.workflow.allow_stage_reset);
        Ok(())
    });
}
