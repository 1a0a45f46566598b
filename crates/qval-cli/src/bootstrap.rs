use std::path::Path;

use anyhow::Context;
use qval_config::QvalConfig;
use qval_workflow::LedgerSettings;

/// Load layered configuration, with `--config` on top of the project file.
pub fn load_config(explicit: Option<&Path>) -> anyhow::Result<QvalConfig> {
    let config = match explicit {
        Some(path) => QvalConfig::load_with_file(path)
            .with_context(|| format!("failed to load config from {}", path.display()))?,
        None => QvalConfig::load_with_dotenv().context("failed to load configuration")?,
    };
    tracing::debug!(
        allow_stage_reset = config.workflow.allow_stage_reset,
        r_squared_min = config.criteria.r_squared_min,
        "configuration loaded"
    );
    Ok(config)
}

pub fn ledger_settings(config: &QvalConfig) -> LedgerSettings {
    LedgerSettings {
        criteria: config.criteria.clone(),
        allow_stage_reset: config.workflow.allow_stage_reset,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn settings_follow_config() {
        let mut config = QvalConfig::default();
        config.workflow.allow_stage_reset = true;
        config.criteria.rsd_limit_full = 1.0;

        let settings = ledger_settings(&config);
        assert!(settings.allow_stage_reset);
        assert!((settings.criteria.rsd_limit_full - 1.0).abs() < f64::EPSILON);
    }
}
