//! # qval-config
//!
//! Layered configuration loading for qval using figment.
//!
//! Configuration sources (in priority order, highest wins):
//! 1. Environment variables (`QVAL_*` prefix, `__` as separator)
//! 2. Project-level `.qval/config.toml`
//! 3. User-level `~/.config/qval/config.toml`
//! 4. Built-in defaults (ICH Q2 acceptance criteria)
//!
//! # Environment Variable Mapping
//!
//! Figment maps `QVAL_CRITERIA__R_SQUARED_MIN` -> `criteria.r_squared_min`,
//! `QVAL_WORKFLOW__ALLOW_STAGE_RESET` -> `workflow.allow_stage_reset`, etc.
//!
//! # Usage
//!
//! ```no_run
//! use qval_config::QvalConfig;
//!
//! let config = QvalConfig::load_with_dotenv().expect("config");
//! println!("r² minimum: {}", config.criteria.r_squared_min);
//! ```

mod error;
mod general;
mod workflow;

pub use error::ConfigError;
pub use general::{GeneralConfig, OUTPUT_FORMATS};
pub use workflow::WorkflowConfig;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use qval_core::criteria::AcceptanceCriteria;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Environment variable prefix.
pub const ENV_PREFIX: &str = "QVAL_";

/// Project-local config file, relative to the working directory.
pub const PROJECT_CONFIG: &str = ".qval/config.toml";

#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
pub struct QvalConfig {
    #[serde(default)]
    pub criteria: AcceptanceCriteria,
    #[serde(default)]
    pub workflow: WorkflowConfig,
    #[serde(default)]
    pub general: GeneralConfig,
}

impl QvalConfig {
    /// Load and validate configuration from TOML files and environment variables.
    ///
    /// Does NOT call `dotenvy`; use [`Self::load_with_dotenv`] for `.env` loading.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Figment`] if a source cannot be parsed, or
    /// [`ConfigError::InvalidValue`] if the merged values fail validation.
    pub fn load() -> Result<Self, ConfigError> {
        Self::from_figment(&Self::figment())
    }

    /// Load configuration with `.env` file support.
    ///
    /// # Errors
    ///
    /// Same as [`Self::load`].
    pub fn load_with_dotenv() -> Result<Self, ConfigError> {
        Self::load_dotenv_from_workspace();
        Self::load()
    }

    /// Load with an explicit extra TOML file layered above the project file.
    ///
    /// # Errors
    ///
    /// Same as [`Self::load`]; a missing `path` is an error.
    pub fn load_with_file(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Err(ConfigError::InvalidValue {
                field: "config".to_string(),
                reason: format!("{} does not exist", path.display()),
            });
        }
        let figment = Self::base_figment()
            .merge(Toml::file(path))
            .merge(Self::env_provider());
        Self::from_figment(&figment)
    }

    /// Extract from `figment` and validate.
    ///
    /// # Errors
    ///
    /// Same as [`Self::load`].
    pub fn from_figment(figment: &Figment) -> Result<Self, ConfigError> {
        let config: Self = figment.extract()?;
        config.validate()?;
        Ok(config)
    }

    /// Build the figment provider chain.
    #[must_use]
    pub fn figment() -> Figment {
        Self::base_figment().merge(Self::env_provider())
    }

    /// Check merged values.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidValue`] naming the offending section.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.criteria
            .validate()
            .map_err(|err| ConfigError::InvalidValue {
                field: "criteria".to_string(),
                reason: err.to_string(),
            })?;
        if !OUTPUT_FORMATS.contains(&self.general.default_format.as_str()) {
            return Err(ConfigError::InvalidValue {
                field: "general.default_format".to_string(),
                reason: format!(
                    "'{}' is not one of {}",
                    self.general.default_format,
                    OUTPUT_FORMATS.join(", ")
                ),
            });
        }
        if self.general.actor.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "general.actor".to_string(),
                reason: "must not be empty".to_string(),
            });
        }
        Ok(())
    }

    /// Defaults, then the user-global file, then the project file.
    fn base_figment() -> Figment {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        if let Some(global_path) = Self::global_config_path() {
            if global_path.exists() {
                figment = figment.merge(Toml::file(global_path));
            }
        }

        let local_path = PathBuf::from(PROJECT_CONFIG);
        if local_path.exists() {
            figment = figment.merge(Toml::file(local_path));
        }

        figment
    }

    fn env_provider() -> Env {
        Env::prefixed(ENV_PREFIX).split("__")
    }

    /// Path to the user-global config file.
    #[must_use]
    pub fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("qval").join("config.toml"))
    }

    /// Load `.env` from the workspace root.
    ///
    /// Walks up from `CARGO_MANIFEST_DIR` (if set) looking for `.env`, then
    /// falls back to the current directory. Silently does nothing if none is found.
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
