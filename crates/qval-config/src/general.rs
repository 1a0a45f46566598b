//! General CLI defaults.

use serde::{Deserialize, Serialize};

/// Output formats the CLI understands.
pub const OUTPUT_FORMATS: [&str; 2] = ["text", "json"];

fn default_format() -> String {
    "text".to_string()
}

fn default_actor() -> String {
    "analyst".to_string()
}

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
pub struct GeneralConfig {
    /// Output format when `--format` is not given (`text` or `json`).
    #[serde(default = "default_format")]
    pub default_format: String,

    /// Username recorded in audit entries for CLI-driven actions.
    #[serde(default = "default_actor")]
    pub actor: String,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            default_format: default_format(),
            actor: default_actor(),
        }
    }
}
