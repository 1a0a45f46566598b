use std::path::Path;

use anyhow::Context;
use qval_config::QvalConfig;
use serde::de::DeserializeOwned;

use crate::cli::{Commands, GlobalFlags};

pub mod evaluate;
pub mod order;
pub mod run;
pub mod workflow;

/// Dispatch a parsed command to the corresponding handler module.
pub fn dispatch(command: &Commands, config: &QvalConfig, flags: &GlobalFlags) -> anyhow::Result<()> {
    match command {
        Commands::Evaluate(args) => evaluate::handle(args, config, flags),
        Commands::Run(args) => run::handle(args, config, flags),
        Commands::Workflow(args) => workflow::handle(args, flags),
        Commands::Order => order::handle(flags),
    }
}

/// Read and parse a JSON input file.
pub fn read_json<T: DeserializeOwned>(path: &Path) -> anyhow::Result<T> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    serde_json::from_str(&raw).with_context(|| format!("failed to parse {}", path.display()))
}
