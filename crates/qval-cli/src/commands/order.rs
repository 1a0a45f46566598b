use qval_core::enums::{ProjectStatus, StageKind};
use qval_workflow::WORKFLOW_ORDER;
use serde::Serialize;

use crate::cli::GlobalFlags;
use crate::output::output;

#[derive(Debug, Serialize)]
struct OrderLine {
    position: usize,
    status: ProjectStatus,
    stage: Option<StageKind>,
}

/// Handle `qval order`.
pub fn handle(flags: &GlobalFlags) -> anyhow::Result<()> {
    output(&order_lines(), flags.format)
}

fn order_lines() -> Vec<OrderLine> {
    WORKFLOW_ORDER
        .iter()
        .enumerate()
        .map(|(idx, status)| OrderLine {
            position: idx + 1,
            status: *status,
            stage: status.stage(),
        })
        .collect()
}
