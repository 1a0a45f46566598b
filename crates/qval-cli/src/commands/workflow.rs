use anyhow::bail;
use qval_core::enums::{ProjectStatus, WorkflowAction};
use qval_workflow::{StageProgress, advance, locked_steps, next_actions};
use serde::Serialize;

use crate::cli::GlobalFlags;
use crate::cli::root_commands::{Outcome, WorkflowArgs};
use crate::output::output;

#[derive(Debug, Serialize)]
struct WorkflowView {
    status: ProjectStatus,
    allowed_next_actions: Vec<WorkflowAction>,
    locked_steps: Vec<ProjectStatus>,
    /// Status the project moves to when the current stage passes.
    next_status: Option<ProjectStatus>,
}

/// Handle `qval workflow`.
pub fn handle(args: &WorkflowArgs, flags: &GlobalFlags) -> anyhow::Result<()> {
    output(&workflow_view(args.status, args.outcome)?, flags.format)
}

fn workflow_view(status: ProjectStatus, outcome: Option<Outcome>) -> anyhow::Result<WorkflowView> {
    let stage = status.stage();
    if outcome.is_some() && stage.is_none() {
        bail!("{status} has no stage to report an outcome for");
    }
    let progress = match outcome {
        None => StageProgress::Open,
        Some(Outcome::Pass) => StageProgress::Passed,
        Some(Outcome::Fail) => StageProgress::Blocked,
    };
    let next_status = match stage {
        Some(stage) => advance(status, stage, true).ok(),
        None => status.next_in_order(),
    };
    Ok(WorkflowView {
        status,
        allowed_next_actions: next_actions(status, progress),
        locked_steps: locked_steps(status),
        next_status,
    })
}
