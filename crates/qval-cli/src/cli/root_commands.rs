use std::path::PathBuf;

use clap::{Args, Subcommand, ValueEnum};
use qval_core::enums::{ProjectStatus, StageKind};

/// Top-level command tree.
#[derive(Clone, Debug, Subcommand)]
pub enum Commands {
    /// Evaluate one stage payload against the acceptance criteria.
    Evaluate(EvaluateArgs),
    /// Replay a project file through the full workflow.
    Run(RunArgs),
    /// Show allowed actions and locked steps for a status.
    Workflow(WorkflowArgs),
    /// Print the workflow order.
    Order,
}

#[derive(Clone, Debug, Args)]
pub struct EvaluateArgs {
    /// Stage: linearity, accuracy, precision, lod_loq
    pub stage: StageKind,

    /// JSON payload for the stage
    #[arg(short, long)]
    pub input: PathBuf,

    /// Linearity slope (required for lod_loq)
    #[arg(long)]
    pub slope: Option<f64>,
}

#[derive(Clone, Debug, Args)]
pub struct RunArgs {
    /// JSON project file: project fields, submissions, optional review/approve/report
    #[arg(short, long)]
    pub input: PathBuf,
}

#[derive(Clone, Debug, Args)]
pub struct WorkflowArgs {
    /// Project status
    pub status: ProjectStatus,

    /// Outcome of the current stage's submission, if one was made
    #[arg(long)]
    pub outcome: Option<Outcome>,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, ValueEnum)]
pub enum Outcome {
    Pass,
    Fail,
}
