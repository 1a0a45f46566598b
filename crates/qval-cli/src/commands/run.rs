//! `qval run`: replay a project file through the workflow.
//!
//! ```json
//! {
//!   "project": {"id": "prj-1", "method_name": "Assay", "product_name": "Tablet", "technique": "hplc"},
//!   "submissions": [{"stage": "linearity", "concentrations": [...], "responses": [...]}],
//!   "review": {"reviewer": "rev", "comment": "ok"},
//!   "approve": {"approver": "qa"},
//!   "report": true
//! }
//! ```
//!
//! A rejected submission (duplicate, missing prerequisite, wrong stage) is
//! listed in the output and leaves the project unchanged; replay continues.
//! Review, approval and report failures abort the run.

use anyhow::Context;
use qval_config::QvalConfig;
use qval_core::entities::{Actor, AuditEntry, Project};
use qval_core::enums::{ProjectStatus, Role, StageKind, Technique};
use qval_core::responses::{ValidationReport, WorkflowStateResponse};
use qval_core::submissions::Submission;
use qval_rules::EvaluationResult;
use qval_workflow::ProjectLedger;
use serde::{Deserialize, Serialize};

use crate::bootstrap::ledger_settings;
use crate::cli::GlobalFlags;
use crate::cli::root_commands::RunArgs;
use crate::commands::read_json;
use crate::output::output;

#[derive(Debug, Deserialize)]
pub struct RunFile {
    pub project: ProjectSpec,
    #[serde(default)]
    pub submissions: Vec<Submission>,
    #[serde(default)]
    pub review: Option<ReviewSpec>,
    #[serde(default)]
    pub approve: Option<ApproveSpec>,
    #[serde(default)]
    pub report: bool,
}

#[derive(Debug, Deserialize)]
pub struct ProjectSpec {
    pub id: String,
    pub method_name: String,
    pub product_name: String,
    pub technique: Technique,
    /// Defaults to `general.actor`.
    #[serde(default)]
    pub created_by: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ReviewSpec {
    pub reviewer: String,
    #[serde(default)]
    pub comment: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ApproveSpec {
    pub approver: String,
}

#[derive(Debug, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum StepLine {
    Evaluated {
        stage: StageKind,
        status: ProjectStatus,
        result: EvaluationResult,
    },
    Rejected {
        stage: StageKind,
        error: String,
    },
}

#[derive(Debug, Serialize)]
pub struct RunSummary {
    pub project: Project,
    pub steps: Vec<StepLine>,
    pub workflow: WorkflowStateResponse,
    pub report: Option<ValidationReport>,
    pub audit: Vec<AuditEntry>,
}

/// Handle `qval run`.
pub fn handle(args: &RunArgs, config: &QvalConfig, flags: &GlobalFlags) -> anyhow::Result<()> {
    let file: RunFile = read_json(&args.input)?;
    let summary = execute(file, config)?;
    output(&summary, flags.format)
}

pub fn execute(file: RunFile, config: &QvalConfig) -> anyhow::Result<RunSummary> {
    let spec = file.project;
    let analyst = Actor::new(
        spec.created_by.unwrap_or_else(|| config.general.actor.clone()),
        Role::Analyst,
    );
    let project = Project::draft(
        spec.id,
        spec.method_name,
        spec.product_name,
        spec.technique,
        analyst.username.clone(),
    );

    let mut ledger = ProjectLedger::create(project, &analyst, ledger_settings(config));
    ledger.start_validation(&analyst)?;

    let steps = file
        .submissions
        .iter()
        .map(|submission| match ledger.submit(submission, &analyst) {
            Ok(outcome) => StepLine::Evaluated {
                stage: outcome.stage,
                status: outcome.status,
                result: outcome.result,
            },
            Err(error) => StepLine::Rejected {
                stage: submission.stage(),
                error: error.to_string(),
            },
        })
        .collect();

    if let Some(review) = file.review {
        let reviewer = Actor::new(review.reviewer, Role::Reviewer);
        ledger
            .review(&reviewer, review.comment)
            .context("review failed")?;
    }
    if let Some(approve) = file.approve {
        let approver = Actor::new(approve.approver, Role::Qa);
        ledger.approve(&approver).context("approval failed")?;
    }
    let report = if file.report {
        let author = ledger
            .project()
            .qa_approver
            .clone()
            .unwrap_or_else(|| analyst.username.clone());
        let actor = Actor::new(author, Role::Qa);
        Some(
            ledger
                .generate_report(&actor)
                .context("report generation failed")?,
        )
    } else {
        None
    };

    Ok(RunSummary {
        project: ledger.project().clone(),
        steps,
        workflow: ledger.workflow_state(),
        report,
        audit: ledger.audit_log().to_vec(),
    })
}
