//! Response shapes handed to the reporting and API layers.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::enums::{EvaluationStatus, Guideline, ProjectStatus, StageKind, Technique, WorkflowAction};

/// Snapshot of where a project stands in the workflow.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct WorkflowStateResponse {
    pub current_step: ProjectStatus,
    pub completed_steps: Vec<StageKind>,
    pub allowed_next_actions: Vec<WorkflowAction>,
    pub locked_steps: Vec<ProjectStatus>,
}

/// One stage line of a validation report.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct ReportStageLine {
    pub stage: StageKind,
    pub label: String,
    pub status: EvaluationStatus,
    pub metrics: Vec<(String, f64)>,
}

/// Structured content of a validation report. Rendering happens elsewhere.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct ValidationReport {
    pub project_id: String,
    pub title: String,
    pub product_name: String,
    pub technique: Technique,
    pub guideline: Guideline,
    pub reviewer: Option<String>,
    pub qa_approver: Option<String>,
    pub stages: Vec<ReportStageLine>,
}
