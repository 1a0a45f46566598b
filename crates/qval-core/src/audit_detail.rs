//! Typed audit detail payloads.
//!
//! Each audit action can carry a structured `detail` JSON blob. These types
//! give the common shapes a schema.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::enums::{EvaluationStatus, Guideline, ProjectStatus, StageKind, Technique};

/// Detail for `AuditAction::StatusChanged`.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct StatusChangedDetail {
    pub from: ProjectStatus,
    pub to: ProjectStatus,
    pub reason: Option<String>,
}

/// Detail for `AuditAction::Submit`.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct StepSubmittedDetail {
    pub project_name: String,
    pub validation_step: StageKind,
    pub status: EvaluationStatus,
    pub justification: String,
}

/// Detail for `AuditAction::Reset`.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct StageResetDetail {
    pub validation_step: StageKind,
    pub reason: Option<String>,
}

/// Detail for `AuditAction::Review` and `AuditAction::Approve`.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct ReviewDetail {
    pub project_name: String,
    pub project_status: ProjectStatus,
    pub comment: Option<String>,
}

/// Detail for `AuditAction::Create`.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct ProjectCreatedDetail {
    pub project_name: String,
    pub product_name: String,
    pub technique: Technique,
    pub guideline: Guideline,
}
