//! Cross-cutting error types for qval.
//!
//! These are precondition violations: the caller asked for something the
//! workflow does not allow. A failed experiment is never one of these; it is an
//! `EvaluationResult` with status `FAIL`.

use thiserror::Error;

use crate::enums::{ProjectStatus, StageKind};

/// Errors that can be raised by any qval crate.
#[derive(Debug, Error, PartialEq)]
pub enum CoreError {
    /// A record already exists for this stage of the project.
    #[error("{stage} data already submitted for project {project_id}")]
    DuplicateSubmission {
        project_id: String,
        stage: StageKind,
    },

    /// A stage was attempted before the stages it depends on passed.
    #[error("Prerequisite not met for {stage}: {reason}")]
    PrerequisiteNotMet { stage: StageKind, reason: String },

    /// A workflow action was attempted from a status that does not allow it.
    #[error("Invalid transition: cannot {action} from {from}")]
    InvalidTransition { from: ProjectStatus, action: String },

    /// Data failed validation (shape, format, constraints).
    #[error("Validation error: {0}")]
    Validation(String),
}

impl CoreError {
    pub fn invalid_transition(from: ProjectStatus, action: impl Into<String>) -> Self {
        Self::InvalidTransition {
            from,
            action: action.into(),
        }
    }

    pub fn prerequisite(stage: StageKind, reason: impl Into<String>) -> Self {
        Self::PrerequisiteNotMet {
            stage,
            reason: reason.into(),
        }
    }
}
