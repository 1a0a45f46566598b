//! Workflow state machine.
//!
//! ```text
//! draft ─start_validation→ linearity ─pass→ accuracy ─pass→ precision ─pass→ lod_loq ─pass→ review ─approve→ approved
//!                            │fail          │fail            │fail            │fail
//!                            └ stays        └ stays          └ stays          └ stays
//! ```
//!
//! Every function here is pure: it maps a status (and, for the views, the
//! current stage's record) to a new status or a hint list.

use qval_core::entities::ValidationStepRecord;
use qval_core::enums::{ProjectStatus, StageKind, WorkflowAction};
use qval_core::errors::CoreError;

pub use qval_core::enums::WORKFLOW_ORDER;

/// `Draft → Linearity`.
///
/// # Errors
///
/// Returns `CoreError::InvalidTransition` from any status other than `Draft`.
pub fn start_validation(status: ProjectStatus) -> Result<ProjectStatus, CoreError> {
    if status != ProjectStatus::Draft {
        return Err(CoreError::invalid_transition(
            status,
            WorkflowAction::StartValidation.as_str(),
        ));
    }
    Ok(ProjectStatus::Linearity)
}

/// Next status after `stage` was evaluated with outcome `passed`.
///
/// A pass moves to the next status in [`WORKFLOW_ORDER`]; a fail keeps the
/// project at the stage just attempted.
///
/// # Errors
///
/// Returns `CoreError::InvalidTransition` if `status` is not the status of
/// `stage`.
pub fn advance(
    status: ProjectStatus,
    stage: StageKind,
    passed: bool,
) -> Result<ProjectStatus, CoreError> {
    if status != stage.status() {
        return Err(CoreError::invalid_transition(
            status,
            format!("advance {stage}"),
        ));
    }
    if !passed {
        return Ok(status);
    }
    status
        .next_in_order()
        .filter(|next| status.can_transition_to(*next))
        .ok_or_else(|| CoreError::invalid_transition(status, format!("advance {stage}")))
}

/// `Review → Approved`. Whether a review was recorded is the caller's check.
///
/// # Errors
///
/// Returns `CoreError::InvalidTransition` from any status other than `Review`.
pub fn approve(status: ProjectStatus) -> Result<ProjectStatus, CoreError> {
    if status != ProjectStatus::Review {
        return Err(CoreError::invalid_transition(status, "approve_project"));
    }
    Ok(ProjectStatus::Approved)
}

/// How far the current stage has got.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StageProgress {
    /// No record yet.
    Open,
    Passed,
    /// Failed or incomplete record.
    Blocked,
}

impl StageProgress {
    #[must_use]
    pub fn of(record: Option<&ValidationStepRecord>) -> Self {
        match record {
            None => Self::Open,
            Some(record) if record.is_passed() => Self::Passed,
            Some(_) => Self::Blocked,
        }
    }
}

/// Actions to offer in `status`, given the current stage's record if any.
///
/// A failed (or incomplete) record blocks the stage: no actions.
/// Role restrictions on review and approval actions are the caller's job.
#[must_use]
pub fn allowed_actions(
    status: ProjectStatus,
    current_record: Option<&ValidationStepRecord>,
) -> Vec<WorkflowAction> {
    next_actions(status, StageProgress::of(current_record))
}

/// [`allowed_actions`] keyed on progress instead of a stored record.
#[must_use]
pub fn next_actions(status: ProjectStatus, progress: StageProgress) -> Vec<WorkflowAction> {
    match status {
        ProjectStatus::Draft => vec![WorkflowAction::StartValidation],
        ProjectStatus::Review => vec![WorkflowAction::ReviewProject],
        ProjectStatus::Approved => {
            vec![WorkflowAction::GenerateReport, WorkflowAction::ViewAuditLog]
        }
        ProjectStatus::Linearity
        | ProjectStatus::Accuracy
        | ProjectStatus::Precision
        | ProjectStatus::LodLoq => {
            let Some(stage) = status.stage() else {
                return Vec::new();
            };
            match progress {
                StageProgress::Open => vec![WorkflowAction::submit(stage)],
                StageProgress::Passed => match stage.next() {
                    Some(next) => vec![WorkflowAction::submit(next)],
                    None => vec![WorkflowAction::SubmitReview],
                },
                StageProgress::Blocked => Vec::new(),
            }
        }
    }
}

/// Steps a UI should show as locked: everything before the current position,
/// plus `Review` and `Approved` until the project reaches them.
#[must_use]
pub fn locked_steps(status: ProjectStatus) -> Vec<ProjectStatus> {
    let current = status.order_index();
    WORKFLOW_ORDER
        .iter()
        .enumerate()
        .filter(|(idx, step)| match current {
            Some(current) if *idx < current => true,
            _ => {
                matches!(step, ProjectStatus::Review | ProjectStatus::Approved)
                    && current.is_none_or(|current| *idx > current)
            }
        })
        .map(|(_, step)| *step)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use pretty_assertions::assert_eq;
    use qval_core::entities::{MeasurementSet, PrecisionData};
    use rstest::rstest;

    fn record(stage: StageKind, passed: Option<bool>) -> ValidationStepRecord {
        ValidationStepRecord {
            project_id: "prj-1".into(),
            stage,
            completed: passed.is_some(),
            passed,
            measurements: MeasurementSet::Precision(PrecisionData {
                replicate_values: vec![1.0],
                mean: None,
                rsd: None,
            }),
            created_at: Utc::now(),
        }
    }

    #[test]
    fn start_only_from_draft() {
        assert_eq!(
            start_validation(ProjectStatus::Draft),
            Ok(ProjectStatus::Linearity)
        );
        assert!(matches!(
            start_validation(ProjectStatus::Accuracy),
            Err(CoreError::InvalidTransition {
                from: ProjectStatus::Accuracy,
                ..
            })
        ));
    }

    #[rstest]
    #[case(ProjectStatus::Linearity, StageKind::Linearity, true, ProjectStatus::Accuracy)]
    #[case(ProjectStatus::Accuracy, StageKind::Accuracy, true, ProjectStatus::Precision)]
    #[case(ProjectStatus::Precision, StageKind::Precision, true, ProjectStatus::LodLoq)]
    #[case(ProjectStatus::LodLoq, StageKind::LodLoq, true, ProjectStatus::Review)]
    #[case(ProjectStatus::Accuracy, StageKind::Accuracy, false, ProjectStatus::Accuracy)]
    #[case(ProjectStatus::LodLoq, StageKind::LodLoq, false, ProjectStatus::LodLoq)]
    fn advance_outcomes(
        #[case] status: ProjectStatus,
        #[case] stage: StageKind,
        #[case] passed: bool,
        #[case] expected: ProjectStatus,
    ) {
        assert_eq!(advance(status, stage, passed), Ok(expected));
    }

    #[rstest]
    #[case(ProjectStatus::Draft, StageKind::Linearity)]
    #[case(ProjectStatus::Accuracy, StageKind::Linearity)]
    #[case(ProjectStatus::Review, StageKind::LodLoq)]
    #[case(ProjectStatus::Approved, StageKind::Precision)]
    fn advance_from_wrong_status_rejected(#[case] status: ProjectStatus, #[case] stage: StageKind) {
        assert!(matches!(
            advance(status, stage, true),
            Err(CoreError::InvalidTransition { .. })
        ));
    }

    #[test]
    fn approve_only_from_review() {
        assert_eq!(approve(ProjectStatus::Review), Ok(ProjectStatus::Approved));
        assert!(approve(ProjectStatus::LodLoq).is_err());
        assert!(approve(ProjectStatus::Approved).is_err());
    }

    #[test]
    fn actions_for_fixed_states() {
        assert_eq!(
            allowed_actions(ProjectStatus::Draft, None),
            vec![WorkflowAction::StartValidation]
        );
        assert_eq!(
            allowed_actions(ProjectStatus::Review, None),
            vec![WorkflowAction::ReviewProject]
        );
        assert_eq!(
            allowed_actions(ProjectStatus::Approved, None),
            vec![WorkflowAction::GenerateReport, WorkflowAction::ViewAuditLog]
        );
    }

    #[test]
    fn actions_for_open_stage() {
        assert_eq!(
            allowed_actions(ProjectStatus::Precision, None),
            vec![WorkflowAction::SubmitPrecision]
        );
    }

    #[test]
    fn actions_after_passed_record() {
        let passed = record(StageKind::Accuracy, Some(true));
        assert_eq!(
            allowed_actions(ProjectStatus::Accuracy, Some(&passed)),
            vec![WorkflowAction::SubmitPrecision]
        );
        let passed = record(StageKind::LodLoq, Some(true));
        assert_eq!(
            allowed_actions(ProjectStatus::LodLoq, Some(&passed)),
            vec![WorkflowAction::SubmitReview]
        );
    }

    #[rstest]
    #[case(StageProgress::Open, vec![WorkflowAction::SubmitLinearity])]
    #[case(StageProgress::Passed, vec![WorkflowAction::SubmitAccuracy])]
    #[case(StageProgress::Blocked, vec![])]
    fn linearity_actions_by_progress(
        #[case] progress: StageProgress,
        #[case] expected: Vec<WorkflowAction>,
    ) {
        assert_eq!(next_actions(ProjectStatus::Linearity, progress), expected);
    }

    #[test]
    fn failed_or_incomplete_record_blocks() {
        let failed = record(StageKind::Accuracy, Some(false));
        assert!(allowed_actions(ProjectStatus::Accuracy, Some(&failed)).is_empty());
        let pending = record(StageKind::Accuracy, None);
        assert!(allowed_actions(ProjectStatus::Accuracy, Some(&pending)).is_empty());
    }

    #[rstest]
    #[case(ProjectStatus::Draft, vec![ProjectStatus::Review, ProjectStatus::Approved])]
    #[case(ProjectStatus::Linearity, vec![ProjectStatus::Review, ProjectStatus::Approved])]
    #[case(
        ProjectStatus::Precision,
        vec![ProjectStatus::Linearity, ProjectStatus::Accuracy, ProjectStatus::Review, ProjectStatus::Approved]
    )]
    #[case(
        ProjectStatus::Review,
        vec![
            ProjectStatus::Linearity,
            ProjectStatus::Accuracy,
            ProjectStatus::Precision,
            ProjectStatus::LodLoq,
            ProjectStatus::Approved
        ]
    )]
    #[case(
        ProjectStatus::Approved,
        vec![
            ProjectStatus::Linearity,
            ProjectStatus::Accuracy,
            ProjectStatus::Precision,
            ProjectStatus::LodLoq,
            ProjectStatus::Review
        ]
    )]
    fn locked_steps_by_status(#[case] status: ProjectStatus, #[case] expected: Vec<ProjectStatus>) {
        assert_eq!(locked_steps(status), expected);
    }
}
