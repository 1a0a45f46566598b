//! Status enums, stage kinds, and categorical fields for qval.
//!
//! All enums use `snake_case` serialization unless noted otherwise.
//! [`WORKFLOW_ORDER`] is the one place the validation sequence is declared;
//! every ordering question (next stage, locked steps, report layout) is
//! answered by querying it.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;

// ---------------------------------------------------------------------------
// Technique / Guideline
// ---------------------------------------------------------------------------

/// Analytical technique of the method under validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum Technique {
    Hplc,
    Uv,
}

impl Technique {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Hplc => "hplc",
            Self::Uv => "uv",
        }
    }

    /// Display name used in reports.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Hplc => "HPLC",
            Self::Uv => "UV",
        }
    }
}

impl fmt::Display for Technique {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Regulatory guideline the acceptance criteria come from.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema,
)]
#[serde(rename_all = "snake_case")]
pub enum Guideline {
    #[default]
    IchQ2,
}

impl Guideline {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::IchQ2 => "ich_q2",
        }
    }

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::IchQ2 => "ICH Q2",
        }
    }
}

impl fmt::Display for Guideline {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// StageKind
// ---------------------------------------------------------------------------

/// One of the four evaluated validation stages.
///
/// Review and approval are project statuses, not stages: nothing is
/// submitted or evaluated for them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum StageKind {
    Linearity,
    Accuracy,
    Precision,
    LodLoq,
}

impl StageKind {
    /// The project status a project sits in while this stage is open.
    #[must_use]
    pub const fn status(self) -> ProjectStatus {
        match self {
            Self::Linearity => ProjectStatus::Linearity,
            Self::Accuracy => ProjectStatus::Accuracy,
            Self::Precision => ProjectStatus::Precision,
            Self::LodLoq => ProjectStatus::LodLoq,
        }
    }

    /// The stage that follows this one, or `None` after LOD/LOQ.
    #[must_use]
    pub fn next(self) -> Option<Self> {
        self.status().next_in_order().and_then(ProjectStatus::stage)
    }

    /// All evaluated stages in workflow order.
    pub fn in_order() -> impl Iterator<Item = Self> {
        WORKFLOW_ORDER.iter().filter_map(|status| status.stage())
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Linearity => "linearity",
            Self::Accuracy => "accuracy",
            Self::Precision => "precision",
            Self::LodLoq => "lod_loq",
        }
    }

    /// Display name used in reports and justifications.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Linearity => "Linearity",
            Self::Accuracy => "Accuracy",
            Self::Precision => "Precision",
            Self::LodLoq => "LOD/LOQ",
        }
    }
}

impl fmt::Display for StageKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for StageKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "linearity" => Ok(Self::Linearity),
            "accuracy" => Ok(Self::Accuracy),
            "precision" => Ok(Self::Precision),
            "lod_loq" | "lod-loq" => Ok(Self::LodLoq),
            other => Err(format!("unknown stage '{other}'")),
        }
    }
}

// ---------------------------------------------------------------------------
// ProjectStatus
// ---------------------------------------------------------------------------

/// Fixed validation sequence. `Draft` precedes it and is not part of it.
pub static WORKFLOW_ORDER: [ProjectStatus; 6] = [
    ProjectStatus::Linearity,
    ProjectStatus::Accuracy,
    ProjectStatus::Precision,
    ProjectStatus::LodLoq,
    ProjectStatus::Review,
    ProjectStatus::Approved,
];

/// Status of a validation project.
///
/// ```text
/// draft → linearity → accuracy → precision → lod_loq → review → approved
/// ```
///
/// A failed stage keeps the project at that status.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema,
)]
#[serde(rename_all = "snake_case")]
pub enum ProjectStatus {
    #[default]
    Draft,
    Linearity,
    Accuracy,
    Precision,
    LodLoq,
    Review,
    Approved,
}

impl ProjectStatus {
    /// Position in [`WORKFLOW_ORDER`], `None` for `Draft`.
    #[must_use]
    pub fn order_index(self) -> Option<usize> {
        WORKFLOW_ORDER.iter().position(|status| *status == self)
    }

    /// The status after this one in [`WORKFLOW_ORDER`].
    #[must_use]
    pub fn next_in_order(self) -> Option<Self> {
        match self.order_index() {
            None => WORKFLOW_ORDER.first().copied(),
            Some(idx) => WORKFLOW_ORDER.get(idx + 1).copied(),
        }
    }

    /// Valid next states from the current state.
    #[must_use]
    pub fn allowed_next_states(self) -> &'static [Self] {
        let start = self.order_index().map_or(0, |idx| idx + 1);
        let end = (start + 1).min(WORKFLOW_ORDER.len());
        &WORKFLOW_ORDER[start.min(end)..end]
    }

    /// Check whether transitioning to `next` is allowed.
    #[must_use]
    pub fn can_transition_to(self, next: Self) -> bool {
        self.allowed_next_states().contains(&next)
    }

    /// The evaluated stage open at this status, if any.
    #[must_use]
    pub const fn stage(self) -> Option<StageKind> {
        match self {
            Self::Linearity => Some(StageKind::Linearity),
            Self::Accuracy => Some(StageKind::Accuracy),
            Self::Precision => Some(StageKind::Precision),
            Self::LodLoq => Some(StageKind::LodLoq),
            Self::Draft | Self::Review | Self::Approved => None,
        }
    }

    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Approved)
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Draft => "draft",
            Self::Linearity => "linearity",
            Self::Accuracy => "accuracy",
            Self::Precision => "precision",
            Self::LodLoq => "lod_loq",
            Self::Review => "review",
            Self::Approved => "approved",
        }
    }
}

impl fmt::Display for ProjectStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<StageKind> for ProjectStatus {
    fn from(stage: StageKind) -> Self {
        stage.status()
    }
}

impl std::str::FromStr for ProjectStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "draft" => Ok(Self::Draft),
            "review" => Ok(Self::Review),
            "approved" => Ok(Self::Approved),
            other => other
                .parse::<StageKind>()
                .map(StageKind::status)
                .map_err(|_| format!("unknown project status '{other}'")),
        }
    }
}

// ---------------------------------------------------------------------------
// AccuracyLevel
// ---------------------------------------------------------------------------

/// Spike level of an accuracy run, as percent of nominal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
pub enum AccuracyLevel {
    #[serde(rename = "80")]
    Low,
    #[serde(rename = "100")]
    Nominal,
    #[serde(rename = "120")]
    High,
}

impl AccuracyLevel {
    #[must_use]
    pub const fn percent(self) -> f64 {
        match self {
            Self::Low => 80.0,
            Self::Nominal => 100.0,
            Self::High => 120.0,
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Low => "80",
            Self::Nominal => "100",
            Self::High => "120",
        }
    }
}

impl fmt::Display for AccuracyLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// EvaluationStatus
// ---------------------------------------------------------------------------

/// Verdict of a rule evaluator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "UPPERCASE")]
pub enum EvaluationStatus {
    Pass,
    Fail,
}

impl EvaluationStatus {
    #[must_use]
    pub const fn from_passed(passed: bool) -> Self {
        if passed { Self::Pass } else { Self::Fail }
    }

    #[must_use]
    pub const fn passed(self) -> bool {
        matches!(self, Self::Pass)
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pass => "PASS",
            Self::Fail => "FAIL",
        }
    }
}

impl fmt::Display for EvaluationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// WorkflowAction
// ---------------------------------------------------------------------------

/// Actions a caller may offer for a project in its current state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum WorkflowAction {
    StartValidation,
    SubmitLinearity,
    SubmitAccuracy,
    SubmitPrecision,
    SubmitLodLoq,
    SubmitReview,
    ReviewProject,
    GenerateReport,
    ViewAuditLog,
}

impl WorkflowAction {
    /// The submit action for `stage`.
    #[must_use]
    pub const fn submit(stage: StageKind) -> Self {
        match stage {
            StageKind::Linearity => Self::SubmitLinearity,
            StageKind::Accuracy => Self::SubmitAccuracy,
            StageKind::Precision => Self::SubmitPrecision,
            StageKind::LodLoq => Self::SubmitLodLoq,
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::StartValidation => "start_validation",
            Self::SubmitLinearity => "submit_linearity",
            Self::SubmitAccuracy => "submit_accuracy",
            Self::SubmitPrecision => "submit_precision",
            Self::SubmitLodLoq => "submit_lod_loq",
            Self::SubmitReview => "submit_review",
            Self::ReviewProject => "review_project",
            Self::GenerateReport => "generate_report",
            Self::ViewAuditLog => "view_audit_log",
        }
    }
}

impl fmt::Display for WorkflowAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Role
// ---------------------------------------------------------------------------

/// Role of the actor performing an action. Recorded, never enforced here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Analyst,
    Reviewer,
    Qa,
}

impl Role {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Analyst => "analyst",
            Self::Reviewer => "reviewer",
            Self::Qa => "qa",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// AuditAction
// ---------------------------------------------------------------------------

/// Action recorded in an audit entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum AuditAction {
    Create,
    Submit,
    StatusChanged,
    Reset,
    Review,
    Approve,
    Report,
}

impl AuditAction {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Create => "create",
            Self::Submit => "submit",
            Self::StatusChanged => "status_changed",
            Self::Reset => "reset",
            Self::Review => "review",
            Self::Approve => "approve",
            Self::Report => "report",
        }
    }
}

impl fmt::Display for AuditAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    // --- Serde roundtrip tests ---

    macro_rules! test_serde_roundtrip {
        ($name:ident, $ty:ty, $variant:expr, $expected_str:expr) => {
            #[test]
            fn $name() {
                let val = $variant;
                let json = serde_json::to_string(&val).unwrap();
                assert_eq!(json, format!("\"{}\"", $expected_str));
                let recovered: $ty = serde_json::from_str(&json).unwrap();
                assert_eq!(recovered, val);
            }
        };
    }

    test_serde_roundtrip!(technique_hplc, Technique, Technique::Hplc, "hplc");
    test_serde_roundtrip!(guideline_ich, Guideline, Guideline::IchQ2, "ich_q2");
    test_serde_roundtrip!(stage_lod_loq, StageKind, StageKind::LodLoq, "lod_loq");
    test_serde_roundtrip!(
        status_lod_loq,
        ProjectStatus,
        ProjectStatus::LodLoq,
        "lod_loq"
    );
    test_serde_roundtrip!(status_draft, ProjectStatus, ProjectStatus::Draft, "draft");
    test_serde_roundtrip!(level_low, AccuracyLevel, AccuracyLevel::Low, "80");
    test_serde_roundtrip!(level_high, AccuracyLevel, AccuracyLevel::High, "120");
    test_serde_roundtrip!(
        evaluation_pass,
        EvaluationStatus,
        EvaluationStatus::Pass,
        "PASS"
    );
    test_serde_roundtrip!(
        action_submit_lod_loq,
        WorkflowAction,
        WorkflowAction::SubmitLodLoq,
        "submit_lod_loq"
    );
    test_serde_roundtrip!(
        audit_status_changed,
        AuditAction,
        AuditAction::StatusChanged,
        "status_changed"
    );
    test_serde_roundtrip!(role_qa, Role, Role::Qa, "qa");

    // --- Order / transition tests ---

    #[test]
    fn stages_follow_workflow_order() {
        let stages: Vec<_> = StageKind::in_order().collect();
        assert_eq!(
            stages,
            vec![
                StageKind::Linearity,
                StageKind::Accuracy,
                StageKind::Precision,
                StageKind::LodLoq
            ]
        );
    }

    #[rstest]
    #[case(StageKind::Linearity, Some(StageKind::Accuracy))]
    #[case(StageKind::Accuracy, Some(StageKind::Precision))]
    #[case(StageKind::Precision, Some(StageKind::LodLoq))]
    #[case(StageKind::LodLoq, None)]
    fn stage_next(#[case] stage: StageKind, #[case] expected: Option<StageKind>) {
        assert_eq!(stage.next(), expected);
    }

    #[test]
    fn project_valid_transitions() {
        assert!(ProjectStatus::Draft.can_transition_to(ProjectStatus::Linearity));
        assert!(ProjectStatus::Linearity.can_transition_to(ProjectStatus::Accuracy));
        assert!(ProjectStatus::LodLoq.can_transition_to(ProjectStatus::Review));
        assert!(ProjectStatus::Review.can_transition_to(ProjectStatus::Approved));
    }

    #[test]
    fn project_invalid_transitions() {
        assert!(!ProjectStatus::Draft.can_transition_to(ProjectStatus::Accuracy));
        assert!(!ProjectStatus::Accuracy.can_transition_to(ProjectStatus::Linearity));
        assert!(!ProjectStatus::Linearity.can_transition_to(ProjectStatus::Review));
    }

    #[test]
    fn approved_is_terminal() {
        assert!(ProjectStatus::Approved.is_terminal());
        assert!(ProjectStatus::Approved.allowed_next_states().is_empty());
    }

    #[test]
    fn draft_has_no_order_index() {
        assert_eq!(ProjectStatus::Draft.order_index(), None);
        assert_eq!(ProjectStatus::Review.order_index(), Some(4));
    }

    #[test]
    fn parse_status_and_stage() {
        assert_eq!("lod_loq".parse::<ProjectStatus>(), Ok(ProjectStatus::LodLoq));
        assert_eq!("review".parse::<ProjectStatus>(), Ok(ProjectStatus::Review));
        assert_eq!("lod-loq".parse::<StageKind>(), Ok(StageKind::LodLoq));
        assert!("calibration".parse::<StageKind>().is_err());
    }

    #[test]
    fn display_matches_as_str() {
        assert_eq!(format!("{}", StageKind::LodLoq), "lod_loq");
        assert_eq!(format!("{}", ProjectStatus::Approved), "approved");
        assert_eq!(format!("{}", EvaluationStatus::Fail), "FAIL");
        assert_eq!(format!("{}", WorkflowAction::ViewAuditLog), "view_audit_log");
        assert_eq!(format!("{}", AccuracyLevel::Nominal), "100");
        assert_eq!(format!("{}", AuditAction::Approve), "approve");
    }
}
