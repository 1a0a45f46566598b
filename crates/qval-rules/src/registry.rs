//! Stage dispatch: one evaluator per [`StageKind`], selected by exhaustive match.
//!
//! Cross-stage inputs travel in [`EvaluationContext`]. LOD/LOQ needs the
//! linearity slope; when it is absent the dispatch fails with
//! `CoreError::PrerequisiteNotMet` before any evaluation runs.

use qval_core::criteria::AcceptanceCriteria;
use qval_core::enums::StageKind;
use qval_core::errors::CoreError;
use qval_core::submissions::Submission;

use crate::result::EvaluationResult;
use crate::{evaluate_accuracy, evaluate_linearity, evaluate_lod_loq, evaluate_precision};

/// Inputs an evaluator needs beyond its own payload.
#[derive(Debug, Clone, Copy)]
pub struct EvaluationContext<'a> {
    pub criteria: &'a AcceptanceCriteria,
    /// Slope of the project's passed linearity record, if there is one.
    pub linearity_slope: Option<f64>,
}

impl<'a> EvaluationContext<'a> {
    #[must_use]
    pub const fn new(criteria: &'a AcceptanceCriteria) -> Self {
        Self {
            criteria,
            linearity_slope: None,
        }
    }

    #[must_use]
    pub const fn with_linearity_slope(mut self, slope: f64) -> Self {
        self.linearity_slope = Some(slope);
        self
    }
}

/// A rule evaluator for one stage.
pub trait StageEvaluator: Send + Sync {
    fn stage(&self) -> StageKind;

    /// Evaluate `submission`.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::Validation` if the submission belongs to another
    /// stage, or `CoreError::PrerequisiteNotMet` if a cross-stage input is
    /// missing from `ctx`.
    fn evaluate(
        &self,
        submission: &Submission,
        ctx: &EvaluationContext<'_>,
    ) -> Result<EvaluationResult, CoreError>;
}

fn wrong_stage(expected: StageKind, submission: &Submission) -> CoreError {
    CoreError::Validation(format!(
        "{expected} evaluator received a {} submission",
        submission.stage()
    ))
}

struct LinearityRule;
struct AccuracyRule;
struct PrecisionRule;
struct LodLoqRule;

impl StageEvaluator for LinearityRule {
    fn stage(&self) -> StageKind {
        StageKind::Linearity
    }

    fn evaluate(
        &self,
        submission: &Submission,
        ctx: &EvaluationContext<'_>,
    ) -> Result<EvaluationResult, CoreError> {
        let Submission::Linearity(payload) = submission else {
            return Err(wrong_stage(self.stage(), submission));
        };
        Ok(evaluate_linearity(
            &payload.concentrations,
            &payload.responses,
            ctx.criteria,
        ))
    }
}

impl StageEvaluator for AccuracyRule {
    fn stage(&self) -> StageKind {
        StageKind::Accuracy
    }

    fn evaluate(
        &self,
        submission: &Submission,
        ctx: &EvaluationContext<'_>,
    ) -> Result<EvaluationResult, CoreError> {
        let Submission::Accuracy(payload) = submission else {
            return Err(wrong_stage(self.stage(), submission));
        };
        Ok(evaluate_accuracy(
            payload.level,
            &payload.measured_values,
            ctx.criteria,
        ))
    }
}

impl StageEvaluator for PrecisionRule {
    fn stage(&self) -> StageKind {
        StageKind::Precision
    }

    fn evaluate(
        &self,
        submission: &Submission,
        ctx: &EvaluationContext<'_>,
    ) -> Result<EvaluationResult, CoreError> {
        let Submission::Precision(payload) = submission else {
            return Err(wrong_stage(self.stage(), submission));
        };
        Ok(evaluate_precision(&payload.replicate_values, ctx.criteria))
    }
}

impl StageEvaluator for LodLoqRule {
    fn stage(&self) -> StageKind {
        StageKind::LodLoq
    }

    fn evaluate(
        &self,
        submission: &Submission,
        ctx: &EvaluationContext<'_>,
    ) -> Result<EvaluationResult, CoreError> {
        let Submission::LodLoq(payload) = submission else {
            return Err(wrong_stage(self.stage(), submission));
        };
        let slope = ctx.linearity_slope.ok_or_else(|| {
            CoreError::prerequisite(
                StageKind::LodLoq,
                "Linearity must be completed and passed first",
            )
        })?;
        Ok(evaluate_lod_loq(&payload.blank_responses, slope))
    }
}

/// The evaluator registered for `stage`.
#[must_use]
pub fn evaluator_for(stage: StageKind) -> &'static dyn StageEvaluator {
    match stage {
        StageKind::Linearity => &LinearityRule,
        StageKind::Accuracy => &AccuracyRule,
        StageKind::Precision => &PrecisionRule,
        StageKind::LodLoq => &LodLoqRule,
    }
}

/// Evaluate a submission with the evaluator for its own stage.
///
/// # Errors
///
/// Returns `CoreError::PrerequisiteNotMet` for a LOD/LOQ submission without a
/// linearity slope in `ctx`.
pub fn evaluate_submission(
    submission: &Submission,
    ctx: &EvaluationContext<'_>,
) -> Result<EvaluationResult, CoreError> {
    evaluator_for(submission.stage()).evaluate(submission, ctx)
}

#[cfg(test)]
mod tests {
    use super::*;
    use qval_core::submissions::{LinearitySubmission, LodLoqSubmission, PrecisionSubmission};

    #[test]
    fn every_stage_has_its_own_evaluator() {
        for stage in StageKind::in_order() {
            assert_eq!(evaluator_for(stage).stage(), stage);
        }
    }

    #[test]
    fn lod_loq_without_slope_is_prerequisite_failure() {
        let criteria = AcceptanceCriteria::default();
        let submission = Submission::LodLoq(LodLoqSubmission {
            blank_responses: vec![1.0, 2.0, 3.0],
        });
        let err = evaluate_submission(&submission, &EvaluationContext::new(&criteria)).unwrap_err();
        assert!(matches!(
            err,
            CoreError::PrerequisiteNotMet {
                stage: StageKind::LodLoq,
                ..
            }
        ));
    }

    #[test]
    fn lod_loq_with_slope_evaluates() {
        let criteria = AcceptanceCriteria::default();
        let submission = Submission::LodLoq(LodLoqSubmission {
            blank_responses: vec![1.0, 2.0, 3.0],
        });
        let ctx = EvaluationContext::new(&criteria).with_linearity_slope(100.0);
        assert!(evaluate_submission(&submission, &ctx).unwrap().passed());
    }

    #[test]
    fn mismatched_submission_rejected() {
        let criteria = AcceptanceCriteria::default();
        let submission = Submission::Precision(PrecisionSubmission {
            replicate_values: vec![1.0, 1.1, 0.9],
        });
        let err = evaluator_for(StageKind::Linearity)
            .evaluate(&submission, &EvaluationContext::new(&criteria))
            .unwrap_err();
        assert_eq!(
            err,
            CoreError::Validation("linearity evaluator received a precision submission".into())
        );
    }

    #[test]
    fn dispatch_routes_by_payload() {
        let criteria = AcceptanceCriteria::default();
        let submission = Submission::Linearity(LinearitySubmission {
            concentrations: vec![1.0, 2.0, 3.0],
            responses: vec![10.0, 20.0, 30.0],
        });
        let result = evaluate_submission(&submission, &EvaluationContext::new(&criteria)).unwrap();
        assert!(result.metric(crate::keys::SLOPE).is_some());
    }
}
