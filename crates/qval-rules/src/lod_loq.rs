//! LOD/LOQ: limits derived from blank noise and the linearity slope must be
//! positive and ordered.

use qval_stats::lod_loq;
use tracing::debug;

use crate::result::{EvaluationResult, Justification, MetricValue, keys};

/// Evaluate blank responses against a calibration slope.
///
/// The slope must be the project's passed linearity slope; this function does
/// not check where it came from.
///
/// Metrics: `lod`, `loq`.
#[must_use]
pub fn evaluate_lod_loq(blank_responses: &[f64], slope: f64) -> EvaluationResult {
    let (lod, loq) = match lod_loq(blank_responses, slope) {
        Ok(limits) => limits,
        Err(error) => return EvaluationResult::calculation_error(error),
    };

    let passed = lod > 0.0 && loq > 0.0 && lod < loq;

    let mut justification = Justification::new();
    if passed {
        justification.criterion(
            true,
            format!("LOD ({lod:.4}) and LOQ ({loq:.4}) calculated successfully"),
        );
    } else {
        justification.criterion(
            false,
            format!(
                "LOD ({lod:.4}) and LOQ ({loq:.4}) are invalid: both must be positive with LOD < LOQ"
            ),
        );
    }

    debug!(lod, loq, slope, blanks = blank_responses.len(), "lod/loq evaluated");

    EvaluationResult::new(
        passed,
        [
            (keys::LOD, MetricValue::from(lod)),
            (keys::LOQ, MetricValue::from(loq)),
        ],
        &justification,
    )
}
