//! Linearity: the detector response must be proportional to concentration.
//!
//! PASS requires `r² >= r_squared_min` and
//! `|intercept| < intercept_fraction_max * max(responses)`.

use qval_core::criteria::AcceptanceCriteria;
use qval_stats::linear_regression;
use tracing::debug;

use crate::result::{EvaluationResult, Justification, MetricValue, keys};

/// Evaluate a calibration series.
///
/// Metrics: `slope`, `intercept`, `r_squared`.
#[must_use]
pub fn evaluate_linearity(
    concentrations: &[f64],
    responses: &[f64],
    criteria: &AcceptanceCriteria,
) -> EvaluationResult {
    let fit = match linear_regression(concentrations, responses) {
        Ok(fit) => fit,
        Err(error) => return EvaluationResult::calculation_error(error),
    };

    let max_response = responses.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let intercept_limit = criteria.intercept_fraction_max * max_response;

    let r_squared_ok = fit.r_squared >= criteria.r_squared_min;
    let intercept_ok = fit.intercept.abs() < intercept_limit;

    let mut justification = Justification::new();
    justification.criterion(
        r_squared_ok,
        format!(
            "Correlation coefficient (r² = {:.4}) {} requirement (>= {})",
            fit.r_squared,
            if r_squared_ok { "meets" } else { "does not meet" },
            criteria.r_squared_min
        ),
    );
    justification.criterion(
        intercept_ok,
        format!(
            "Y-intercept ({:.4}) is {} (|intercept| < {:.4})",
            fit.intercept,
            if intercept_ok { "acceptable" } else { "too high" },
            intercept_limit
        ),
    );

    debug!(
        slope = fit.slope,
        intercept = fit.intercept,
        r_squared = fit.r_squared,
        points = concentrations.len(),
        "linearity evaluated"
    );

    EvaluationResult::new(
        r_squared_ok && intercept_ok,
        [
            (keys::SLOPE, MetricValue::from(fit.slope)),
            (keys::INTERCEPT, MetricValue::from(fit.intercept)),
            (keys::R_SQUARED, MetricValue::from(fit.r_squared)),
        ],
        &justification,
    )
}
