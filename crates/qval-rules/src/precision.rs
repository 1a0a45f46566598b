//! Precision (repeatability): replicate spread within the RSD tier for the
//! number of replicates.

use qval_core::criteria::AcceptanceCriteria;
use qval_stats::{mean, relative_std_dev};
use tracing::debug;

use crate::result::{EvaluationResult, Justification, MetricValue, keys};

/// Append the RSD clause shared with accuracy.
pub(crate) fn rsd_clause(justification: &mut Justification, rsd: f64, limit: f64) -> bool {
    let ok = rsd <= limit;
    justification.criterion(
        ok,
        format!(
            "%RSD ({rsd:.2}%) {} requirement (<= {limit:.1}%)",
            if ok { "meets" } else { "does not meet" }
        ),
    );
    ok
}

/// Evaluate replicate measurements.
///
/// Metrics: `mean`, `rsd`.
#[must_use]
pub fn evaluate_precision(
    replicate_values: &[f64],
    criteria: &AcceptanceCriteria,
) -> EvaluationResult {
    let mean_value = match mean(replicate_values) {
        Ok(value) => value,
        Err(error) => return EvaluationResult::calculation_error(error),
    };
    let rsd = relative_std_dev(replicate_values);
    let rsd_limit = criteria.rsd_limit(replicate_values.len());

    let mut justification = Justification::new();
    let passed = rsd_clause(&mut justification, rsd, rsd_limit);

    debug!(
        mean = mean_value,
        rsd,
        rsd_limit,
        n = replicate_values.len(),
        "precision evaluated"
    );

    EvaluationResult::new(
        passed,
        [
            (keys::MEAN, MetricValue::from(mean_value)),
            (keys::RSD, MetricValue::from(rsd)),
        ],
        &justification,
    )
}
