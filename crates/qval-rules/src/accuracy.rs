//! Accuracy: spiked analyte must be recovered within the accepted window with
//! acceptable spread.
//!
//! Each measured value becomes a recovery percentage against the nominal
//! value for its spike level. PASS requires
//! `recovery_min <= mean_recovery <= recovery_max` and the recovery RSD within
//! the replicate-count tier.

use qval_core::criteria::AcceptanceCriteria;
use qval_core::enums::AccuracyLevel;
use qval_stats::{mean, recovery, relative_std_dev};
use tracing::debug;

use crate::precision::rsd_clause;
use crate::result::{EvaluationResult, Justification, MetricValue, keys};

/// Evaluate measured values at one spike level.
///
/// Metrics: `recoveries` (series), `mean_recovery`, `rsd`.
#[must_use]
pub fn evaluate_accuracy(
    level: AccuracyLevel,
    measured_values: &[f64],
    criteria: &AcceptanceCriteria,
) -> EvaluationResult {
    let theoretical = criteria.recovery_basis.theoretical(level);
    let recoveries: Vec<f64> = measured_values
        .iter()
        .map(|&measured| recovery(theoretical, measured))
        .collect();

    let mean_recovery = match mean(&recoveries) {
        Ok(value) => value,
        Err(error) => return EvaluationResult::calculation_error(error),
    };
    let rsd = relative_std_dev(&recoveries);
    let rsd_limit = criteria.rsd_limit(measured_values.len());

    let recovery_ok = (criteria.recovery_min..=criteria.recovery_max).contains(&mean_recovery);
    let rsd_ok = rsd <= rsd_limit;

    let mut justification = Justification::new();
    justification.criterion(
        recovery_ok,
        format!(
            "Mean recovery ({mean_recovery:.2}%) is {} {}-{}%",
            if recovery_ok { "within" } else { "outside" },
            criteria.recovery_min,
            criteria.recovery_max
        ),
    );
    rsd_clause(&mut justification, rsd, rsd_limit);

    debug!(
        %level,
        mean_recovery,
        rsd,
        rsd_limit,
        n = measured_values.len(),
        "accuracy evaluated"
    );

    EvaluationResult::new(
        recovery_ok && rsd_ok,
        [
            (keys::RECOVERIES, MetricValue::from(recoveries)),
            (keys::MEAN_RECOVERY, MetricValue::from(mean_recovery)),
            (keys::RSD, MetricValue::from(rsd)),
        ],
        &justification,
    )
}
