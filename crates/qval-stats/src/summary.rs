//! Mean, sample standard deviation, and relative standard deviation.

use crate::error::{StatsError, ensure_finite};

/// Running mean and sum of squared deviations (Welford).
struct Moments {
    n: usize,
    mean: f64,
    m2: f64,
}

impl Moments {
    fn of(values: &[f64]) -> Self {
        let mut moments = Self {
            n: 0,
            mean: 0.0,
            m2: 0.0,
        };
        for &v in values {
            moments.n += 1;
            #[allow(clippy::cast_precision_loss)]
            let n = moments.n as f64;
            let delta = v - moments.mean;
            moments.mean += delta / n;
            moments.m2 += delta * (v - moments.mean);
        }
        moments
    }

    #[allow(clippy::cast_precision_loss)]
    fn sample_variance(&self) -> Option<f64> {
        (self.n >= 2).then(|| self.m2 / (self.n - 1) as f64)
    }
}

/// Arithmetic mean.
///
/// # Errors
///
/// Returns `StatsError::InvalidInput` for an empty or non-finite sequence.
pub fn mean(values: &[f64]) -> Result<f64, StatsError> {
    if values.is_empty() {
        return Err(StatsError::invalid("mean requires at least one data point"));
    }
    ensure_finite("values", values)?;
    Ok(Moments::of(values).mean)
}

/// Sample (n - 1) standard deviation.
///
/// # Errors
///
/// Returns `StatsError::InvalidInput` for fewer than two values or a
/// non-finite value.
pub fn sample_std_dev(values: &[f64]) -> Result<f64, StatsError> {
    ensure_finite("values", values)?;
    Moments::of(values)
        .sample_variance()
        .map(f64::sqrt)
        .ok_or_else(|| StatsError::invalid("variance requires at least two data points"))
}

/// Percent relative standard deviation: `100 * sample_std_dev / mean`.
///
/// Returns 0 for fewer than two values or a zero mean. Non-finite values
/// also yield 0; callers that must reject them validate first.
#[must_use]
pub fn relative_std_dev(values: &[f64]) -> f64 {
    if values.len() < 2 || values.iter().any(|v| !v.is_finite()) {
        return 0.0;
    }
    let moments = Moments::of(values);
    if moments.mean == 0.0 {
        return 0.0;
    }
    moments
        .sample_variance()
        .map_or(0.0, |var| var.sqrt() / moments.mean * 100.0)
}
