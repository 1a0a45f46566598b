//! Detection and quantification limits from blank-response noise.
//!
//! ```text
//! LOD = 3.3 * sigma / S
//! LOQ = 10  * sigma / S
//! ```
//!
//! where `sigma` is the sample standard deviation of the blank responses and
//! `S` the calibration slope from linearity.

use crate::error::StatsError;
use crate::summary::sample_std_dev;

pub const LOD_FACTOR: f64 = 3.3;
pub const LOQ_FACTOR: f64 = 10.0;

/// Compute `(lod, loq)`. Both are 0 when `slope` is 0.
///
/// # Errors
///
/// Returns `StatsError::InvalidInput` when `blank_responses` is empty, or
/// holds a single value (no spread to estimate), or a non-finite value.
pub fn lod_loq(blank_responses: &[f64], slope: f64) -> Result<(f64, f64), StatsError> {
    if blank_responses.is_empty() {
        return Err(StatsError::invalid("Blank responses required"));
    }
    let sigma = sample_std_dev(blank_responses)?;
    if slope == 0.0 {
        return Ok((0.0, 0.0));
    }
    Ok((LOD_FACTOR * sigma / slope, LOQ_FACTOR * sigma / slope))
}
