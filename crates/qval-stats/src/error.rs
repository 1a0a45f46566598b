//! Statistics error types.

use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum StatsError {
    /// Input data is malformed or insufficient for the computation.
    #[error("{0}")]
    InvalidInput(String),
}

impl StatsError {
    pub(crate) fn invalid(message: impl Into<String>) -> Self {
        Self::InvalidInput(message.into())
    }
}

/// Reject NaN and infinite values before they poison a sum.
pub(crate) fn ensure_finite(name: &str, values: &[f64]) -> Result<(), StatsError> {
    match values.iter().position(|v| !v.is_finite()) {
        Some(idx) => Err(StatsError::invalid(format!(
            "{name}[{idx}] is not a finite number"
        ))),
        None => Ok(()),
    }
}
