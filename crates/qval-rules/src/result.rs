//! Evaluator output shared by all stages.

use std::collections::BTreeMap;
use std::fmt::Display;

use qval_core::enums::EvaluationStatus;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Metric names consumed by the reporting layer. Do not rename.
pub mod keys {
    pub const SLOPE: &str = "slope";
    pub const INTERCEPT: &str = "intercept";
    pub const R_SQUARED: &str = "r_squared";
    pub const RECOVERIES: &str = "recoveries";
    pub const MEAN_RECOVERY: &str = "mean_recovery";
    pub const RSD: &str = "rsd";
    pub const MEAN: &str = "mean";
    pub const LOD: &str = "lod";
    pub const LOQ: &str = "loq";
}

/// A metric is a single number, or a per-measurement series.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
#[serde(untagged)]
pub enum MetricValue {
    Scalar(f64),
    Series(Vec<f64>),
}

impl From<f64> for MetricValue {
    fn from(value: f64) -> Self {
        Self::Scalar(value)
    }
}

impl From<Vec<f64>> for MetricValue {
    fn from(values: Vec<f64>) -> Self {
        Self::Series(values)
    }
}

/// Verdict, metrics and justification for one stage submission.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct EvaluationResult {
    pub status: EvaluationStatus,
    pub metrics: BTreeMap<String, MetricValue>,
    pub justification: String,
}

impl EvaluationResult {
    pub(crate) fn new(
        passed: bool,
        metrics: impl IntoIterator<Item = (&'static str, MetricValue)>,
        justification: &Justification,
    ) -> Self {
        Self {
            status: EvaluationStatus::from_passed(passed),
            metrics: metrics
                .into_iter()
                .map(|(name, value)| (name.to_string(), value))
                .collect(),
            justification: justification.to_string(),
        }
    }

    /// FAIL with no metrics, for a computation that could not complete.
    pub(crate) fn calculation_error(error: impl Display) -> Self {
        Self {
            status: EvaluationStatus::Fail,
            metrics: BTreeMap::new(),
            justification: format!("Error in calculation: {error}"),
        }
    }

    #[must_use]
    pub const fn passed(&self) -> bool {
        self.status.passed()
    }

    /// Scalar metric by name.
    #[must_use]
    pub fn metric(&self, name: &str) -> Option<f64> {
        match self.metrics.get(name)? {
            MetricValue::Scalar(value) => Some(*value),
            MetricValue::Series(_) => None,
        }
    }

    /// Series metric by name.
    #[must_use]
    pub fn series(&self, name: &str) -> Option<&[f64]> {
        match self.metrics.get(name)? {
            MetricValue::Series(values) => Some(values),
            MetricValue::Scalar(_) => None,
        }
    }
}

/// Per-criterion clauses joined with `"; "`.
#[derive(Debug, Default)]
pub struct Justification {
    clauses: Vec<String>,
}

impl Justification {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a clause with its individual verdict.
    pub fn criterion(&mut self, passed: bool, text: impl Into<String>) -> &mut Self {
        self.clauses.push(format!(
            "{} [{}]",
            text.into(),
            EvaluationStatus::from_passed(passed)
        ));
        self
    }

    /// Add a clause without a verdict.
    pub fn note(&mut self, text: impl Into<String>) -> &mut Self {
        self.clauses.push(text.into());
        self
    }
}

impl std::fmt::Display for Justification {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.clauses.join("; "))
    }
}
