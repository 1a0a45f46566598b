//! Raw stage payloads as submitted by an analyst.
//!
//! These carry measurements only. Derived values (slope, recovery, RSD, limits)
//! are computed by the evaluators and stored on the resulting
//! [`MeasurementSet`](crate::entities::MeasurementSet).

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::enums::{AccuracyLevel, StageKind};

/// Calibration points: one response per concentration.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct LinearitySubmission {
    pub concentrations: Vec<f64>,
    pub responses: Vec<f64>,
}

/// Measured values at one spike level.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct AccuracySubmission {
    pub level: AccuracyLevel,
    pub measured_values: Vec<f64>,
}

/// Replicate measurements of one sample.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct PrecisionSubmission {
    pub replicate_values: Vec<f64>,
}

/// Blank responses. The calibration slope is not part of the payload; it is
/// taken from the project's passed linearity record.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct LodLoqSubmission {
    pub blank_responses: Vec<f64>,
}

/// A submission for any stage, tagged by `stage`.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
#[serde(tag = "stage", rename_all = "snake_case")]
pub enum Submission {
    Linearity(LinearitySubmission),
    Accuracy(AccuracySubmission),
    Precision(PrecisionSubmission),
    LodLoq(LodLoqSubmission),
}

impl Submission {
    #[must_use]
    pub const fn stage(&self) -> StageKind {
        match self {
            Self::Linearity(_) => StageKind::Linearity,
            Self::Accuracy(_) => StageKind::Accuracy,
            Self::Precision(_) => StageKind::Precision,
            Self::LodLoq(_) => StageKind::LodLoq,
        }
    }
}
