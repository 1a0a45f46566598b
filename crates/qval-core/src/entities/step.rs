use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::enums::{AccuracyLevel, StageKind};

/// Linearity measurements plus the fitted line.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct LinearityData {
    pub concentrations: Vec<f64>,
    pub responses: Vec<f64>,
    pub slope: Option<f64>,
    pub intercept: Option<f64>,
    pub r_squared: Option<f64>,
}

/// Accuracy measurements plus derived recovery statistics.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct AccuracyData {
    pub level: AccuracyLevel,
    pub measured_values: Vec<f64>,
    pub mean_recovery: Option<f64>,
    pub rsd: Option<f64>,
}

/// Replicate measurements plus mean and RSD.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct PrecisionData {
    pub replicate_values: Vec<f64>,
    pub mean: Option<f64>,
    pub rsd: Option<f64>,
}

/// Blank responses, the linearity slope they were evaluated with, and the limits.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct LodLoqData {
    pub blank_responses: Vec<f64>,
    pub slope: f64,
    pub lod: Option<f64>,
    pub loq: Option<f64>,
}

/// Stage-specific measurements stored on a step record.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
#[serde(tag = "stage", rename_all = "snake_case")]
pub enum MeasurementSet {
    Linearity(LinearityData),
    Accuracy(AccuracyData),
    Precision(PrecisionData),
    LodLoq(LodLoqData),
}

impl MeasurementSet {
    #[must_use]
    pub const fn stage(&self) -> StageKind {
        match self {
            Self::Linearity(_) => StageKind::Linearity,
            Self::Accuracy(_) => StageKind::Accuracy,
            Self::Precision(_) => StageKind::Precision,
            Self::LodLoq(_) => StageKind::LodLoq,
        }
    }

    /// Fitted slope, for linearity sets that have one.
    #[must_use]
    pub const fn slope(&self) -> Option<f64> {
        match self {
            Self::Linearity(data) => data.slope,
            _ => None,
        }
    }
}

/// The single record of a stage submission for a project.
///
/// At most one exists per (project, stage). Uniqueness is enforced by whoever
/// stores them.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct ValidationStepRecord {
    pub project_id: String,
    pub stage: StageKind,
    pub completed: bool,
    /// `None` until the stage has been evaluated.
    pub passed: Option<bool>,
    pub measurements: MeasurementSet,
    pub created_at: DateTime<Utc>,
}

impl ValidationStepRecord {
    #[must_use]
    pub fn is_passed(&self) -> bool {
        self.completed && self.passed == Some(true)
    }

    #[must_use]
    pub fn is_failed(&self) -> bool {
        self.completed && self.passed == Some(false)
    }
}
