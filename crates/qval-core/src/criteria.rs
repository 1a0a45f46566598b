//! Acceptance criteria applied by the rule evaluators.
//!
//! Every threshold lives here with its ICH Q2 default. Deployments can
//! override them through the `[criteria]` config section.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::enums::AccuracyLevel;
use crate::errors::CoreError;

/// Minimum coefficient of determination for a linear calibration.
pub const R_SQUARED_MIN: f64 = 0.99;

/// Largest allowed |intercept| as a fraction of the maximum response.
pub const INTERCEPT_FRACTION_MAX: f64 = 0.10;

/// Accepted mean recovery window, percent.
pub const RECOVERY_MIN: f64 = 80.0;
pub const RECOVERY_MAX: f64 = 120.0;

/// RSD limit for n >= 6 replicates, percent.
pub const RSD_LIMIT_FULL: f64 = 2.0;

/// RSD limit for 3 <= n < 6 replicates, percent.
pub const RSD_LIMIT_REDUCED: f64 = 5.0;

/// RSD limit for n < 3 replicates, percent. Lenient for under-powered sets.
pub const RSD_LIMIT_FALLBACK: f64 = 10.0;

/// Which nominal value accuracy recoveries are computed against.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum RecoveryBasis {
    /// The submitted spike level (80, 100 or 120) is the theoretical value.
    #[default]
    Level,
    /// Every level is measured against 100.
    Fixed100,
}

impl RecoveryBasis {
    #[must_use]
    pub const fn theoretical(self, level: AccuracyLevel) -> f64 {
        match self {
            Self::Level => level.percent(),
            Self::Fixed100 => 100.0,
        }
    }
}

/// Thresholds the evaluators compare against.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct AcceptanceCriteria {
    #[serde(default = "default_r_squared_min")]
    pub r_squared_min: f64,
    #[serde(default = "default_intercept_fraction_max")]
    pub intercept_fraction_max: f64,
    #[serde(default = "default_recovery_min")]
    pub recovery_min: f64,
    #[serde(default = "default_recovery_max")]
    pub recovery_max: f64,
    #[serde(default = "default_rsd_limit_full")]
    pub rsd_limit_full: f64,
    #[serde(default = "default_rsd_limit_reduced")]
    pub rsd_limit_reduced: f64,
    #[serde(default = "default_rsd_limit_fallback")]
    pub rsd_limit_fallback: f64,
    #[serde(default)]
    pub recovery_basis: RecoveryBasis,
}

const fn default_r_squared_min() -> f64 {
    R_SQUARED_MIN
}

const fn default_intercept_fraction_max() -> f64 {
    INTERCEPT_FRACTION_MAX
}

const fn default_recovery_min() -> f64 {
    RECOVERY_MIN
}

const fn default_recovery_max() -> f64 {
    RECOVERY_MAX
}

const fn default_rsd_limit_full() -> f64 {
    RSD_LIMIT_FULL
}

const fn default_rsd_limit_reduced() -> f64 {
    RSD_LIMIT_REDUCED
}

const fn default_rsd_limit_fallback() -> f64 {
    RSD_LIMIT_FALLBACK
}

impl Default for AcceptanceCriteria {
    fn default() -> Self {
        Self {
            r_squared_min: R_SQUARED_MIN,
            intercept_fraction_max: INTERCEPT_FRACTION_MAX,
            recovery_min: RECOVERY_MIN,
            recovery_max: RECOVERY_MAX,
            rsd_limit_full: RSD_LIMIT_FULL,
            rsd_limit_reduced: RSD_LIMIT_REDUCED,
            rsd_limit_fallback: RSD_LIMIT_FALLBACK,
            recovery_basis: RecoveryBasis::Level,
        }
    }
}

impl AcceptanceCriteria {
    /// RSD limit for a replicate set of size `n`.
    ///
    /// | n      | limit                |
    /// |--------|----------------------|
    /// | >= 6   | `rsd_limit_full`     |
    /// | 3..=5  | `rsd_limit_reduced`  |
    /// | < 3    | `rsd_limit_fallback` |
    #[must_use]
    pub const fn rsd_limit(&self, n: usize) -> f64 {
        if n >= 6 {
            self.rsd_limit_full
        } else if n >= 3 {
            self.rsd_limit_reduced
        } else {
            self.rsd_limit_fallback
        }
    }

    /// Reject thresholds that would make every evaluation meaningless.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::Validation` naming the first offending field.
    pub fn validate(&self) -> Result<(), CoreError> {
        let fields = [
            ("r_squared_min", self.r_squared_min),
            ("intercept_fraction_max", self.intercept_fraction_max),
            ("recovery_min", self.recovery_min),
            ("recovery_max", self.recovery_max),
            ("rsd_limit_full", self.rsd_limit_full),
            ("rsd_limit_reduced", self.rsd_limit_reduced),
            ("rsd_limit_fallback", self.rsd_limit_fallback),
        ];
        if let Some((name, _)) = fields.iter().find(|(_, v)| !v.is_finite() || *v < 0.0) {
            return Err(CoreError::Validation(format!(
                "{name} must be a finite, non-negative number"
            )));
        }
        if self.r_squared_min > 1.0 {
            return Err(CoreError::Validation(
                "r_squared_min must not exceed 1.0".to_string(),
            ));
        }
        if self.recovery_min > self.recovery_max {
            return Err(CoreError::Validation(format!(
                "recovery window is inverted ({} > {})",
                self.recovery_min, self.recovery_max
            )));
        }
        if self.rsd_limit_full > self.rsd_limit_reduced
            || self.rsd_limit_reduced > self.rsd_limit_fallback
        {
            return Err(CoreError::Validation(
                "RSD limits must not tighten as replicate count falls".to_string(),
            ));
        }
        Ok(())
    }
}
