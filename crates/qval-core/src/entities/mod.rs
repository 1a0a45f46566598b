//! Entity structs for qval domain objects.
//!
//! All structs derive `Serialize`, `Deserialize`, and `JsonSchema` so the
//! surrounding storage and reporting layers can persist and validate them.

mod audit;
mod project;
mod step;

pub use audit::{Actor, AuditEntry};
pub use project::Project;
pub use step::{
    AccuracyData, LinearityData, LodLoqData, MeasurementSet, PrecisionData, ValidationStepRecord,
};
