//! # qval-rules
//!
//! Rule evaluators for each validation stage. Every evaluator is a pure
//! function from raw measurements to an [`EvaluationResult`]: a PASS/FAIL
//! verdict, named metrics, and a justification built from one clause per
//! criterion.
//!
//! Bad measurement data is a failed experiment, not an error: evaluators fold
//! any statistics fault into a FAIL result whose justification names it.
//! The only `Err` values come from the dispatch layer in [`registry`], for a
//! missing cross-stage input.

pub mod accuracy;
pub mod linearity;
pub mod lod_loq;
pub mod precision;
pub mod registry;
mod result;

pub use accuracy::evaluate_accuracy;
pub use linearity::evaluate_linearity;
pub use lod_loq::evaluate_lod_loq;
pub use precision::evaluate_precision;
pub use registry::{EvaluationContext, StageEvaluator, evaluate_submission, evaluator_for};
pub use result::{EvaluationResult, Justification, MetricValue, keys};
