//! # qval-stats
//!
//! Pure numeric functions behind the validation rules:
//! - [`linear_regression`]: ordinary least-squares line with r²
//! - [`recovery`]: percent of the theoretical value measured
//! - [`relative_std_dev`]: %RSD from the sample standard deviation
//! - [`lod_loq`]: detection and quantification limits from blank noise
//!
//! Nothing here holds state or logs. Degenerate inputs the rules tolerate
//! (zero theoretical value, zero slope, constant responses) return zeros;
//! inputs no answer exists for return [`StatsError::InvalidInput`].

mod error;
mod limits;
mod recovery;
mod regression;
mod summary;

pub use error::StatsError;
pub use limits::{LOD_FACTOR, LOQ_FACTOR, lod_loq};
pub use recovery::recovery;
pub use regression::{Regression, linear_regression};
pub use summary::{mean, relative_std_dev, sample_std_dev};
