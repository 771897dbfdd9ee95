//! The two experiments.
//!
//! | Experiment | What it prints |
//! |------------|----------------|
//! | [`norm_sampling`] | squared norm of uniform samples, single and double precision |
//! | [`underflow_scan`] | forward-difference error for each step size and problem size |
//!
//! [`trace`] records a scan for later analysis.

pub mod norm_sampling;
pub mod trace;
pub mod underflow_scan;

pub use norm_sampling::{run_norm_sampling, NormSamplingReport, SamplingConfig};
pub use trace::{BestApproximation, ScanTrace};
pub use underflow_scan::{ScanConfig, ScanEvent, UnderflowScan};

use crate::error::DiffQuotError;
use crate::math::Precision;

/// Run a full scan and record every event.
pub fn run_underflow_scan<T: Precision>(config: &ScanConfig) -> Result<ScanTrace<T>, DiffQuotError> {
    Ok(UnderflowScan::<T>::new(config)?.collect())
}
