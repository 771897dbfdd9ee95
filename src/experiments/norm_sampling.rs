//! Norm of uniformly sampled data in single and double precision.
//!
//! Two buffers, one per precision, are filled from the same generator and
//! the squared norm of a short prefix is evaluated in each.

use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::DiffQuotError;
use crate::math::norms::try_norm_sq;
use crate::sampling::SampleRng;

/// Parameters of the sampling experiment.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SamplingConfig {
    /// Length of each sample buffer.
    pub buffer_len: usize,
    /// Number of leading components summed into the norm.
    pub n: usize,
    /// Half-width of the uniform distribution.
    pub half_width: f32,
}

impl Default for SamplingConfig {
    fn default() -> Self {
        Self {
            buffer_len: 2048,
            n: 12,
            half_width: 1.0,
        }
    }
}

impl SamplingConfig {
    /// Check the configuration before any sampling happens.
    pub fn validate(&self) -> Result<(), DiffQuotError> {
        if self.n > self.buffer_len {
            return Err(DiffQuotError::SampleCountExceedsBuffer {
                n: self.n,
                len: self.buffer_len,
            });
        }
        if !self.half_width.is_finite() || self.half_width < 0.0 {
            return Err(DiffQuotError::InvalidHalfWidth(self.half_width));
        }
        Ok(())
    }
}

/// Squared norms of the sampled prefix in both precisions.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct NormSamplingReport {
    /// Result in single precision.
    pub single: f32,
    /// Result in double precision.
    pub double: f64,
}

impl fmt::Display for NormSamplingReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{:.5}", self.single)?;
        write!(f, "{:.5}", self.double)
    }
}

/// Run the sampling experiment.
///
/// The single-precision buffer is filled first, then the double-precision
/// one, both from `rng`. The two buffers therefore hold different samples.
pub fn run_norm_sampling(
    rng: &mut SampleRng,
    config: &SamplingConfig,
) -> Result<NormSamplingReport, DiffQuotError> {
    config.validate()?;
    debug!(?config, seed = rng.seed(), "running norm sampling");

    let mut x_f = vec![0.0f32; config.buffer_len];
    let mut x = vec![0.0f64; config.buffer_len];

    rng.fill_uniform(&mut x_f, config.half_width)?;
    rng.fill_uniform(&mut x, config.half_width)?;

    Ok(NormSamplingReport {
        single: try_norm_sq(&x_f, config.n)?,
        double: try_norm_sq(&x, config.n)?,
    })
}
