//! Random vector initialization.
//!
//! The generator is an explicitly owned [`SampleRng`] passed by `&mut` to
//! whatever fills a buffer. There is no process-wide generator; dropping the
//! value releases it.
//!
//! - [`seed`] — wall-clock seeding

pub mod seed;

pub use seed::seed_from_time_of_day;

use rand::distributions::{Distribution, Uniform};
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::{debug, info};

use crate::error::DiffQuotError;
use crate::math::Precision;

/// Owned pseudo-random generator used to draw sample vectors.
///
/// # Example
///
/// ```rust
/// use diffquot::SampleRng;
///
/// let mut rng = SampleRng::with_seed(7);
/// let mut buf = vec![0.0f64; 16];
/// rng.fill_uniform(&mut buf, 1.0).unwrap();
/// assert!(buf.iter().all(|x| (-1.0..=1.0).contains(x)));
/// ```
#[derive(Debug)]
pub struct SampleRng {
    seed: u64,
    rng: StdRng,
}

impl SampleRng {
    /// Create a generator seeded from the microsecond part of the time of day.
    pub fn from_time_of_day() -> Result<Self, DiffQuotError> {
        let seed = seed_from_time_of_day()?;
        info!(seed, "seeded generator from time of day");
        Ok(Self::with_seed(seed))
    }

    /// Create a generator with an explicit seed (reproducible runs).
    pub fn with_seed(seed: u64) -> Self {
        Self {
            seed,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Seed this generator was created with.
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Fill `buf` with independent draws from the uniform distribution on `[-a, a]`.
    ///
    /// Draws are made in double precision and rounded to `T`. Since `a` is
    /// itself an `f32`, rounding never leaves the closed interval.
    ///
    /// # Arguments
    ///
    /// * `buf` - Buffer to overwrite, every element is drawn
    /// * `a` - Half-width of the distribution (finite, >= 0)
    pub fn fill_uniform<T: Precision>(&mut self, buf: &mut [T], a: f32) -> Result<(), DiffQuotError> {
        if !a.is_finite() || a < 0.0 {
            return Err(DiffQuotError::InvalidHalfWidth(a));
        }
        let half_width = f64::from(a);
        let dist = Uniform::new_inclusive(-half_width, half_width);
        for x in buf.iter_mut() {
            *x = T::from_f64(dist.sample(&mut self.rng));
        }
        debug!(len = buf.len(), half_width, precision = T::NAME, "filled uniform buffer");
        Ok(())
    }
}
