//! Mathematical primitives for diffquot.
//!
//! - [`norms`] — squared-norm evaluation in single and double precision
//! - [`Precision`] — the two floating-point types the experiments compare

pub mod norms;

pub use norms::{norm_sq, norm_sq_reversed, scaled_norm_sq, try_norm_sq, SummationOrder};

use std::fmt;

use num_traits::Float;
use serde::Serialize;

mod sealed {
    pub trait Sealed {}
    impl Sealed for f32 {}
    impl Sealed for f64 {}
}

/// Working precision of an experiment.
///
/// Implemented for `f32` and `f64` only. Both run the exact same algorithm;
/// precision is the experimental variable.
pub trait Precision:
    Float + fmt::Display + fmt::Debug + Serialize + Send + Sync + sealed::Sealed + 'static
{
    /// Human-readable name ("single" or "double").
    const NAME: &'static str;

    /// Round a double-precision value to this precision.
    fn from_f64(v: f64) -> Self;
}

impl Precision for f32 {
    const NAME: &'static str = "single";

    fn from_f64(v: f64) -> Self {
        v as f32
    }
}

impl Precision for f64 {
    const NAME: &'static str = "double";

    fn from_f64(v: f64) -> Self {
        v
    }
}
