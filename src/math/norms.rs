//! Squared-norm evaluation `f(x) = sum_i x_i^2`.
//!
//! Accumulation is plain sequential summation in the working precision, with
//! no pairwise or compensated tricks, so that rounding behaves the same way
//! in single and double precision. The analytic partial derivative of `f`
//! with respect to the first component is `2 * x_1`.

use serde::{Deserialize, Serialize};

use crate::error::DiffQuotError;
use crate::math::Precision;

/// Order in which the components are accumulated.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum SummationOrder {
    /// First component to last (default)
    #[default]
    Forward,
    /// Last component to first
    Reverse,
}

impl SummationOrder {
    /// Evaluate the squared norm of the first `n` components in this order.
    pub fn evaluate<T: Precision>(self, x: &[T], n: usize) -> T {
        match self {
            SummationOrder::Forward => norm_sq(x, n),
            SummationOrder::Reverse => norm_sq_reversed(x, n),
        }
    }
}

/// Sum of squares of the first `n` components of `x`, left to right.
///
/// # Panics
///
/// Panics if `n > x.len()`. See [`try_norm_sq`] for a checked variant.
pub fn norm_sq<T: Precision>(x: &[T], n: usize) -> T {
    let mut result = T::zero();
    for &x_i in &x[..n] {
        result = result + x_i * x_i;
    }
    result
}

/// Same sum as [`norm_sq`] accumulated from the `n`-th component down to the first.
pub fn norm_sq_reversed<T: Precision>(x: &[T], n: usize) -> T {
    let mut result = T::zero();
    for &x_i in x[..n].iter().rev() {
        result = result + x_i * x_i;
    }
    result
}

/// Checked [`norm_sq`]: errors instead of panicking when `n` exceeds the buffer.
pub fn try_norm_sq<T: Precision>(x: &[T], n: usize) -> Result<T, DiffQuotError> {
    if n > x.len() {
        return Err(DiffQuotError::SampleCountExceedsBuffer { n, len: x.len() });
    }
    Ok(norm_sq(x, n))
}

/// Prescaled evaluation `gamma^2 * f(x / gamma)`.
///
/// Mathematically equal to `f(x)`; numerically it differs only by rounding.
pub fn scaled_norm_sq<T: Precision>(x: &[T], n: usize, gamma: T) -> T {
    let mut result = T::zero();
    for &x_i in &x[..n] {
        let scaled = x_i / gamma;
        result = result + scaled * scaled;
    }
    result * gamma * gamma
}
