//! Prescaled forward-difference error scan.
//!
//! The sample vector is `x_i = (i+1)/gamma`. For each step `h = 10^-k` and
//! each problem size `n = 1, 10, 100, ...` up to the buffer capacity, the
//! first component is perturbed and the raw difference
//! `gamma^2 * [f(x + h e_1) - f(x)]` is measured. Its quotient by `h` is
//! compared to the analytic derivative `2`.
//!
//! The scan stops entirely when `h` itself underflows to zero, or when the
//! difference underflows at `n == 1`. An underflow at a larger `n` only ends
//! that row and moves on to the next `k`: larger sums lose the perturbation
//! earlier, so smaller step sizes may still be measurable at small `n`.

use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::DiffQuotError;
use crate::math::norms::SummationOrder;
use crate::math::Precision;

/// Parameters of the underflow scan.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ScanConfig {
    /// Prescaling factor gamma.
    pub gamma: f64,
    /// Buffer capacity; the largest scanned `n` is the largest power of ten not above it.
    pub capacity: usize,
    /// Summation order used by the norm evaluations.
    pub order: SummationOrder,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            gamma: 100.0,
            capacity: 1024,
            order: SummationOrder::Forward,
        }
    }
}

impl ScanConfig {
    /// Check the configuration before the buffer is allocated.
    pub fn validate(&self) -> Result<(), DiffQuotError> {
        if !self.gamma.is_finite() || self.gamma == 0.0 {
            return Err(DiffQuotError::InvalidScale(self.gamma));
        }
        if self.capacity == 0 {
            return Err(DiffQuotError::InvalidCapacity(self.capacity));
        }
        Ok(())
    }
}

/// One line of the scan trace.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum ScanEvent<T> {
    /// The difference quotient was measurable; `err = quotient - 2`.
    Deviation {
        /// Step exponent, `h = 10^-k`
        k: u32,
        /// Problem size
        n: usize,
        /// Signed deviation from the analytic derivative
        err: T,
    },
    /// The raw difference was exactly zero.
    DifferenceUnderflow {
        /// Step exponent
        k: u32,
        /// Problem size
        n: usize,
    },
    /// The step `10^-k` itself rounded to zero.
    StepUnderflow {
        /// Step exponent
        k: u32,
    },
}

impl<T> ScanEvent<T> {
    /// Step exponent of this event.
    pub fn k(&self) -> u32 {
        match *self {
            ScanEvent::Deviation { k, .. }
            | ScanEvent::DifferenceUnderflow { k, .. }
            | ScanEvent::StepUnderflow { k } => k,
        }
    }
}

impl<T: Precision> fmt::Display for ScanEvent<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScanEvent::Deviation { k, n, err } => write!(f, "k: {} n: {} err {:.6}", k, n, err),
            ScanEvent::DifferenceUnderflow { k, n } => {
                write!(f, "difference underflown for k: {} n: {}", k, n)
            }
            ScanEvent::StepUnderflow { k } => write!(f, "underflow for 10^-{}", k),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
enum ScanState<T> {
    ScanningK { k: u32 },
    ScanningN { k: u32, h: T, n: usize },
    Done,
}

/// Iterator over the events of the scan, in output order.
///
/// # Example
///
/// ```rust
/// use diffquot::experiments::{ScanConfig, UnderflowScan};
///
/// let scan = UnderflowScan::<f64>::new(&ScanConfig::default()).unwrap();
/// let first = scan.into_iter().next().unwrap();
/// assert_eq!(first.to_string(), "k: 0 n: 1 err 1.000000");
/// ```
#[derive(Clone, Debug)]
pub struct UnderflowScan<T: Precision> {
    x: Vec<T>,
    gamma: T,
    order: SummationOrder,
    state: ScanState<T>,
}

impl<T: Precision> UnderflowScan<T> {
    /// Allocate the buffer and initialize `x_i = (i+1)/gamma`.
    pub fn new(config: &ScanConfig) -> Result<Self, DiffQuotError> {
        config.validate()?;
        let gamma = T::from_f64(config.gamma);
        // subnormal gamma passes the nonzero check but makes 1/gamma overflow
        if gamma == T::zero() || !gamma.is_finite() || !(T::one() / gamma).is_finite() {
            return Err(DiffQuotError::InvalidScale(config.gamma));
        }
        let x = (0..config.capacity)
            .map(|i| T::from_f64((i + 1) as f64) / gamma)
            .collect();
        debug!(?config, precision = T::NAME, "initialized underflow scan");
        Ok(Self {
            x,
            gamma,
            order: config.order,
            state: ScanState::ScanningK { k: 0 },
        })
    }

    /// Buffer capacity.
    pub fn capacity(&self) -> usize {
        self.x.len()
    }

    /// Whether the scan has reached its terminal state.
    pub fn is_done(&self) -> bool {
        self.state == ScanState::Done
    }

    /// Raw scaled difference `gamma^2 * [f(x + h e_1) - f(x)]` over the first `n` components.
    ///
    /// Leaves the buffer in its unperturbed state.
    ///
    /// # Panics
    ///
    /// Panics if `n > self.capacity()`, like [`norm_sq`](crate::math::norm_sq).
    pub fn difference(&mut self, h: T, n: usize) -> T {
        let one = T::one();
        self.x[0] = (one + h) / self.gamma;
        let perturbed = self.order.evaluate(&self.x, n);
        self.x[0] = one / self.gamma;
        let base = self.order.evaluate(&self.x, n);
        (perturbed - base) * self.gamma * self.gamma
    }
}

impl<T: Precision> Iterator for UnderflowScan<T> {
    type Item = ScanEvent<T>;

    fn next(&mut self) -> Option<ScanEvent<T>> {
        loop {
            match self.state {
                ScanState::Done => return None,
                ScanState::ScanningK { k } => {
                    let h = T::from_f64(10.0).powf(-T::from_f64(f64::from(k)));
                    if h == T::zero() {
                        info!(k, precision = T::NAME, "step size underflowed, scan done");
                        self.state = ScanState::Done;
                        return Some(ScanEvent::StepUnderflow { k });
                    }
                    self.state = ScanState::ScanningN { k, h, n: 1 };
                }
                ScanState::ScanningN { k, h, n } => {
                    if n > self.capacity() {
                        self.state = ScanState::ScanningK { k: k + 1 };
                        continue;
                    }
                    let delta = self.difference(h, n);
                    if delta == T::zero() {
                        if n == 1 {
                            info!(k, precision = T::NAME, "difference underflowed at n = 1, scan done");
                            self.state = ScanState::Done;
                        } else {
                            debug!(k, n, "difference underflowed, next step size");
                            self.state = ScanState::ScanningK { k: k + 1 };
                        }
                        return Some(ScanEvent::DifferenceUnderflow { k, n });
                    }
                    self.state = ScanState::ScanningN {
                        k,
                        h,
                        n: n.saturating_mul(10),
                    };
                    let two = T::one() + T::one();
                    return Some(ScanEvent::Deviation {
                        k,
                        n,
                        err: delta / h - two,
                    });
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_line_matches_hand_computation() {
        // x0: 0.02 -> f = 0.0004; x0: 0.01 -> f = 0.0001; (0.0003 * 1e4) / 1 - 2 = 1
        let mut scan = UnderflowScan::<f64>::new(&ScanConfig::default()).unwrap();
        let first = scan.next().unwrap();
        match first {
            ScanEvent::Deviation { k, n, err } => {
                assert_eq!((k, n), (0, 1));
                assert!((err - 1.0).abs() < 1e-9, "err = {}", err);
            }
            other => panic!("unexpected first event {:?}", other),
        }
        assert_eq!(first.to_string(), "k: 0 n: 1 err 1.000000");
    }

    #[test]
    fn test_row_sizes_are_powers_of_ten_up_to_capacity() {
        let scan = UnderflowScan::<f64>::new(&ScanConfig::default()).unwrap();
        let row: Vec<usize> = scan
            .take_while(|e| e.k() == 0)
            .map(|e| match e {
                ScanEvent::Deviation { n, .. } => n,
                other => panic!("unexpected event {:?}", other),
            })
            .collect();
        assert_eq!(row, vec![1, 10, 100, 1000]);
    }

    #[test]
    fn test_difference_restores_buffer() {
        let mut scan = UnderflowScan::<f32>::new(&ScanConfig::default()).unwrap();
        let before = scan.x.clone();
        let _ = scan.difference(0.5, 100);
        assert_eq!(scan.x, before);
    }

    #[test]
    fn test_double_terminates_on_difference_underflow_at_n_1() {
        let events: Vec<_> = UnderflowScan::<f64>::new(&ScanConfig::default())
            .unwrap()
            .collect();
        let last = events.last().unwrap();
        assert!(matches!(last, ScanEvent::DifferenceUnderflow { n: 1, .. }));
        assert!(last.k() <= 400);
        assert_eq!(last.to_string(), format!("difference underflown for k: {} n: 1", last.k()));
    }

    #[test]
    fn test_single_terminates() {
        let mut scan = UnderflowScan::<f32>::new(&ScanConfig::default()).unwrap();
        let count = scan.by_ref().count();
        assert!(scan.is_done());
        assert!(count > 0 && count <= 60 * 4);
    }

    #[test]
    fn test_large_n_underflow_moves_to_next_k() {
        let events: Vec<_> = UnderflowScan::<f64>::new(&ScanConfig::default())
            .unwrap()
            .collect();
        let mid_row = events
            .iter()
            .position(|e| matches!(e, ScanEvent::DifferenceUnderflow { n, .. } if *n > 1))
            .expect("large sums should lose the perturbation first");
        let k = events[mid_row].k();
        assert_eq!(events[mid_row + 1].k(), k + 1);
        assert!(matches!(events[mid_row + 1], ScanEvent::Deviation { n: 1, .. }));
    }

    #[test]
    fn test_step_underflow_message() {
        let event: ScanEvent<f64> = ScanEvent::StepUnderflow { k: 324 };
        assert_eq!(event.to_string(), "underflow for 10^-324");
    }

    #[test]
    fn test_step_underflow_ends_scan() {
        // x_0^2 overflows, so every difference is NaN and never exactly zero
        let config = ScanConfig {
            gamma: 1e-200,
            capacity: 1,
            ..ScanConfig::default()
        };
        let mut scan = UnderflowScan::<f64>::new(&config).unwrap();
        let events: Vec<_> = scan.by_ref().collect();

        assert!(scan.is_done());
        assert_eq!(events.last(), Some(&ScanEvent::StepUnderflow { k: 324 }));
        assert_eq!(events.len(), 325);
        let terminal = events
            .iter()
            .filter(|e| {
                matches!(
                    e,
                    ScanEvent::StepUnderflow { .. } | ScanEvent::DifferenceUnderflow { .. }
                )
            })
            .count();
        assert_eq!(terminal, 1);
        assert!(scan.next().is_none());
    }

    #[test]
    #[should_panic]
    fn test_difference_beyond_capacity_panics() {
        let config = ScanConfig {
            capacity: 4,
            ..ScanConfig::default()
        };
        let mut scan = UnderflowScan::<f64>::new(&config).unwrap();
        assert_eq!(scan.capacity(), 4);
        let _ = scan.difference(1.0, 10);
    }

    #[test]
    fn test_subnormal_gamma_rejected() {
        let subnormal = ScanConfig {
            gamma: 1e-310,
            ..ScanConfig::default()
        };
        assert!(matches!(
            UnderflowScan::<f64>::new(&subnormal),
            Err(DiffQuotError::InvalidScale(_))
        ));

        // normal in double, subnormal in single
        let subnormal_single = ScanConfig {
            gamma: 1e-40,
            ..ScanConfig::default()
        };
        assert!(UnderflowScan::<f64>::new(&subnormal_single).is_ok());
        assert!(matches!(
            UnderflowScan::<f32>::new(&subnormal_single),
            Err(DiffQuotError::InvalidScale(_))
        ));
    }

    #[test]
    fn test_capacity_one_scans_only_n_1() {
        let config = ScanConfig {
            capacity: 1,
            ..ScanConfig::default()
        };
        let events: Vec<_> = UnderflowScan::<f64>::new(&config).unwrap().collect();
        assert!(events.iter().all(|e| match e {
            ScanEvent::Deviation { n, .. } | ScanEvent::DifferenceUnderflow { n, .. } => *n == 1,
            ScanEvent::StepUnderflow { .. } => true,
        }));
    }

    #[test]
    fn test_invalid_config() {
        let zero_gamma = ScanConfig {
            gamma: 0.0,
            ..ScanConfig::default()
        };
        assert!(matches!(
            UnderflowScan::<f64>::new(&zero_gamma),
            Err(DiffQuotError::InvalidScale(_))
        ));

        let empty = ScanConfig {
            capacity: 0,
            ..ScanConfig::default()
        };
        assert!(matches!(
            UnderflowScan::<f32>::new(&empty),
            Err(DiffQuotError::InvalidCapacity(0))
        ));

        let tiny_for_single = ScanConfig {
            gamma: 1e-300,
            ..ScanConfig::default()
        };
        assert!(UnderflowScan::<f32>::new(&tiny_for_single).is_err());
    }
}
