//! # diffquot: difference quotients of the squared norm
//!
//! Small experiments on how forward-difference approximations
//!
//! ```text
//! [f(x + h e_1) - f(x)] / h  ~  df/dx_1 = 2 x_1,    f(x) = sum_i x_i^2
//! ```
//!
//! degrade with step size, problem size, precision, prescaling, and
//! summation order.
//!
//! ## Experiments
//!
//! - [`run_norm_sampling()`] - squared norm of uniform samples in single and double precision
//! - [`UnderflowScan`] - error of the difference quotient for `h = 10^-k`, `n = 10^j`,
//!   until the difference underflows
//!
//! Each has a binary of the same name (`norm_sampling`, `underflow_scan`).

#![deny(missing_docs)]

pub mod error;
pub mod experiments;
pub mod logging;
pub mod math;
pub mod report;
pub mod sampling;

// Re-exports
pub use error::DiffQuotError;
pub use experiments::{run_norm_sampling, run_underflow_scan};
pub use experiments::{ScanConfig, ScanEvent, ScanTrace, UnderflowScan};
pub use math::{norm_sq, Precision, SummationOrder};
pub use sampling::SampleRng;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
