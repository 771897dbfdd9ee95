//! Error types for diffquot

use thiserror::Error;

/// All possible errors in diffquot
///
/// Floating-point underflow and loss of precision are not errors here: they
/// are what the experiments measure and are reported as ordinary output.
#[derive(Error, Debug)]
pub enum DiffQuotError {
    /// The wall clock could not be read to seed the generator
    #[error("Clock unavailable: {0}")]
    ClockUnavailable(String),

    /// Half-width of the uniform distribution is negative or not finite
    #[error("Invalid half-width: {0} (must be finite and >= 0)")]
    InvalidHalfWidth(f32),

    /// Scale factor is zero or not finite
    #[error("Invalid scale factor: {0} (must be finite and nonzero)")]
    InvalidScale(f64),

    /// Scan buffer capacity is zero
    #[error("Invalid buffer capacity: {0} (must be >= 1)")]
    InvalidCapacity(usize),

    /// More components requested than the buffer holds
    #[error("Sample count exceeds buffer: need {n}, buffer holds {len}")]
    SampleCountExceedsBuffer {
        /// Requested number of components
        n: usize,
        /// Actual buffer length
        len: usize,
    },

    /// Writing experiment output failed
    #[error("Output error: {0}")]
    Io(#[from] std::io::Error),

    /// A trace could not be serialized
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl DiffQuotError {
    /// Whether this is a write to a closed pipe (e.g. output piped into `head`).
    pub fn is_broken_pipe(&self) -> bool {
        matches!(self, DiffQuotError::Io(e) if e.kind() == std::io::ErrorKind::BrokenPipe)
    }
}

impl From<std::time::SystemTimeError> for DiffQuotError {
    fn from(e: std::time::SystemTimeError) -> Self {
        DiffQuotError::ClockUnavailable(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let e = DiffQuotError::SampleCountExceedsBuffer { n: 12, len: 4 };
        assert_eq!(e.to_string(), "Sample count exceeds buffer: need 12, buffer holds 4");

        let e = DiffQuotError::InvalidScale(0.0);
        assert!(e.to_string().contains("nonzero"));
    }

    #[test]
    fn test_is_broken_pipe() {
        let e = DiffQuotError::from(std::io::Error::from(std::io::ErrorKind::BrokenPipe));
        assert!(e.is_broken_pipe());
        let e = DiffQuotError::from(std::io::Error::from(std::io::ErrorKind::PermissionDenied));
        assert!(!e.is_broken_pipe());
        assert!(!DiffQuotError::InvalidCapacity(0).is_broken_pipe());
    }
}
