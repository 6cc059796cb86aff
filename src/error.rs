//! Error taxonomy for lattice access, evaluation, and export.

use thiserror::Error;

/// Errors surfaced by field operations.
///
/// Recoverable conditions are always errors, never panics. Out-of-range
/// cell access reports the offending axis so callers can tell a bad probe
/// from a bad write.
#[derive(Debug, Error)]
pub enum FieldError {
    /// A cell coordinate exceeded the lattice resolution on some axis.
    #[error("index {index} out of range on axis {axis} (resolution {resolution})")]
    IndexOutOfRange {
        axis: usize,
        index: usize,
        resolution: usize,
    },

    /// An axis selector exceeded the fixed axis count.
    #[error("axis {axis} out of range (lattice has {} axes)", crate::tensor::AXES)]
    AxisOutOfRange { axis: usize },

    /// A 2D slice was requested with both axes equal.
    #[error("slice axes must differ (both were {axis})")]
    DegenerateSlice { axis: usize },

    /// Field strength was exactly zero at evaluation time.
    #[error("field strength is zero, instability ratio undefined")]
    DivisionByZero,

    /// A configuration value failed validation.
    #[error("invalid configuration: {reason}")]
    InvalidConfiguration { reason: &'static str },

    /// Session export could not be serialized.
    #[error("export failed: {0}")]
    Export(#[from] serde_json::Error),
}

/// Convenience alias for fallible field operations.
pub type FieldResult<T> = Result<T, FieldError>;
