//! Error handling for CurveCAM
//!
//! Provides the error type shared by the core layer:
//! - Unit validation errors
//! - Tolerance configuration errors
//!
//! All error types use `thiserror` for ergonomic error handling.

use thiserror::Error;

/// Main error type for the core layer
#[derive(Error, Debug)]
pub enum Error {
    /// A unit name outside the supported set was requested
    #[error("Unknown unit {unit}. Please specify one of the following: {valid}")]
    InvalidUnit {
        /// The rejected unit name.
        unit: String,
        /// The supported unit names, comma separated.
        valid: String,
    },

    /// A tolerance value is not a positive finite number
    #[error("Invalid {name} tolerance: {value} (must be positive and finite)")]
    InvalidTolerance {
        /// Which tolerance was rejected.
        name: &'static str,
        /// The rejected value.
        value: f64,
    },

    /// The process-wide tolerances were already set
    #[error("Tolerances have already been configured for this process")]
    TolerancesAlreadyConfigured,
}

/// Result type using Error
pub type Result<T> = std::result::Result<T, Error>;
