//! Error types for the geometry crate.

use curvecam_core::Vector;
use thiserror::Error;

/// Errors raised while building or validating geometry.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GeometryError {
    /// A defining point of the curve is NaN or infinite.
    #[error("{curve} has a non-finite coordinate")]
    NonFinite { curve: &'static str },

    /// A segment does not start where the chain ends.
    #[error("Segment starts at {found} but the chain ends at {expected}")]
    Disconnected { expected: Vector, found: Vector },
}

/// Result type alias for geometry operations.
pub type GeometryResult<T> = Result<T, GeometryError>;
