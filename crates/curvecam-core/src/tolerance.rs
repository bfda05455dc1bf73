//! Process-wide tolerances
//!
//! Two tolerances govern the whole pipeline:
//! - `approximation`: maximum deviation of a line-segment chain from its curve
//! - `operation`: distance below which two positions are the same location
//!
//! They are configured at most once per process, before any compilation
//! starts. Until then [`tolerances`] returns [`Tolerances::default`].

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::sync::OnceLock;

static TOLERANCES: OnceLock<Tolerances> = OnceLock::new();

/// Tolerance pair used by approximation and move suppression
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tolerances {
    /// Maximum chordal error allowed when approximating curves
    pub approximation: f64,
    /// Minimum positional delta for two points to be considered distinct
    pub operation: f64,
}

impl Tolerances {
    pub const DEFAULT: Tolerances = Tolerances {
        approximation: 0.01,
        operation: 1e-6,
    };

    /// Reject non-positive or non-finite values
    pub fn validate(&self) -> Result<()> {
        for (name, value) in [
            ("approximation", self.approximation),
            ("operation", self.operation),
        ] {
            if !(value.is_finite() && value > 0.0) {
                return Err(Error::InvalidTolerance { name, value });
            }
        }
        Ok(())
    }

    /// Decimal places needed to print coordinates at the operation tolerance.
    ///
    /// `1e-6` gives 6, `0.01` gives 2. Never less than 0.
    pub fn operation_precision(&self) -> usize {
        let digits = -self.operation.log10().round();
        if digits.is_finite() && digits > 0.0 {
            digits as usize
        } else {
            0
        }
    }
}

impl Default for Tolerances {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Set the process-wide tolerances.
///
/// Fails if the values are invalid or if tolerances were already configured.
pub fn configure_tolerances(tolerances: Tolerances) -> Result<()> {
    tolerances.validate()?;
    TOLERANCES
        .set(tolerances)
        .map_err(|_| Error::TolerancesAlreadyConfigured)?;
    tracing::debug!(
        approximation = tolerances.approximation,
        operation = tolerances.operation,
        "Configured process tolerances"
    );
    Ok(())
}

/// The configured tolerances, or the defaults if none were configured.
pub fn tolerances() -> Tolerances {
    TOLERANCES.get().copied().unwrap_or_default()
}
