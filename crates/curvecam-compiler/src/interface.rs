//! Machine command interface.
//!
//! The compiler never writes protocol syntax itself. It asks an [`Interface`]
//! for one literal command per operation, so a different controller dialect
//! only needs a different implementation of this trait.

use crate::error::InterfaceError;
use curvecam_core::{Unit, Vector};

/// Axis words of a linear move. Omitted axes keep their current value.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct MoveTarget {
    pub x: Option<f64>,
    pub y: Option<f64>,
    pub z: Option<f64>,
    pub c: Option<f64>,
}

impl MoveTarget {
    /// Move in the drawing plane.
    pub fn xy(x: f64, y: f64) -> Self {
        Self {
            x: Some(x),
            y: Some(y),
            ..Self::default()
        }
    }

    /// Move to a point in the drawing plane.
    pub fn to(point: Vector) -> Self {
        Self::xy(point.x, point.y)
    }

    /// Move along Z only.
    pub fn z(z: f64) -> Self {
        Self {
            z: Some(z),
            ..Self::default()
        }
    }

    pub fn with_c(mut self, c: f64) -> Self {
        self.c = Some(c);
        self
    }

    /// True when no axis word is set.
    pub fn is_empty(&self) -> bool {
        self.x.is_none() && self.y.is_none() && self.z.is_none() && self.c.is_none()
    }
}

/// Emits literal machine commands.
///
/// Every method returns exactly one command; an empty string means "nothing to
/// send" and is dropped when the program is assembled.
///
/// Implementations must:
/// - reject laser power outside `[0, 1]` with [`InterfaceError::PowerOutOfRange`]
/// - update [`position`](Interface::position) from [`linear_move`](Interface::linear_move)
pub trait Interface {
    /// Turn the laser (or tool) off.
    fn laser_off(&mut self) -> String;

    /// Set laser power as a fraction of maximum.
    fn set_laser_power(&mut self, power: f64) -> Result<String, InterfaceError>;

    /// Set the feed rate for subsequent moves.
    fn set_movement_speed(&mut self, speed: f64) -> String;

    /// Interpret coordinates as absolute positions.
    fn set_absolute_coordinates(&mut self) -> String;

    /// Interpret coordinates as offsets from the current position.
    fn set_relative_coordinates(&mut self) -> String;

    /// Straight move to `target`; updates the tracked position.
    fn linear_move(&mut self, target: MoveTarget) -> String;

    /// Select the program unit; `None` leaves the machine default.
    fn set_unit(&mut self, unit: Option<Unit>) -> String;

    /// Pause for `milliseconds`.
    fn dwell(&mut self, milliseconds: u64) -> String;

    /// Last absolute position reached in the drawing plane, if known.
    fn position(&self) -> Option<Vector>;
}

/// Checks the `[0, 1]` power contract. Shared by implementations.
pub fn check_power(power: f64) -> Result<f64, InterfaceError> {
    if (0.0..=1.0).contains(&power) {
        Ok(power)
    } else {
        Err(InterfaceError::PowerOutOfRange { power })
    }
}
