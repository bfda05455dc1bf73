//! Default G-code dialect.
//!
//! Emits GRBL-style laser commands, one per line, each terminated by `;`:
//!
//! | Operation | Command |
//! |-----------|---------|
//! | laser off | `M5;` (constant) / `M4 S0;` (dynamic) |
//! | laser power | `M3 S<n>;` / `M4 S<n>;`, `n = power * power_scale` |
//! | feed rate | `F<speed>;` |
//! | absolute / relative | `G90;` / `G91;` |
//! | linear move | `G1 X.. Y.. Z.. C..;` |
//! | unit | `G21;` (mm) / `G20;` (in) |
//! | dwell | `G4 P<ms>;` |

use crate::error::InterfaceError;
use crate::interface::{check_power, Interface, MoveTarget};
use curvecam_core::{tolerances, Unit, Vector};
use serde::{Deserialize, Serialize};

/// How the spindle/laser enable command is issued.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LaserMode {
    /// `M3`: constant power regardless of motion
    #[default]
    Constant,
    /// `M4`: power scaled with feed rate by the controller
    Dynamic,
}

/// Tunables of the G-code dialect.
#[derive(Debug, Clone, PartialEq)]
pub struct GcodeConfig {
    /// `S` value emitted for full power
    pub power_scale: f64,
    pub laser_mode: LaserMode,
    /// Decimal places for coordinates; `None` derives it from the operation tolerance
    pub precision: Option<usize>,
}

impl Default for GcodeConfig {
    fn default() -> Self {
        Self {
            power_scale: 255.0,
            laser_mode: LaserMode::Constant,
            precision: None,
        }
    }
}

/// GRBL-flavoured G-code emitter.
#[derive(Debug, Clone)]
pub struct GcodeInterface {
    config: GcodeConfig,
    precision: usize,
    position: Option<Vector>,
    relative: bool,
}

impl GcodeInterface {
    pub fn new() -> Self {
        Self::with_config(GcodeConfig::default())
    }

    pub fn with_config(config: GcodeConfig) -> Self {
        let precision = config
            .precision
            .unwrap_or_else(|| tolerances().operation_precision());
        Self {
            config,
            precision,
            position: None,
            relative: false,
        }
    }

    pub fn config(&self) -> &GcodeConfig {
        &self.config
    }

    /// Run the homing cycle. The position is unknown until the next move.
    pub fn home_axes(&mut self) -> String {
        self.position = None;
        "G28;".to_string()
    }

    /// Declare the current location as the origin.
    pub fn set_origin_at_position(&mut self) -> String {
        self.position = Some(Vector::ZERO);
        "G92 X0 Y0 Z0;".to_string()
    }

    fn enable_word(&self) -> &'static str {
        match self.config.laser_mode {
            LaserMode::Constant => "M3",
            LaserMode::Dynamic => "M4",
        }
    }

    fn track(&mut self, target: &MoveTarget) {
        if self.relative {
            if let Some(p) = self.position {
                self.position = Some(Vector::new(
                    p.x + target.x.unwrap_or(0.0),
                    p.y + target.y.unwrap_or(0.0),
                ));
            }
            return;
        }

        match (self.position, target.x, target.y) {
            (_, Some(x), Some(y)) => self.position = Some(Vector::new(x, y)),
            (Some(p), x, y) => self.position = Some(Vector::new(x.unwrap_or(p.x), y.unwrap_or(p.y))),
            (None, _, _) => {}
        }
    }
}

impl Default for GcodeInterface {
    fn default() -> Self {
        Self::new()
    }
}

/// Format a feed rate without float noise: at most three decimals, no
/// trailing zeros.
fn format_speed(speed: f64) -> String {
    let text = format!("{:.3}", speed);
    let text = text.trim_end_matches('0').trim_end_matches('.');
    if text == "-0" {
        "0".to_string()
    } else {
        text.to_string()
    }
}

impl Interface for GcodeInterface {
    fn laser_off(&mut self) -> String {
        match self.config.laser_mode {
            LaserMode::Constant => "M5;".to_string(),
            LaserMode::Dynamic => "M4 S0;".to_string(),
        }
    }

    fn set_laser_power(&mut self, power: f64) -> Result<String, InterfaceError> {
        let power = check_power(power)?;
        let value = (power * self.config.power_scale).round() as i64;
        Ok(format!("{} S{};", self.enable_word(), value))
    }

    fn set_movement_speed(&mut self, speed: f64) -> String {
        format!("F{};", format_speed(speed))
    }

    fn set_absolute_coordinates(&mut self) -> String {
        self.relative = false;
        "G90;".to_string()
    }

    fn set_relative_coordinates(&mut self) -> String {
        self.relative = true;
        "G91;".to_string()
    }

    fn linear_move(&mut self, target: MoveTarget) -> String {
        if target.is_empty() {
            tracing::warn!("linear_move command invoked without arguments");
            return String::new();
        }

        let precision = self.precision;
        let mut command = String::from("G1");
        for (word, value) in [('X', target.x), ('Y', target.y), ('Z', target.z), ('C', target.c)] {
            if let Some(value) = value {
                command.push_str(&format!(" {}{:.*}", word, precision, value));
            }
        }
        command.push(';');

        self.track(&target);
        command
    }

    fn set_unit(&mut self, unit: Option<Unit>) -> String {
        match unit {
            Some(Unit::Millimeters) => "G21;".to_string(),
            Some(Unit::Inches) => "G20;".to_string(),
            None => String::new(),
        }
    }

    fn dwell(&mut self, milliseconds: u64) -> String {
        format!("G4 P{};", milliseconds)
    }

    fn position(&self) -> Option<Vector> {
        self.position
    }
}
