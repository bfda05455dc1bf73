//! Job configuration for CurveCAM
//!
//! Provides configuration file handling and validation. Supports JSON and
//! TOML files; the format is chosen by the file extension.
//!
//! Configuration is organized into sections:
//! - Machine settings (speeds, pass depth, dwell, unit, prologue/epilogue)
//! - Laser settings (power scale, constant or dynamic mode)
//! - Tolerances (curve approximation and position equality)

use crate::error::{SettingsError, SettingsResult};
use curvecam_compiler::{Compiler, CompilerParameters, GcodeConfig, GcodeInterface, LaserMode};
use curvecam_core::{Tolerances, Unit};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Motion settings of the machine running the program
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MachineSettings {
    /// Feed rate for non-cutting moves in units/min
    pub movement_speed: f64,
    /// Feed rate for cutting moves in units/min
    pub cutting_speed: f64,
    /// Depth lowered between passes
    pub pass_depth: f64,
    /// Dwell before each reposition in milliseconds
    pub dwell_time: u64,
    /// Number of times the body is repeated
    pub passes: u32,
    /// Program unit (mm or in); omitted leaves the machine default
    pub unit: Option<String>,
    /// Commands to run after the preamble instead of switching the laser off
    pub custom_header: Option<Vec<String>>,
    /// Commands to close the program instead of switching the laser off
    pub custom_footer: Option<Vec<String>>,
}

impl Default for MachineSettings {
    fn default() -> Self {
        Self {
            movement_speed: 1000.0,
            cutting_speed: 300.0,
            pass_depth: 0.0,
            dwell_time: 0,
            passes: 1,
            unit: Some(Unit::Millimeters.name().to_string()),
            custom_header: None,
            custom_footer: None,
        }
    }
}

/// Laser output settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LaserConfig {
    /// `S` value sent for full power
    pub power_scale: f64,
    /// Constant (`M3`) or dynamic (`M4`) power
    pub laser_mode: LaserMode,
}

impl Default for LaserConfig {
    fn default() -> Self {
        Self {
            power_scale: 255.0,
            laser_mode: LaserMode::Constant,
        }
    }
}

/// Complete job configuration
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub machine: MachineSettings,
    pub laser: LaserConfig,
    pub tolerances: Tolerances,
}

enum Format {
    Json,
    Toml,
}

fn format_of(path: &Path) -> SettingsResult<Format> {
    match path.extension().and_then(|ext| ext.to_str()) {
        Some("json") => Ok(Format::Json),
        Some("toml") => Ok(Format::Toml),
        other => Err(SettingsError::UnsupportedFormat(
            other.unwrap_or("<none>").to_string(),
        )),
    }
}

impl Config {
    /// Create new config with defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Load and validate a configuration from a `.json` or `.toml` file
    pub fn load_from_file(path: &Path) -> SettingsResult<Self> {
        let format = format_of(path)?;
        let content = std::fs::read_to_string(path)?;

        let config: Self = match format {
            Format::Json => serde_json::from_str(&content)?,
            Format::Toml => toml::from_str(&content)?,
        };

        config.validate()?;
        tracing::debug!("Loaded configuration from {}", path.display());
        Ok(config)
    }

    /// Validate and write the configuration to a `.json` or `.toml` file
    pub fn save_to_file(&self, path: &Path) -> SettingsResult<()> {
        self.validate()?;

        let content = match format_of(path)? {
            Format::Json => serde_json::to_string_pretty(self)?,
            Format::Toml => toml::to_string_pretty(self)?,
        };

        std::fs::write(path, content)?;
        tracing::info!("Saved configuration to {}", path.display());
        Ok(())
    }

    /// Check every value the compiler relies on
    pub fn validate(&self) -> SettingsResult<()> {
        let machine = &self.machine;

        if !(machine.movement_speed.is_finite() && machine.movement_speed > 0.0) {
            return Err(SettingsError::invalid("machine.movement_speed", "must be > 0"));
        }

        if !(machine.cutting_speed.is_finite() && machine.cutting_speed > 0.0) {
            return Err(SettingsError::invalid("machine.cutting_speed", "must be > 0"));
        }

        if !machine.pass_depth.is_finite() {
            return Err(SettingsError::invalid("machine.pass_depth", "must be finite"));
        }

        if machine.passes == 0 {
            return Err(SettingsError::invalid("machine.passes", "must be >= 1"));
        }

        if let Err(err) = Unit::parse_optional(machine.unit.as_deref()) {
            return Err(SettingsError::invalid("machine.unit", err.to_string()));
        }

        if !(self.laser.power_scale.is_finite() && self.laser.power_scale > 0.0) {
            return Err(SettingsError::invalid("laser.power_scale", "must be > 0"));
        }

        if let Err(err) = self.tolerances.validate() {
            return Err(SettingsError::invalid("tolerances", err.to_string()));
        }

        Ok(())
    }

    /// Compiler parameters described by the machine section
    pub fn compiler_parameters(&self) -> CompilerParameters {
        let machine = &self.machine;
        CompilerParameters {
            movement_speed: machine.movement_speed,
            cutting_speed: machine.cutting_speed,
            pass_depth: machine.pass_depth,
            dwell_time: machine.dwell_time,
            unit: machine.unit.clone(),
            custom_header: machine.custom_header.clone(),
            custom_footer: machine.custom_footer.clone(),
        }
    }

    /// G-code dialect settings described by the laser section
    ///
    /// Coordinate precision follows the configured operation tolerance.
    pub fn gcode_config(&self) -> GcodeConfig {
        GcodeConfig {
            power_scale: self.laser.power_scale,
            laser_mode: self.laser.laser_mode,
            precision: Some(self.tolerances.operation_precision()),
        }
    }

    /// Validate and build a G-code compiler for this configuration
    pub fn build_compiler(&self) -> SettingsResult<Compiler<GcodeInterface>> {
        self.validate()?;
        let interface = GcodeInterface::with_config(self.gcode_config());
        Ok(Compiler::new(interface, self.compiler_parameters())?)
    }
}
