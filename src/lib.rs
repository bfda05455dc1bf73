//! # CurveCAM
//!
//! Compiles vector curves into machine programs for laser cutters, pen
//! plotters and CNC engravers:
//! - Lines, quadratic and cubic Beziers approximated within a tolerance
//! - Laser power and cutting speed modulated per curve from stroke styles
//! - Redundant repositioning suppressed between connected curves
//! - Multi-pass output with a controlled depth descent between passes
//!
//! ## Architecture
//!
//! CurveCAM is organized as a workspace with multiple crates:
//!
//! 1. **curvecam-core** - Vectors, units, process-wide tolerances, errors
//! 2. **curvecam-geometry** - Curves, line-segment chains, approximation
//! 3. **curvecam-compiler** - Command interface, G-code dialect, style parsing, compiler
//! 4. **curvecam-settings** - JSON/TOML job configuration
//! 5. **curvecam** - This facade and the `curvecam` binary

pub use curvecam_compiler::{
    check_power, derive_laser_settings, Compiler, CompilerError, CompilerParameters,
    CompilerResult, GcodeConfig, GcodeInterface, Interface, InterfaceError, LaserMode,
    LaserSettings, MoveTarget, StyleError,
};
pub use curvecam_core::{configure_tolerances, tolerances, Error, Result, Tolerances, Unit, Vector};
pub use curvecam_geometry::{
    approximate, approximate_with_tolerance, CubicBazier, Curve, GeometryError, Line,
    LineSegmentChain, QuadraticBezier, StrokeStyle,
};
pub use curvecam_settings::{Config, LaserConfig, MachineSettings, SettingsError};

use anyhow::Context;
use std::path::{Path, PathBuf};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Initialize logging with the default configuration
///
/// Sets up structured logging with:
/// - RUST_LOG environment variable support, `info` when unset
/// - Formatted output on stderr, keeping stdout free for programs
pub fn init_logging() -> anyhow::Result<()> {
    use tracing::level_filters::LevelFilter;
    use tracing_subscriber::fmt;
    use tracing_subscriber::prelude::*;
    use tracing_subscriber::EnvFilter;

    let env_filter = EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .from_env_lossy();

    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_level(true)
        .with_line_number(true);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .try_init()
        .map_err(|e| anyhow::anyhow!("Failed to initialize logging: {}", e))?;

    Ok(())
}

/// Read a job file: a JSON array of curves.
pub fn load_curves(path: &Path) -> anyhow::Result<Vec<Curve>> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read job file {}", path.display()))?;
    let curves: Vec<Curve> = serde_json::from_str(&content)
        .with_context(|| format!("Invalid job file {}", path.display()))?;
    tracing::debug!("Loaded {} curves from {}", curves.len(), path.display());
    Ok(curves)
}

/// Compile `curves` with the machine and laser settings of `config`.
///
/// Curves are approximated with the process-wide tolerances; call
/// [`configure_tolerances`] first to apply `config.tolerances`.
pub fn compile_curves(config: &Config, curves: &[Curve]) -> anyhow::Result<String> {
    let mut compiler = config
        .build_compiler()
        .context("Invalid machine configuration")?;
    compiler
        .append_curves(curves)
        .context("Failed to compile curves")?;
    let program = compiler.compile(config.machine.passes)?;
    Ok(program)
}

/// Output path used when none is given: the job path with `.gcode` appended.
pub fn default_output_path(job: &Path) -> PathBuf {
    let mut name = job.as_os_str().to_os_string();
    name.push(".gcode");
    PathBuf::from(name)
}
