//! CurveCAM Settings Crate
//!
//! Loads and saves the machine, laser and tolerance configuration of a job
//! and turns it into a ready-to-use [`Compiler`](curvecam_compiler::Compiler).

pub mod config;
pub mod error;

pub use config::{Config, LaserConfig, MachineSettings};
pub use error::{SettingsError, SettingsResult};
