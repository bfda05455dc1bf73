//! # CurveCAM Compiler
//!
//! Turns curves into a machine program.
//!
//! ## Components
//!
//! - **Interface**: the [`Interface`] trait emits one literal command per call;
//!   [`GcodeInterface`] is the default G-code dialect
//! - **Style**: [`derive_laser_settings`] maps stroke attributes to laser power
//!   and a cutting speed multiplier
//! - **Compiler**: [`Compiler`] buffers header, body and footer, suppresses
//!   redundant repositioning, and repeats the body for multi-pass cuts

pub mod compiler;
pub mod error;
pub mod gcode;
pub mod interface;
pub mod style;

pub use compiler::{Compiler, CompilerParameters};
pub use error::{CompilerError, CompilerResult, InterfaceError, StyleError};
pub use gcode::{GcodeConfig, GcodeInterface, LaserMode};
pub use interface::{check_power, Interface, MoveTarget};
pub use style::{
    derive_laser_settings, gray_value, parse_color, parse_style, width_power, LaserSettings, Rgb,
    StyleMap,
};
