//! Error types for the compiler crate.
//!
//! This module provides structured error types for command emission,
//! style parsing and program assembly.

use std::io;
use thiserror::Error;

/// Errors raised by an [`Interface`](crate::Interface) while emitting commands.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum InterfaceError {
    /// Laser power must lie in `[0, 1]`; the interface scales it.
    #[error(
        "{power} is out of bounds. Laser power must be given between 0 and 1. \
         The interface will scale it correctly."
    )]
    PowerOutOfRange { power: f64 },
}

/// Errors raised while parsing inline style strings and colors.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum StyleError {
    /// A declaration is not of the form `key:value`.
    #[error("Malformed style declaration: '{0}'")]
    MalformedDeclaration(String),

    /// A color value could not be understood.
    #[error("Invalid color: '{0}'")]
    InvalidColor(String),

    /// A numeric value could not be parsed.
    #[error("Invalid number for '{key}': '{value}'")]
    InvalidNumber { key: String, value: String },
}

/// Errors that can occur while building a program.
#[derive(Error, Debug)]
pub enum CompilerError {
    /// Invalid unit or other core-level failure.
    #[error(transparent)]
    Core(#[from] curvecam_core::Error),

    /// A curve failed its validation hook.
    #[error("Geometry error: {0}")]
    Geometry(#[from] curvecam_geometry::GeometryError),

    /// The interface refused to emit a command.
    #[error("Interface error: {0}")]
    Interface(#[from] InterfaceError),

    /// I/O error while writing the program.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

/// Result type alias for compiler operations.
pub type CompilerResult<T> = Result<T, CompilerError>;
