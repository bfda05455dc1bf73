//! # CurveCAM Core
//!
//! Core types shared by every CurveCAM crate:
//! - [`Vector`] - immutable 2D value type used for all geometry
//! - [`Unit`] - the fixed set of machine units a program may select
//! - [`Tolerances`] - process-wide approximation and position tolerances
//! - [`Error`] - the shared error type

pub mod error;
pub mod tolerance;
pub mod units;
pub mod vector;

pub use error::{Error, Result};
pub use tolerance::{configure_tolerances, tolerances, Tolerances};
pub use units::Unit;
pub use vector::Vector;
