//! # CurveCAM Geometry
//!
//! Curve primitives and their approximation as connected line-segment chains.
//!
//! ## Contents
//!
//! - **Curves**: [`Line`], [`QuadraticBezier`] and [`CubicBazier`], unified by
//!   the [`Curve`] sum type
//! - **Style payload**: [`StrokeStyle`], carried untouched by every curve and
//!   segment for the compiler to interpret
//! - **Chains**: [`LineSegmentChain`], an ordered connected polyline
//! - **Approximation**: [`approximate`] turns any curve into a chain whose
//!   deviation from the curve stays within the approximation tolerance

pub mod approximation;
pub mod chain;
pub mod curve;
pub mod error;
pub mod style;

pub use approximation::{
    approximate, approximate_with_tolerance, chord_error, segment_count, MAX_SEGMENTS,
};
pub use chain::LineSegmentChain;
pub use curve::{CubicBazier, Curve, Line, QuadraticBezier};
pub use error::{GeometryError, GeometryResult};
pub use style::StrokeStyle;

pub use curvecam_core::Vector;
