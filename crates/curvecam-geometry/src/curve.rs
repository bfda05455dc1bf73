//! Parametric curve primitives.
//!
//! Every curve is defined over `t ∈ [0, 1]` with `point(0) == start` and
//! `point(1) == end`. Parameters outside that range are clamped.

use crate::error::{GeometryError, GeometryResult};
use crate::style::StrokeStyle;
use curvecam_core::Vector;
use serde::{Deserialize, Serialize};

/// A straight line segment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "LineRepr", into = "LineRepr")]
pub struct Line {
    pub start: Vector,
    pub end: Vector,
    pub style: StrokeStyle,
    slope: Option<f64>,
    offset: Option<f64>,
}

/// Serialized form of a [`Line`]; slope and offset are derived on load.
#[derive(Serialize, Deserialize)]
struct LineRepr {
    start: Vector,
    end: Vector,
    #[serde(default)]
    style: StrokeStyle,
}

impl From<LineRepr> for Line {
    fn from(repr: LineRepr) -> Self {
        Line::new(repr.start, repr.end).with_style(repr.style)
    }
}

impl From<Line> for LineRepr {
    fn from(line: Line) -> Self {
        Self {
            start: line.start,
            end: line.end,
            style: line.style,
        }
    }
}

impl Line {
    pub fn new(start: Vector, end: Vector) -> Self {
        let dx = end.x - start.x;
        let (slope, offset) = if dx != 0.0 {
            let slope = (end.y - start.y) / dx;
            (Some(slope), Some(start.y - slope * start.x))
        } else {
            (None, None)
        };

        Self {
            start,
            end,
            style: StrokeStyle::default(),
            slope,
            offset,
        }
    }

    pub fn with_style(mut self, style: StrokeStyle) -> Self {
        self.style = style;
        self
    }

    /// dy/dx, or `None` for a vertical (or zero-length) line.
    pub fn slope(&self) -> Option<f64> {
        self.slope
    }

    /// y-intercept, or `None` for a vertical (or zero-length) line.
    pub fn offset(&self) -> Option<f64> {
        self.offset
    }

    pub fn length(&self) -> f64 {
        self.start.distance_to(&self.end)
    }

    pub fn point(&self, t: f64) -> Vector {
        let t = t.clamp(0.0, 1.0);
        self.start + t * (self.end - self.start)
    }

    /// Constant direction of travel.
    pub fn derivative(&self, _t: f64) -> Vector {
        self.end - self.start
    }

    /// Shortest distance from `p` to this segment.
    pub fn distance_to_point(&self, p: Vector) -> f64 {
        let d = self.end - self.start;
        let len_sq = d.dot(&d);
        if len_sq == 0.0 {
            return p.distance_to(&self.start);
        }
        let t = ((p - self.start).dot(&d) / len_sq).clamp(0.0, 1.0);
        p.distance_to(&(self.start + t * d))
    }

    pub fn validate(&self) -> GeometryResult<()> {
        if self.start.is_finite() && self.end.is_finite() {
            Ok(())
        } else {
            Err(GeometryError::NonFinite { curve: "Line" })
        }
    }
}

/// A quadratic Bezier curve with one control point.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuadraticBezier {
    pub start: Vector,
    pub end: Vector,
    pub control: Vector,
    #[serde(default)]
    pub style: StrokeStyle,
}

impl QuadraticBezier {
    pub fn new(start: Vector, end: Vector, control: Vector) -> Self {
        Self {
            start,
            end,
            control,
            style: StrokeStyle::default(),
        }
    }

    pub fn with_style(mut self, style: StrokeStyle) -> Self {
        self.style = style;
        self
    }

    pub fn point(&self, t: f64) -> Vector {
        let t = t.clamp(0.0, 1.0);
        let mt = 1.0 - t;
        self.control + (mt * mt) * (self.start - self.control) + (t * t) * (self.end - self.control)
    }

    pub fn derivative(&self, t: f64) -> Vector {
        let t = t.clamp(0.0, 1.0);
        2.0 * (1.0 - t) * (self.control - self.start) + 2.0 * t * (self.end - self.control)
    }

    // Start and end may coincide: a closed quadratic is still a valid curve.
    pub fn validate(&self) -> GeometryResult<()> {
        if [self.start, self.end, self.control]
            .iter()
            .all(Vector::is_finite)
        {
            Ok(())
        } else {
            Err(GeometryError::NonFinite {
                curve: "QuadraticBezier",
            })
        }
    }
}

/// A cubic Bezier curve with two control points.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CubicBazier {
    pub start: Vector,
    pub end: Vector,
    pub control1: Vector,
    pub control2: Vector,
    #[serde(default)]
    pub style: StrokeStyle,
}

impl CubicBazier {
    pub fn new(start: Vector, end: Vector, control1: Vector, control2: Vector) -> Self {
        Self {
            start,
            end,
            control1,
            control2,
            style: StrokeStyle::default(),
        }
    }

    pub fn with_style(mut self, style: StrokeStyle) -> Self {
        self.style = style;
        self
    }

    pub fn point(&self, t: f64) -> Vector {
        let t = t.clamp(0.0, 1.0);
        let mt = 1.0 - t;
        let mt2 = mt * mt;
        let t2 = t * t;
        (mt2 * mt) * self.start
            + (3.0 * mt2 * t) * self.control1
            + (3.0 * mt * t2) * self.control2
            + (t2 * t) * self.end
    }

    pub fn derivative(&self, t: f64) -> Vector {
        let t = t.clamp(0.0, 1.0);
        let mt = 1.0 - t;
        (3.0 * mt * mt) * (self.control1 - self.start)
            + (6.0 * mt * t) * (self.control2 - self.control1)
            + (3.0 * t * t) * (self.end - self.control2)
    }

    pub fn validate(&self) -> GeometryResult<()> {
        if [self.start, self.end, self.control1, self.control2]
            .iter()
            .all(Vector::is_finite)
        {
            Ok(())
        } else {
            Err(GeometryError::NonFinite {
                curve: "CubicBazier",
            })
        }
    }
}

/// Any curve the compiler can consume.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Curve {
    Line(Line),
    QuadraticBezier(QuadraticBezier),
    CubicBazier(CubicBazier),
}

impl Curve {
    /// Variant name, used in logs and errors.
    pub fn kind(&self) -> &'static str {
        match self {
            Curve::Line(_) => "Line",
            Curve::QuadraticBezier(_) => "QuadraticBezier",
            Curve::CubicBazier(_) => "CubicBazier",
        }
    }

    pub fn start(&self) -> Vector {
        match self {
            Curve::Line(c) => c.start,
            Curve::QuadraticBezier(c) => c.start,
            Curve::CubicBazier(c) => c.start,
        }
    }

    pub fn end(&self) -> Vector {
        match self {
            Curve::Line(c) => c.end,
            Curve::QuadraticBezier(c) => c.end,
            Curve::CubicBazier(c) => c.end,
        }
    }

    pub fn style(&self) -> &StrokeStyle {
        match self {
            Curve::Line(c) => &c.style,
            Curve::QuadraticBezier(c) => &c.style,
            Curve::CubicBazier(c) => &c.style,
        }
    }

    pub fn point(&self, t: f64) -> Vector {
        match self {
            Curve::Line(c) => c.point(t),
            Curve::QuadraticBezier(c) => c.point(t),
            Curve::CubicBazier(c) => c.point(t),
        }
    }

    pub fn derivative(&self, t: f64) -> Vector {
        match self {
            Curve::Line(c) => c.derivative(t),
            Curve::QuadraticBezier(c) => c.derivative(t),
            Curve::CubicBazier(c) => c.derivative(t),
        }
    }

    /// Reject curves whose parameters cannot be drawn.
    pub fn validate(&self) -> GeometryResult<()> {
        match self {
            Curve::Line(c) => c.validate(),
            Curve::QuadraticBezier(c) => c.validate(),
            Curve::CubicBazier(c) => c.validate(),
        }
    }

    /// The points that fully define the curve, in Bezier order.
    pub fn control_polygon(&self) -> Vec<Vector> {
        match self {
            Curve::Line(c) => vec![c.start, c.end],
            Curve::QuadraticBezier(c) => vec![c.start, c.control, c.end],
            Curve::CubicBazier(c) => vec![c.start, c.control1, c.control2, c.end],
        }
    }
}

impl From<Line> for Curve {
    fn from(line: Line) -> Self {
        Curve::Line(line)
    }
}

impl From<QuadraticBezier> for Curve {
    fn from(curve: QuadraticBezier) -> Self {
        Curve::QuadraticBezier(curve)
    }
}

impl From<CubicBazier> for Curve {
    fn from(curve: CubicBazier) -> Self {
        Curve::CubicBazier(curve)
    }
}
