//! Connected line-segment chains.

use crate::curve::Line;
use crate::error::{GeometryError, GeometryResult};
use crate::style::StrokeStyle;
use curvecam_core::{tolerances, Vector};

/// An ordered sequence of line segments where each segment starts where the
/// previous one ends.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LineSegmentChain {
    segments: Vec<Line>,
}

impl LineSegmentChain {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a chain through `points`, every segment carrying `style`.
    ///
    /// Fewer than two points give an empty chain.
    pub fn from_points(points: &[Vector], style: &StrokeStyle) -> Self {
        let segments = points
            .windows(2)
            .map(|pair| Line::new(pair[0], pair[1]).with_style(style.clone()))
            .collect();
        Self { segments }
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Line> {
        self.segments.get(index)
    }

    pub fn first(&self) -> Option<&Line> {
        self.segments.first()
    }

    pub fn last(&self) -> Option<&Line> {
        self.segments.last()
    }

    pub fn start(&self) -> Option<Vector> {
        self.first().map(|s| s.start)
    }

    pub fn end(&self) -> Option<Vector> {
        self.last().map(|s| s.end)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Line> {
        self.segments.iter()
    }

    /// Total length of all segments.
    pub fn length(&self) -> f64 {
        self.segments.iter().map(Line::length).sum()
    }

    /// Append a segment, rejecting it if it does not continue the chain.
    pub fn append(&mut self, segment: Line) -> GeometryResult<()> {
        if let Some(end) = self.end() {
            if !end.approx_eq(&segment.start, tolerances().operation) {
                return Err(GeometryError::Disconnected {
                    expected: end,
                    found: segment.start,
                });
            }
        }
        self.segments.push(segment);
        Ok(())
    }

    /// Append every segment of `other`. Stops at the first disconnected one.
    pub fn extend(&mut self, other: LineSegmentChain) -> GeometryResult<()> {
        for segment in other {
            self.append(segment)?;
        }
        Ok(())
    }
}

impl IntoIterator for LineSegmentChain {
    type Item = Line;
    type IntoIter = std::vec::IntoIter<Line>;

    fn into_iter(self) -> Self::IntoIter {
        self.segments.into_iter()
    }
}

impl<'a> IntoIterator for &'a LineSegmentChain {
    type Item = &'a Line;
    type IntoIter = std::slice::Iter<'a, Line>;

    fn into_iter(self) -> Self::IntoIter {
        self.segments.iter()
    }
}
