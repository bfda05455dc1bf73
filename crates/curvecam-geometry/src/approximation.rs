//! Tolerance-bounded approximation of curves by line-segment chains.
//!
//! A [`Line`](crate::Line) is already straight and becomes a single segment.
//! Beziers are split at uniformly spaced parameters; the segment count is the
//! smallest `n` whose chords all stay within the tolerance of the curve.
//!
//! The search is capped by the classic uniform-subdivision bound
//! `n >= sqrt(M / (8 * tolerance))`, where `M` bounds the magnitude of the
//! curve's second derivative. At that `n` the bound holds analytically, so
//! the search always terminates with a valid chain. Because the accepted `n`
//! is the first one meeting the tolerance, tightening the tolerance can only
//! keep or raise the count.

use crate::chain::LineSegmentChain;
use crate::curve::{Curve, Line};
use curvecam_core::{tolerances, Vector};

/// Hard ceiling on the number of segments produced for one curve.
pub const MAX_SEGMENTS: usize = 2048;

/// Interior samples measured along each chord.
const SAMPLES_PER_CHORD: usize = 16;

/// Ternary-search steps refining the worst sample of a chord.
const REFINE_STEPS: usize = 48;

/// Approximate `curve` using the process-wide approximation tolerance.
pub fn approximate(curve: &Curve) -> LineSegmentChain {
    approximate_with_tolerance(curve, tolerances().approximation)
}

/// Approximate `curve` so that no point of it lies further than `tolerance`
/// from the returned chain.
///
/// Every segment carries the curve's style payload.
pub fn approximate_with_tolerance(curve: &Curve, tolerance: f64) -> LineSegmentChain {
    let n = segment_count(curve, tolerance);
    let points = sample_points(curve, n);

    tracing::trace!(
        curve = curve.kind(),
        segments = n,
        tolerance,
        "Approximated curve"
    );

    LineSegmentChain::from_points(&points, curve.style())
}

/// Number of uniform segments needed to keep `curve` within `tolerance`.
pub fn segment_count(curve: &Curve, tolerance: f64) -> usize {
    if matches!(curve, Curve::Line(_)) {
        return 1;
    }

    let cap = segment_bound(curve, tolerance);
    // The sampled error never exceeds the refined one, so it screens cheaply.
    let found = (1..cap).find(|&n| {
        deviation(curve, n, false) <= tolerance && chord_error(curve, n) <= tolerance
    });

    match found {
        Some(n) => n,
        None => {
            if cap == MAX_SEGMENTS && chord_error(curve, cap) > tolerance {
                tracing::warn!(
                    curve = curve.kind(),
                    segments = cap,
                    tolerance,
                    "Segment ceiling reached before the tolerance was met"
                );
            }
            cap
        }
    }
}

/// Largest distance between `curve` and its `n`-chord uniform approximation.
///
/// Each chord is sampled uniformly and the worst sample is then refined by a
/// ternary search between its neighbours.
pub fn chord_error(curve: &Curve, n: usize) -> f64 {
    deviation(curve, n, true)
}

fn deviation(curve: &Curve, n: usize, refine: bool) -> f64 {
    let n = n.max(1);
    let points = sample_points(curve, n);
    let step = 1.0 / ((SAMPLES_PER_CHORD + 1) * n) as f64;

    points
        .windows(2)
        .enumerate()
        .map(|(i, pair)| {
            let chord = Line::new(pair[0], pair[1]);
            let distance = |t: f64| chord.distance_to_point(curve.point(t));
            let chord_start = i as f64 / n as f64;

            let (worst_t, worst) = (1..=SAMPLES_PER_CHORD)
                .map(|k| {
                    let t = chord_start + k as f64 * step;
                    (t, distance(t))
                })
                .fold((chord_start, 0.0), |best, sample| {
                    if sample.1 > best.1 {
                        sample
                    } else {
                        best
                    }
                });

            if refine && worst > 0.0 {
                worst.max(refine_peak(&distance, worst_t - step, worst_t + step))
            } else {
                worst
            }
        })
        .fold(0.0, f64::max)
}

/// Local maximum of `f` on `[lo, hi]`.
fn refine_peak(f: impl Fn(f64) -> f64, mut lo: f64, mut hi: f64) -> f64 {
    for _ in 0..REFINE_STEPS {
        let third = (hi - lo) / 3.0;
        let (a, b) = (lo + third, hi - third);
        if f(a) < f(b) {
            lo = a;
        } else {
            hi = b;
        }
    }
    f((lo + hi) / 2.0)
}

/// `n + 1` points at uniform parameters, with exact endpoints.
fn sample_points(curve: &Curve, n: usize) -> Vec<Vector> {
    let n = n.max(1);
    let mut points: Vec<Vector> = (0..=n)
        .map(|i| curve.point(i as f64 / n as f64))
        .collect();
    points[0] = curve.start();
    points[n] = curve.end();
    points
}

/// Segment count at which the uniform-subdivision error bound guarantees
/// `tolerance`, clamped to `1..=MAX_SEGMENTS`.
fn segment_bound(curve: &Curve, tolerance: f64) -> usize {
    if !(tolerance.is_finite() && tolerance > 0.0) {
        return MAX_SEGMENTS;
    }

    let second_derivative = max_second_derivative(curve);
    let n = (second_derivative / (8.0 * tolerance)).sqrt().ceil();
    if n.is_finite() {
        (n as usize).clamp(1, MAX_SEGMENTS)
    } else {
        MAX_SEGMENTS
    }
}

/// Upper bound on `|curve''(t)|` over `[0, 1]`: the largest second
/// difference of the control polygon scaled by `d * (d - 1)` for degree `d`.
fn max_second_derivative(curve: &Curve) -> f64 {
    let polygon = curve.control_polygon();
    let degree = (polygon.len() - 1) as f64;
    let largest = polygon
        .windows(3)
        .map(|w| (w[0] - 2.0 * w[1] + w[2]).magnitude())
        .fold(0.0, f64::max);
    degree * (degree - 1.0) * largest
}
