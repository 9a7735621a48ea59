//! Curve fitting: one stroke's polyline → cubic beziers.
//!
//! Per stroke:
//! 1. Chord-length parameterization of the input points
//! 2. Least-squares control-point solve with fixed endpoint tangents
//! 3. Newton-Raphson reparameterization retries
//! 4. Recursive subdivision at the worst point until the error bound
//!    holds, bottoming out at a 2-point straight cubic
//!
//! The error bound is geometric: the candidate curve is sampled and the
//! deviation from the nearest polyline segment must stay within the
//! tolerance everywhere, as must the input points themselves.

use kurbo::{CubicBez, Line, ParamCurve, ParamCurveDeriv, ParamCurveNearest, Point, Vec2};

use crate::error::ConvertError;

/// Newton-Raphson retries before giving up and subdividing.
const MAX_REPARAM_ITERATIONS: usize = 4;

/// Only retry reparameterization when the error is within this factor
/// of the tolerance; a grossly bad fit goes straight to subdivision.
const REPARAM_ERROR_FACTOR: f64 = 4.0;

/// Accuracy for nearest-point queries against polyline segments.
const NEAREST_ACCURACY: f64 = 1e-9;

/// Fit a sequence of cubic beziers to one stroke's polyline.
///
/// Consecutive output curves share endpoints: the first curve starts at
/// the polyline's first point, each curve starts where the previous one
/// ended, and the last curve ends at the polyline's last point. Every
/// output curve deviates from the polyline by at most `tolerance`,
/// except the 2-point base case, which is a straight cubic along the
/// chord and has no residual to speak of.
///
/// A non-positive or non-finite tolerance would force unbounded
/// subdivision and is rejected up front.
pub fn fit_stroke(points: &[Point], tolerance: f64) -> Result<Vec<CubicBez>, ConvertError> {
    if !tolerance.is_finite() || tolerance <= 0.0 {
        return Err(ConvertError::InvalidTolerance(tolerance));
    }
    if points.len() < 2 {
        return Ok(Vec::new());
    }

    let left_tangent = end_tangent(points, false);
    let right_tangent = end_tangent(points, true);

    let mut curves = Vec::new();
    fit_span(points, left_tangent, right_tangent, tolerance, &mut curves);
    Ok(curves)
}

/// Fit one span, subdividing as needed. Appends to `out` in order.
fn fit_span(points: &[Point], t_left: Vec2, t_right: Vec2, tolerance: f64, out: &mut Vec<CubicBez>) {
    // Base case: 2 points carry no curvature. A straight cubic with
    // controls on the chord is exact for this span.
    if points.len() == 2 {
        out.push(chord_cubic(points[0], points[1]));
        return;
    }

    let mut params = chord_length_parameterize(points);
    let mut best: Option<(CubicBez, f64, usize)> = None;

    for _ in 0..=MAX_REPARAM_ITERATIONS {
        let candidate = generate_bezier(points, &params, t_left, t_right);
        let (error, split) = max_deviation(&candidate, points, &params);
        if error <= tolerance {
            out.push(candidate);
            return;
        }
        match best {
            Some((_, best_error, _)) if best_error <= error => {}
            _ => best = Some((candidate, error, split)),
        }
        if error > tolerance * REPARAM_ERROR_FACTOR {
            break;
        }
        params = reparameterize(&candidate, points, &params);
    }

    // Subdivide at the worst point with a centered tangent so the two
    // halves join smoothly.
    let (_, _, split) = best.unwrap();
    let split = split.clamp(1, points.len() - 2);
    let t_center = center_tangent(points, split);
    fit_span(&points[..=split], t_left, t_center, tolerance, out);
    fit_span(&points[split..], -t_center, t_right, tolerance, out);
}

// ── Candidate generation ─────────────────────────────────

/// Least-squares solve for the two control-point distances along the
/// fixed endpoint tangents (Schneider's generate-bezier step).
fn generate_bezier(points: &[Point], params: &[f64], t_left: Vec2, t_right: Vec2) -> CubicBez {
    let first = *points.first().unwrap();
    let last = *points.last().unwrap();

    let mut c = [[0.0f64; 2]; 2];
    let mut x = [0.0f64; 2];

    for (p, &u) in points.iter().zip(params) {
        let [b0, b1, b2, b3] = bernstein(u);
        let a0 = t_left * b1;
        let a1 = t_right * b2;

        c[0][0] += a0.dot(a0);
        c[0][1] += a0.dot(a1);
        c[1][1] += a1.dot(a1);

        let residual = p.to_vec2() - first.to_vec2() * (b0 + b1) - last.to_vec2() * (b2 + b3);
        x[0] += a0.dot(residual);
        x[1] += a1.dot(residual);
    }
    c[1][0] = c[0][1];

    let det_c = c[0][0] * c[1][1] - c[0][1] * c[1][0];
    let det_x0 = x[0] * c[1][1] - x[1] * c[0][1];
    let det_x1 = c[0][0] * x[1] - c[1][0] * x[0];

    let mut alpha_l = if det_c.abs() > f64::EPSILON { det_x0 / det_c } else { 0.0 };
    let mut alpha_r = if det_c.abs() > f64::EPSILON { det_x1 / det_c } else { 0.0 };

    // Degenerate or inverted solution: fall back to the Wu/Barsky
    // heuristic of a third of the chord length along each tangent.
    let chord = (last - first).hypot();
    let epsilon = 1e-6 * chord;
    if alpha_l < epsilon || alpha_r < epsilon {
        alpha_l = chord / 3.0;
        alpha_r = chord / 3.0;
    }

    CubicBez::new(first, first + t_left * alpha_l, last + t_right * alpha_r, last)
}

/// Straight cubic along the chord from `a` to `b`.
fn chord_cubic(a: Point, b: Point) -> CubicBez {
    CubicBez::new(a, a.lerp(b, 1.0 / 3.0), a.lerp(b, 2.0 / 3.0), b)
}

// ── Error measurement ────────────────────────────────────

/// Maximum geometric deviation between curve and polyline, and the
/// index of the input point to split at if the bound fails.
///
/// Two directions are measured: each interior input point against the
/// curve at its parameter (which also picks the split point), and dense
/// samples of the curve against the nearest polyline segment, so the
/// bound holds between input points too.
fn max_deviation(curve: &CubicBez, points: &[Point], params: &[f64]) -> (f64, usize) {
    let mut max_error = 0.0f64;
    let mut split = points.len() / 2;

    for (i, (p, &u)) in points.iter().zip(params).enumerate().skip(1) {
        if i == points.len() - 1 {
            break;
        }
        let error = (curve.eval(u) - *p).hypot();
        if error > max_error {
            max_error = error;
            split = i;
        }
    }

    let samples = (points.len() * 8).clamp(32, 256);
    for k in 1..samples {
        let t = k as f64 / samples as f64;
        let error = distance_to_polyline(curve.eval(t), points);
        max_error = max_error.max(error);
    }

    (max_error, split)
}

/// Distance from a point to the nearest segment of a polyline.
fn distance_to_polyline(p: Point, points: &[Point]) -> f64 {
    points
        .windows(2)
        .map(|w| {
            let nearest = Line::new(w[0], w[1]).nearest(p, NEAREST_ACCURACY);
            nearest.distance_sq
        })
        .fold(f64::MAX, f64::min)
        .sqrt()
}

// ── Parameterization ─────────────────────────────────────

/// Normalized chord-length parameters in [0, 1].
fn chord_length_parameterize(points: &[Point]) -> Vec<f64> {
    let mut params = Vec::with_capacity(points.len());
    params.push(0.0);
    for w in points.windows(2) {
        let last = *params.last().unwrap();
        params.push(last + (w[1] - w[0]).hypot());
    }
    let total = *params.last().unwrap();
    if total > 0.0 {
        for u in &mut params {
            *u /= total;
        }
    }
    params
}

/// One Newton-Raphson step per point, pulling each parameter toward
/// the curve location closest to its input point.
fn reparameterize(curve: &CubicBez, points: &[Point], params: &[f64]) -> Vec<f64> {
    let d1 = curve.deriv();
    let d2 = d1.deriv();
    points
        .iter()
        .zip(params)
        .map(|(p, &u)| {
            let diff = curve.eval(u) - *p;
            let q1 = d1.eval(u).to_vec2();
            let q2 = d2.eval(u).to_vec2();
            let numerator = diff.dot(q1);
            let denominator = q1.dot(q1) + diff.dot(q2);
            if denominator.abs() < f64::EPSILON {
                u
            } else {
                (u - numerator / denominator).clamp(0.0, 1.0)
            }
        })
        .collect()
}

// ── Tangents ─────────────────────────────────────────────

/// Unit tangent at a stroke end, scanning past coincident samples.
/// `reverse` selects the trailing end (tangent pointing inward).
fn end_tangent(points: &[Point], reverse: bool) -> Vec2 {
    let anchor = if reverse { points[points.len() - 1] } else { points[0] };
    let candidates: Box<dyn Iterator<Item = &Point>> = if reverse {
        Box::new(points.iter().rev().skip(1))
    } else {
        Box::new(points.iter().skip(1))
    };
    for p in candidates {
        let v = *p - anchor;
        if v.hypot() > 0.0 {
            return v / v.hypot();
        }
    }
    // All samples coincident; direction is arbitrary.
    Vec2::new(1.0, 0.0)
}

/// Unit tangent at an interior split point, centered over its
/// neighbors. Oriented toward the start of the stroke, matching the
/// left half's incoming right tangent.
fn center_tangent(points: &[Point], split: usize) -> Vec2 {
    let mut v = points[split - 1] - points[split + 1];
    if v.hypot() == 0.0 {
        v = points[split - 1] - points[split];
    }
    if v.hypot() == 0.0 {
        return Vec2::new(1.0, 0.0);
    }
    v / v.hypot()
}

/// Cubic Bernstein basis at `u`.
fn bernstein(u: f64) -> [f64; 4] {
    let v = 1.0 - u;
    [v * v * v, 3.0 * u * v * v, 3.0 * u * u * v, u * u * u]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pts(coords: &[(f64, f64)]) -> Vec<Point> {
        coords.iter().map(|&(x, y)| Point::new(x, y)).collect()
    }

    /// Max deviation of densely sampled fitted curves from the polyline.
    fn sampled_deviation(curves: &[CubicBez], polyline: &[Point]) -> f64 {
        let mut worst = 0.0f64;
        for curve in curves {
            for k in 0..=200 {
                let t = k as f64 / 200.0;
                worst = worst.max(distance_to_polyline(curve.eval(t), polyline));
            }
        }
        worst
    }

    #[test]
    fn rejects_non_positive_tolerance() {
        let points = pts(&[(0.0, 0.0), (1.0, 1.0)]);
        assert!(matches!(
            fit_stroke(&points, 0.0),
            Err(ConvertError::InvalidTolerance(_))
        ));
        assert!(matches!(
            fit_stroke(&points, -1.0),
            Err(ConvertError::InvalidTolerance(_))
        ));
        assert!(matches!(
            fit_stroke(&points, f64::NAN),
            Err(ConvertError::InvalidTolerance(_))
        ));
    }

    #[test]
    fn two_points_yield_one_straight_cubic() {
        let points = pts(&[(0.0, 0.0), (9.0, 3.0)]);
        let curves = fit_stroke(&points, 1.0).unwrap();
        assert_eq!(curves.len(), 1);
        let c = curves[0];
        assert_eq!(c.p0, points[0]);
        assert_eq!(c.p3, points[1]);
        // Controls sit on the chord at 1/3 and 2/3.
        assert!((c.p1 - Point::new(3.0, 1.0)).hypot() < 1e-12);
        assert!((c.p2 - Point::new(6.0, 2.0)).hypot() < 1e-12);
    }

    #[test]
    fn endpoints_are_shared_across_curves() {
        // Zigzag forces at least one subdivision.
        let points = pts(&[
            (0.0, 0.0),
            (10.0, 20.0),
            (20.0, 0.0),
            (30.0, 20.0),
            (40.0, 0.0),
        ]);
        let curves = fit_stroke(&points, 0.5).unwrap();
        assert!(!curves.is_empty());
        assert_eq!(curves.first().unwrap().p0, points[0]);
        assert_eq!(curves.last().unwrap().p3, *points.last().unwrap());
        for pair in curves.windows(2) {
            assert_eq!(pair[0].p3, pair[1].p0, "consecutive curves must join");
        }
    }

    #[test]
    fn fitted_curves_stay_within_tolerance() {
        // A gentle arc sampled coarsely, like a real pen stroke.
        let points: Vec<Point> = (0..=20)
            .map(|i| {
                let x = i as f64 * 5.0;
                Point::new(x, (x / 30.0).sin() * 20.0)
            })
            .collect();
        let tolerance = 1.0;
        let curves = fit_stroke(&points, tolerance).unwrap();
        let deviation = sampled_deviation(&curves, &points);
        // Small slack: the test samples more densely than the fitter's
        // acceptance check.
        assert!(
            deviation <= tolerance * 1.05,
            "deviation {} exceeds tolerance {}",
            deviation,
            tolerance
        );
    }

    #[test]
    fn collinear_points_fit_a_single_curve() {
        let points = pts(&[(0.0, 0.0), (1.0, 1.0), (2.0, 2.0), (5.0, 5.0)]);
        let curves = fit_stroke(&points, 0.1).unwrap();
        assert_eq!(curves.len(), 1, "a straight polyline needs one cubic");
    }

    #[test]
    fn tight_tolerance_subdivides() {
        let points = pts(&[
            (0.0, 0.0),
            (10.0, 20.0),
            (20.0, 0.0),
            (30.0, 20.0),
            (40.0, 0.0),
        ]);
        let loose = fit_stroke(&points, 10.0).unwrap();
        let tight = fit_stroke(&points, 0.01).unwrap();
        assert!(
            tight.len() > loose.len(),
            "tighter tolerance should produce more curves ({} vs {})",
            tight.len(),
            loose.len()
        );
        assert!(sampled_deviation(&tight, &points) <= 0.01 * 1.05 + 1e-9);
    }

    #[test]
    fn repeated_points_do_not_panic() {
        let points = pts(&[(0.0, 0.0), (0.0, 0.0), (5.0, 5.0), (5.0, 5.0), (10.0, 0.0)]);
        let curves = fit_stroke(&points, 0.5).unwrap();
        assert!(!curves.is_empty());
        assert_eq!(curves.first().unwrap().p0, points[0]);
        assert_eq!(curves.last().unwrap().p3, *points.last().unwrap());
    }
}
