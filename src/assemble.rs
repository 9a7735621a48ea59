//! Path assembly: ordered strokes → one open multi-stroke path.
//!
//! Each stroke becomes its own subpath (`MoveTo` then segments), so
//! pen-up gaps survive as gaps; nothing ever bridges the end of one
//! stroke to the start of the next, and no subpath is closed.

use kurbo::BezPath;

use crate::decode::Stroke;
use crate::error::ConvertError;
use crate::fit;

/// Build the output path from decoded (and possibly normalized) strokes.
///
/// Straight mode emits N−1 line segments for a stroke of N points.
/// Smooth mode emits the curve fitter's output verbatim, in stroke
/// order. Strokes with fewer than 2 points cannot occur post-decode
/// but are skipped if present.
pub fn assemble(strokes: &[Stroke], smooth: bool, tolerance: f64) -> Result<BezPath, ConvertError> {
    let mut path = BezPath::new();
    for stroke in strokes {
        let points = stroke.points();
        if points.len() < 2 {
            continue;
        }
        if smooth {
            let curves = fit::fit_stroke(points, tolerance)?;
            if let Some(first) = curves.first() {
                path.move_to(first.p0);
            }
            for curve in &curves {
                path.curve_to(curve.p1, curve.p2, curve.p3);
            }
        } else {
            path.move_to(points[0]);
            for p in &points[1..] {
                path.line_to(*p);
            }
        }
    }
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use kurbo::{PathEl, Point};

    fn stroke(points: &[(f64, f64)]) -> Stroke {
        Stroke {
            points: points.iter().map(|&(x, y)| Point::new(x, y)).collect(),
        }
    }

    #[test]
    fn straight_mode_emits_n_minus_1_segments() {
        let strokes = vec![stroke(&[(0.0, 0.0), (10.0, 0.0), (10.0, 10.0)])];
        let path = assemble(&strokes, false, 1.0).unwrap();
        let els: Vec<PathEl> = path.elements().to_vec();
        assert_eq!(
            els,
            vec![
                PathEl::MoveTo(Point::new(0.0, 0.0)),
                PathEl::LineTo(Point::new(10.0, 0.0)),
                PathEl::LineTo(Point::new(10.0, 10.0)),
            ]
        );
    }

    #[test]
    fn strokes_stay_disconnected() {
        let strokes = vec![
            stroke(&[(0.0, 0.0), (1.0, 0.0)]),
            stroke(&[(5.0, 5.0), (6.0, 5.0)]),
        ];
        let path = assemble(&strokes, false, 1.0).unwrap();
        let moves = path
            .elements()
            .iter()
            .filter(|el| matches!(el, PathEl::MoveTo(_)))
            .count();
        assert_eq!(moves, 2, "each stroke opens its own subpath");
        let closes = path
            .elements()
            .iter()
            .filter(|el| matches!(el, PathEl::ClosePath))
            .count();
        assert_eq!(closes, 0, "an open polyline list is never closed");
    }

    #[test]
    fn short_strokes_are_skipped() {
        let strokes = vec![stroke(&[(5.0, 5.0)])];
        let path = assemble(&strokes, false, 1.0).unwrap();
        assert!(path.elements().is_empty());
    }

    #[test]
    fn smooth_mode_joins_curves_contiguously() {
        let strokes = vec![stroke(&[
            (0.0, 0.0),
            (10.0, 20.0),
            (20.0, 0.0),
            (30.0, 20.0),
            (40.0, 0.0),
        ])];
        let path = assemble(&strokes, true, 0.5).unwrap();
        let els = path.elements();
        assert!(matches!(els[0], PathEl::MoveTo(p) if p == Point::new(0.0, 0.0)));
        let mut current = Point::new(0.0, 0.0);
        for el in &els[1..] {
            match el {
                PathEl::CurveTo(_, _, p) => current = *p,
                other => panic!("smooth mode emits only curves, got {:?}", other),
            }
        }
        assert_eq!(current, Point::new(40.0, 0.0));
    }

    #[test]
    fn smooth_mode_propagates_bad_tolerance() {
        let strokes = vec![stroke(&[(0.0, 0.0), (1.0, 1.0)])];
        assert!(matches!(
            assemble(&strokes, true, -2.0),
            Err(ConvertError::InvalidTolerance(_))
        ));
    }
}
