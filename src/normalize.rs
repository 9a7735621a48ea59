//! Coordinate normalization: shift the drawing's bounding box to the
//! origin, removing the blank margin the capture tool leaves between
//! the pen strokes and (0, 0).

use crate::decode::Stroke;

/// Translate all strokes so the minimum observed x and y become zero.
///
/// Two explicit passes (measure, then apply) so the minima are taken
/// over unshifted coordinates. Relative geometry is untouched; the
/// returned `(min_x, min_y)` is the shift that was subtracted.
/// Idempotent: a second call measures minima of 0 and subtracts 0.
pub fn move_to_origin(strokes: &mut [Stroke]) -> (f64, f64) {
    let mut min_x = f64::MAX;
    let mut min_y = f64::MAX;
    for stroke in strokes.iter() {
        for p in stroke.points() {
            min_x = min_x.min(p.x);
            min_y = min_y.min(p.y);
        }
    }
    if min_x == f64::MAX {
        return (0.0, 0.0);
    }

    for stroke in strokes.iter_mut() {
        for p in &mut stroke.points {
            p.x -= min_x;
            p.y -= min_y;
        }
    }
    (min_x, min_y)
}

/// Vertical extent (`max_y - min_y`) across all strokes.
///
/// Advisory only: callers stacking several normalized drawings can use
/// this to space them without overlap.
pub fn height(strokes: &[Stroke]) -> f64 {
    let mut min_y = f64::MAX;
    let mut max_y = f64::MIN;
    for stroke in strokes {
        for p in stroke.points() {
            min_y = min_y.min(p.y);
            max_y = max_y.max(p.y);
        }
    }
    if min_y == f64::MAX {
        0.0
    } else {
        max_y - min_y
    }
}
