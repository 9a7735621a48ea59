//! callig2svg: handwriting pen strokes → plotter-ready SVG path.
//!
//! Converts the timestamped `[x, y, penUp]` sample stream captured
//! from a handwriting-synthesis web tool into a single open vector
//! path, as line segments or bounded-error cubic bezier fits.
//!
//! # Example
//!
//! ```no_run
//! use callig2svg::{convert, ConvertConfig};
//!
//! let json = std::fs::read_to_string("strokes.json")?;
//! let path = convert(&json, &ConvertConfig::default())?;
//! // path is a kurbo::BezPath, one subpath per pen stroke
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

#![forbid(unsafe_code)]

mod assemble;
mod config;
mod decode;
mod fit;
mod normalize;

pub mod error;
pub mod svg;

// Re-export kurbo so downstream users get the same version
// used by the BezPath this crate produces.
pub use kurbo;

pub use config::ConvertConfig;
pub use decode::{decode, parse_samples, RawSample, Stroke};
pub use error::ConvertError;
pub use fit::fit_stroke;
pub use normalize::{height, move_to_origin};

use kurbo::BezPath;

/// Full pipeline: JSON sample stream → assembled path.
///
/// Pipeline: decode samples into strokes, translate the bounding box to
/// the origin (unless the caller keeps the original whitespace), then
/// assemble line segments or fitted curves per stroke.
///
/// Either a complete valid path comes back or an error does; there is
/// no partial output.
pub fn convert(json: &str, config: &ConvertConfig) -> Result<BezPath, ConvertError> {
    // ── Decode ────────────────────────────────────────────
    let samples = parse_samples(json)?;
    if samples.is_empty() {
        eprintln!("  Decode      warning: input array is empty");
    }
    let mut strokes = decode(&samples);
    let n_points: usize = strokes.iter().map(|s| s.points().len()).sum();
    eprintln!(
        "  Decode      {} samples \u{2192} {} strokes ({} points)",
        samples.len(),
        strokes.len(),
        n_points,
    );
    if strokes.is_empty() {
        return Err(ConvertError::EmptyInput);
    }

    // ── Normalize ─────────────────────────────────────────
    if config.keep_whitespace {
        eprintln!("  Normalize   skipped (keeping original whitespace)");
    } else {
        let (dx, dy) = move_to_origin(&mut strokes);
        eprintln!(
            "  Normalize   shifted by ({:.2}, {:.2}), height {:.2}",
            -dx,
            -dy,
            height(&strokes),
        );
    }

    // ── Assemble ──────────────────────────────────────────
    let path = assemble::assemble(&strokes, config.smooth, config.tolerance)?;
    let (curves, lines) = count_segments(&path);
    if config.smooth {
        eprintln!(
            "  Fit         {} strokes \u{2192} {} curves (tolerance {})",
            strokes.len(),
            curves,
            config.tolerance,
        );
    } else {
        eprintln!("  Assemble    {} strokes \u{2192} {} lines", strokes.len(), lines);
    }

    Ok(path)
}

/// Count (curves, lines) segments in the assembled path.
fn count_segments(path: &BezPath) -> (usize, usize) {
    let mut curves = 0;
    let mut lines = 0;
    for el in path.elements() {
        match el {
            kurbo::PathEl::CurveTo(..) => curves += 1,
            kurbo::PathEl::LineTo(_) => lines += 1,
            _ => {}
        }
    }
    (curves, lines)
}
