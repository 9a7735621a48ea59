//! Point-stream decoding: raw timestamped samples → strokes.
//!
//! The input is the flat sample array captured from the handwriting
//! tool: `[x, y, penUp]` triples in temporal order, where penUp=1
//! marks the last sample of a stroke.

use kurbo::Point;

use crate::error::ConvertError;

/// One raw input sample: x, y, pen flag.
pub type RawSample = [f64; 3];

/// One continuous pen-down motion. Always holds at least 2 points
/// once emitted by [`decode`].
#[derive(Debug, Clone, PartialEq)]
pub struct Stroke {
    pub points: Vec<Point>,
}

impl Stroke {
    /// The stroke's polyline as a point slice.
    ///
    /// Both the straight-line assembler and the curve fitter consume
    /// strokes through this one accessor.
    pub fn points(&self) -> &[Point] {
        &self.points
    }
}

/// Parse and validate the raw JSON sample array.
///
/// Structural failures (wrong shape, non-numeric coordinates) surface
/// serde_json's line/column; semantic failures (pen flag outside {0,1},
/// non-finite coordinates) carry the offending sample index.
pub fn parse_samples(json: &str) -> Result<Vec<RawSample>, ConvertError> {
    let samples: Vec<RawSample> = serde_json::from_str(json)?;
    for (index, sample) in samples.iter().enumerate() {
        let [x, y, pen] = *sample;
        if !x.is_finite() || !y.is_finite() {
            return Err(ConvertError::BadSample {
                index,
                reason: format!("non-finite coordinate ({}, {})", x, y),
            });
        }
        if pen != 0.0 && pen != 1.0 {
            return Err(ConvertError::BadSample {
                index,
                reason: format!("pen flag {} is not 0 or 1", pen),
            });
        }
    }
    Ok(samples)
}

/// Segment a sample stream into strokes.
///
/// A pure fold: each pen-up sample closes the running stroke, which is
/// emitted only if it has at least 2 points (a single-point stroke
/// cannot form a segment and is dropped silently). Consecutive samples
/// at the same position collapse into one point, so a pen-up sample
/// coincident with the point before it does not pad a stroke up to
/// segment length. A trailing run with no pen-up marker is malformed
/// input and is likewise dropped.
pub fn decode(samples: &[RawSample]) -> Vec<Stroke> {
    let (strokes, _pending) = samples.iter().fold(
        (Vec::new(), Vec::new()),
        |(mut strokes, mut pending): (Vec<Stroke>, Vec<Point>), &[x, y, pen]| {
            let point = Point::new(x, y);
            if pending.last() != Some(&point) {
                pending.push(point);
            }
            if pen == 1.0 {
                if pending.len() >= 2 {
                    strokes.push(Stroke { points: pending });
                }
                (strokes, Vec::new())
            } else {
                (strokes, pending)
            }
        },
    );
    strokes
}
