//! SVG document writer: one path element, zero outer margin.

use std::fs;
use std::path::Path as FsPath;

use kurbo::{BezPath, Shape};

use crate::error::ConvertError;

/// Render the assembled path as a standalone SVG document.
///
/// The viewBox is the path's exact bounding box, so the drawing fills
/// the document with no margin. The path is stroked, not filled: the
/// output is a 1-dimensional plotter/engraver toolpath, not a shape.
pub fn document(path: &BezPath) -> String {
    let bbox = path.bounding_box();
    format!(
        r#"<?xml version="1.0" encoding="UTF-8"?>
<svg width="{w}" height="{h}" viewBox="{x} {y} {w} {h}" xmlns="http://www.w3.org/2000/svg">
  <path d="{d}" stroke="black" stroke-width="1" fill="none"/>
</svg>
"#,
        x = bbox.x0,
        y = bbox.y0,
        w = bbox.width(),
        h = bbox.height(),
        d = path.to_svg(),
    )
}

/// Write the document to disk, creating the parent directory if needed.
pub fn write(path: &BezPath, outfile: &FsPath) -> Result<(), ConvertError> {
    if let Some(parent) = outfile.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    fs::write(outfile, document(path))?;
    Ok(())
}
