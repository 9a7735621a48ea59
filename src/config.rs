/// All conversion parameters in one struct.
/// Built by the CLI from flags; usable directly by library callers.
#[derive(Debug, Clone)]
pub struct ConvertConfig {
    /// Approximate each stroke with fitted cubic beziers instead of
    /// one line segment per consecutive point pair.
    pub smooth: bool,
    /// Keep the original offset from the top-left corner instead of
    /// translating the drawing's bounding box to the origin.
    pub keep_whitespace: bool,
    /// Maximum allowed geometric deviation between a fitted curve
    /// sequence and the original polyline, in input units.
    /// Smaller = more curves, closer fit. Only used when `smooth` is set.
    pub tolerance: f64,
}

impl Default for ConvertConfig {
    fn default() -> Self {
        Self {
            smooth: false,
            keep_whitespace: false,
            tolerance: 1.0,
        }
    }
}
