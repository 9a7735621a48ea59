use thiserror::Error;

/// Errors that can occur while converting a point stream to a path.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum ConvertError {
    #[error("failed to parse input JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("bad sample at index {index}: {reason}")]
    BadSample { index: usize, reason: String },

    #[error("invalid fitting tolerance {0} (must be positive and finite)")]
    InvalidTolerance(f64),

    #[error("no strokes survived decoding (every stroke had fewer than 2 points)")]
    EmptyInput,

    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),
}
