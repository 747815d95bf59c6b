use thiserror::Error;

/// Errors raised by projection and segmentation entry points.
///
/// All variants are produced synchronously at construction time or at the
/// start of a pipeline call; no partial output is ever returned alongside
/// an error.
#[derive(Error, Debug)]
pub enum Error {
    #[error("Shape mismatch: {0}")]
    ShapeMismatch(String),

    #[error("Invalid window size: {0}")]
    InvalidWindowSize(String),

    #[error("Degenerate span: {0}")]
    DegenerateSpan(String),
}

pub type Result<T> = std::result::Result<T, Error>;
