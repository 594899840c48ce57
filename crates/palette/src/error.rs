use std::io;

/// Errors raised by the palette builder.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The text could not be parsed as a color.
    #[error("invalid color format: {0:?}")]
    InvalidColorFormat(String),
    /// The text is not a `space.axis` coordinate, or the axis does not belong to the space.
    #[error("invalid color coordinate: {0:?}")]
    InvalidCoordinate(String),
    #[error("palette not found: {0}")]
    PaletteNotFound(String),
    #[error("index {index} out of range for {len} items")]
    IndexOutOfRange { index: usize, len: usize },
    /// Raised by a persistence collaborator.
    #[error("storage error: {0}")]
    Storage(String),
    #[error(transparent)]
    Json(#[from] serde_json::Error),
    #[error(transparent)]
    Io(#[from] io::Error),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
