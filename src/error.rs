use thiserror::Error;

/// Errors from the few operations that touch the outside world.
///
/// Drawing, undo/redo, zoom and fill never fail; they are no-ops when their
/// input is out of range.
#[derive(Debug, Error)]
pub enum PaintError {
    #[error("Invalid color: {0:?}")]
    InvalidColor(String),

    #[error("Focus window does not overlap the surface")]
    EmptyExport,

    #[error("Failed to encode image: {0}")]
    Image(#[from] image::ImageError),

    #[error("Failed to serialize document: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Invalid stroke: {0}")]
    InvalidStroke(String),
}

pub type PaintResult<T> = Result<T, PaintError>;
