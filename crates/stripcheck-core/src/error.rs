use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum StripError {
    #[error("invalid image: {0}")]
    InvalidImage(String),

    #[error("failed to decode image: {0}")]
    ImageDecode(#[from] image::ImageError),

    #[error("{failed} of {total} image(s) could not be analyzed")]
    BatchIncomplete { failed: usize, total: usize },

    #[error("failed to load rule table from {path}: {reason}")]
    RulesLoad { path: PathBuf, reason: String },

    #[error("invalid configuration: {0}")]
    ConfigInvalid(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
