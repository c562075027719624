use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("invalid table markdown: {reason}. Markdown: {markdown}")]
    MalformedTable { reason: String, markdown: String },

    #[error("required asset missing: {}", path.display())]
    AssetMissing { path: PathBuf },

    #[error("font could not be loaded from {}: {reason}", path.display())]
    FontLoad { path: PathBuf, reason: String },

    #[error("table rasterization failed: {0}")]
    Raster(String),

    #[error("image error: {0}")]
    Image(#[from] image::ImageError),

    #[error("PDF generation failed: {0}")]
    Pdf(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
