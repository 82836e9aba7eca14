use std::path::PathBuf;

use thiserror::Error;

/// Errors produced while generating or exporting a word cloud.
#[derive(Debug, Error)]
pub enum WordCloudError {
    #[error("Please enter some text to generate a word cloud!")]
    EmptyInput,
    #[error("No usable font found, pass one explicitly")]
    FontNotFound,
    #[error("Font file may be invalid: {0}")]
    InvalidFont(PathBuf),
    #[error("Invalid color '{color}': {source}")]
    InvalidColor {
        color: String,
        #[source]
        source: csscolorparser::ParseColorError,
    },
    #[error("Invalid canvas size {width}x{height}")]
    InvalidCanvas { width: u32, height: u32 },
    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("No word cloud has been generated yet")]
    NothingToDownload,
}

/// Result type for word cloud operations.
pub type Result<T> = std::result::Result<T, WordCloudError>;
