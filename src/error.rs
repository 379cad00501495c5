//! The error type shared by every stage of the codec.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum PaiError {
    #[error("Malformed color {0:?}")]
    MalformedColor(String),

    #[error("Malformed pixel run {0:?}")]
    MalformedRun(String),

    #[error("Malformed line repeat count {0:?}")]
    MalformedRepeat(String),

    #[error("Can't encode a row with no pixels")]
    EmptyRow,

    #[error("The image has no rows")]
    EmptyImage,

    #[error("Line {line} is {found} pixels wide, expected {expected}")]
    IrregularWidth {
        line: usize,
        expected: usize,
        found: usize,
    },

    #[error("Corrupt payload: {0}")]
    CorruptPayload(String),

    #[error("Writing to a file requires a file name")]
    MissingFileName,

    #[error("Refusing to overwrite the input file {}", .0.display())]
    OverwritesInput(std::path::PathBuf),

    #[error("Invalid separators: {0}")]
    InvalidSeparators(String),

    #[error("Quality must be between 1 and 11, got {0}")]
    InvalidQuality(u8),

    #[error("Image exceeds the decoder limits: {0}")]
    LimitExceeded(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Image(#[from] image::ImageError),
}

pub type Result<T> = std::result::Result<T, PaiError>;
