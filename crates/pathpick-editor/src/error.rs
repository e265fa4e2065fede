//! Error types for the editor crate.
//!
//! Editing errors are always recoverable: when an operation returns an
//! error the document is left exactly as it was.

use pathpick_core::CoreError;
use thiserror::Error;

/// Errors that can occur during editing operations.
#[derive(Error, Debug)]
pub enum EditorError {
    /// A field-space operation was attempted before an image was loaded.
    #[error("Load a field image first so points can be placed correctly")]
    NoFieldImage,

    /// The supplied image dimensions cannot define a field.
    #[error("Invalid image size: {width}x{height}")]
    InvalidImage { width: f64, height: f64 },

    /// The requested pose does not exist in the active path.
    #[error("Pose index out of range: {index} (points: {len})")]
    PoseOutOfRange { index: usize, len: usize },

    /// The requested path does not exist.
    #[error("Path index out of range: {index} (paths: {count})")]
    PathOutOfRange { index: usize, count: usize },

    /// Import or export failed.
    #[error(transparent)]
    Codec(#[from] CodecError),

    /// A field configuration value was rejected.
    #[error(transparent)]
    Config(#[from] CoreError),
}

/// Errors raised while decoding or encoding path files.
#[derive(Error, Debug)]
pub enum CodecError {
    /// The text is not valid JSON.
    #[error("Invalid JSON: {0}")]
    MalformedJson(#[from] serde_json::Error),

    /// Valid JSON, but not a shape that carries poses.
    #[error("Unrecognized JSON structure")]
    UnrecognizedStructure,

    /// The table has no non-blank lines.
    #[error("CSV is empty")]
    EmptyTable,

    /// The table has metadata lines but no rows.
    #[error("CSV has no data rows")]
    NoDataRows,

    /// No pose could be recovered from the input.
    #[error("No poses found in {format} input")]
    NoPoses { format: &'static str },

    /// Neither the extension nor the content identify a supported format.
    #[error("Unsupported file type: {0}")]
    UnsupportedFormat(String),
}

/// Result type alias for editor operations.
pub type Result<T> = std::result::Result<T, EditorError>;

/// Result type alias for codec operations.
pub type CodecResult<T> = std::result::Result<T, CodecError>;
