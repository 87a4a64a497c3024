use std::path::PathBuf;

use thiserror::Error;

/// Convenient alias for fallible results returned throughout the crate.
pub type Result<T> = std::result::Result<T, ExportError>;

/// Error type covering the different failure cases that can occur when the
/// tool ingests or exports expedition data.
#[derive(Debug, Error)]
pub enum ExportError {
    /// Wrapper for IO failures such as reading or writing files.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Raised when JSON serialization fails.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Errors bubbled up from the workbook reader implementation.
    #[error("workbook read error: {0}")]
    WorkbookRead(#[from] calamine::XlsxError),

    /// Raised when a required sheet is absent from the workbook.
    #[error("missing required sheet '{0}'")]
    MissingSheet(String),

    /// Raised when a sheet does not follow the expected conventions.
    #[error("invalid workbook structure: {0}")]
    InvalidWorkbook(String),

    /// Raised when the user provides a path that does not exist.
    #[error("input file not found: {0}")]
    MissingInput(PathBuf),

    /// Raised when the tracing subscriber fails to initialise.
    #[error("failed to initialise logging: {0}")]
    Logging(String),
}
