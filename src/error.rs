use std::path::PathBuf;

use thiserror::Error;

/// Convenient alias for fallible results returned throughout the crate.
pub type Result<T> = std::result::Result<T, MergeError>;

/// Error type covering the different failure cases that can occur when the
/// tool reads workbooks, merges rows, or emits artifacts.
#[derive(Debug, Error)]
pub enum MergeError {
    /// Wrapper for IO failures such as reading a folder or writing the log.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Errors bubbled up from the Excel reader implementation.
    #[error("Excel read error: {0}")]
    ExcelRead(#[from] calamine::XlsxError),

    /// Errors bubbled up from the Excel writer implementation.
    #[error("Excel write error: {0}")]
    ExcelWrite(#[from] rust_xlsxwriter::XlsxError),

    /// Raised when serialising the merge summary fails.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Raised when a workbook does not contain the requested sheet.
    #[error("sheet '{0}' not found")]
    SheetNotFound(String),

    /// Raised when the user provides a path that does not exist.
    #[error("input not found: {0}")]
    MissingInput(PathBuf),

    /// Raised when the output workbook is already present and may not be
    /// overwritten.
    #[error("output file already exists: {0}")]
    OutputExists(PathBuf),

    /// Raised when a workbook exposes no readable sheets.
    #[error("no readable sheets in {0}")]
    NoSheets(PathBuf),

    /// Raised when a run ended with a fatal report entry.
    #[error("merge aborted: {0}")]
    Aborted(String),

    /// Raised when the tracing subscriber fails to initialise.
    #[error("failed to initialise logging: {0}")]
    Logging(String),
}
