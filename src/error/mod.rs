//! Error handling module for ffr

use std::path::PathBuf;

use thiserror::Error;

use crate::domain::errors::DomainError;

/// Batch-level errors: any of these stops the whole run
#[derive(Error, Debug)]
pub enum FfrError {
    /// No file arguments at all
    #[error("no files provided")]
    NoFilesProvided,

    /// Argument could not be stat'ed
    #[error("argument is not a file: {path:?}, err: {source}")]
    NotAFile {
        path: PathBuf,
        #[source]
        source: DomainError,
    },

    /// Argument is a directory
    #[error("file is a directory: {path:?}")]
    IsDirectory { path: PathBuf },

    /// Configuration could not be loaded
    #[error("configuration error: {message}")]
    Config { message: String },

    /// Info report could not be serialised
    #[error("failed to render report: {message}")]
    Report { message: String },

    /// Domain error raised outside of per-file processing
    #[error(transparent)]
    Domain(#[from] DomainError),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for ffr operations
pub type FfrResult<T> = std::result::Result<T, FfrError>;
