// Domain errors - Per-file failures of rename and encode operations

use std::fmt;

/// Domain-specific error types.
///
/// Every variant is recoverable at batch level: the driver logs it and moves on to the next file.
#[derive(Debug, Clone, PartialEq)]
pub enum DomainError {
    /// Invalid arguments provided
    BadArgs(String),
    /// Regular expression failed to compile
    InvalidPattern(String),
    /// Pattern found nothing in the file name
    NoMatches(String),
    /// Pattern found more than the operation can handle
    TooManyMatches(String),
    /// Skip count larger than what is available
    SkipOutOfRange(String),
    /// Number, date or list failed to parse
    ParseFailed(String),
    /// Prober could not describe the file
    ProbeFailed(String),
    /// Encoder run failed
    ExecFailed(String),
    /// File system operation failed
    FsFail(String),
    /// Target already exists and overwrite is not forced
    AlreadyExists(String),
    /// Codec not supported
    UnsupportedCodec(String),
    /// Width or height unusable
    InvalidDimensions(String),
}

impl fmt::Display for DomainError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DomainError::BadArgs(msg) => write!(f, "Bad arguments: {}", msg),
            DomainError::InvalidPattern(msg) => write!(f, "Invalid regular expression: {}", msg),
            DomainError::NoMatches(msg) => write!(f, "No matches: {}", msg),
            DomainError::TooManyMatches(msg) => write!(f, "Too many matches: {}", msg),
            DomainError::SkipOutOfRange(msg) => write!(f, "Skip out of range: {}", msg),
            DomainError::ParseFailed(msg) => write!(f, "Parse failed: {}", msg),
            DomainError::ProbeFailed(msg) => write!(f, "Probe failed: {}", msg),
            DomainError::ExecFailed(msg) => write!(f, "Execution failed: {}", msg),
            DomainError::FsFail(msg) => write!(f, "File system error: {}", msg),
            DomainError::AlreadyExists(msg) => write!(f, "File already exists: {}", msg),
            DomainError::UnsupportedCodec(msg) => write!(f, "Unsupported codec: {}", msg),
            DomainError::InvalidDimensions(msg) => write!(f, "Invalid dimensions: {}", msg),
        }
    }
}

impl std::error::Error for DomainError {}

impl From<regex::Error> for DomainError {
    fn from(err: regex::Error) -> Self {
        DomainError::InvalidPattern(err.to_string())
    }
}
