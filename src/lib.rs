//! ffr library
//!
//! File name transformations over dash separated parts, a batch driver applying them to
//! files, and ffmpeg/ffprobe collaborators for the video commands.

pub mod adapters;
pub mod app;
pub mod cli;
pub mod config_initialization;
pub mod domain;
pub mod engine;
pub mod error;
pub mod output;
pub mod ports;
pub mod utils;

// Re-export commonly used types
pub use domain::errors::DomainError;
pub use domain::model::{FileName, RenameOptions, RenamePlan};
pub use domain::rules::RenameOperation;
pub use error::{FfrError, FfrResult};
