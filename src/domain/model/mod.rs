// Domain models - Core types and data structures

use std::fmt;
use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::domain::errors::DomainError;

/// Separator between the descriptions of a file name.
pub const SEPARATOR: &str = "-";

/// A file name decomposed into base name, extension and dash-delimited segments.
///
/// `segments.join("-") == base` holds for every value built by [`FileName::split`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileName {
    /// File name without directory and extension
    pub base: String,
    /// Extension including the leading dot, or empty
    pub extension: String,
    /// `base` split on `-`
    pub segments: Vec<String>,
}

impl FileName {
    /// Split the last component of `path` into base name, extension and segments.
    ///
    /// The extension runs from the last `.` of the file name to its end.
    pub fn split(path: &str) -> Self {
        let name = Path::new(path)
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();

        let (base, extension) = match name.rfind('.') {
            Some(idx) => (name[..idx].to_string(), name[idx..].to_string()),
            None => (name, String::new()),
        };

        let segments = base.split(SEPARATOR).map(str::to_string).collect();

        Self {
            base,
            extension,
            segments,
        }
    }

    /// Inverse of [`FileName::split`] for a list of segments.
    pub fn join(segments: &[String], extension: &str) -> String {
        format!("{}{}", segments.join(SEPARATOR), extension)
    }

    /// Base name and extension back together
    pub fn file_name(&self) -> String {
        format!("{}{}", self.base, self.extension)
    }

    /// Extension without the leading dot
    pub fn bare_extension(&self) -> &str {
        self.extension.trim_start_matches('.')
    }
}

impl fmt::Display for FileName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.file_name())
    }
}

/// Batch-wide switches shared by every operation
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RenameOptions {
    pub dry_run: bool,
    pub force_overwrite: bool,
    pub backwards: bool,
    pub verbose: bool,
}

/// One file of a batch together with the switches it is processed with.
///
/// Built by the batch driver and consumed once.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenameRequest {
    pub target: PathBuf,
    pub options: RenameOptions,
}

impl RenameRequest {
    pub fn new(target: impl Into<PathBuf>, options: RenameOptions) -> Self {
        Self {
            target: target.into(),
            options,
        }
    }

    /// File name of the target; names that are not valid UTF-8 are rejected
    pub fn file_name(&self) -> Result<&str, DomainError> {
        match self.target.file_name() {
            None => Ok(""),
            Some(name) => name.to_str().ok_or_else(|| {
                DomainError::ParseFailed("file name is not valid UTF-8".to_string())
            }),
        }
    }

    /// Full path of a sibling of the target called `file_name`
    pub fn sibling(&self, file_name: &str) -> PathBuf {
        match self.target.parent() {
            Some(parent) => parent.join(file_name),
            None => PathBuf::from(file_name),
        }
    }
}

/// Outcome of computing a new name for one file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenamePlan {
    pub old_path: PathBuf,
    pub new_path: PathBuf,
    /// Whether the file system has to be touched
    pub apply: bool,
}

impl RenamePlan {
    pub fn new(old_path: PathBuf, new_path: PathBuf, dry_run: bool) -> Self {
        let apply = !dry_run && old_path != new_path;
        Self {
            old_path,
            new_path,
            apply,
        }
    }

    /// Old and new path are the same
    pub fn is_noop(&self) -> bool {
        self.old_path == self.new_path
    }
}

impl fmt::Display for RenamePlan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:?} -> {:?}",
            self.old_path.display().to_string(),
            self.new_path.display().to_string()
        )
    }
}

/// Pixel dimensions of a video stream
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Dimensions {
    pub width: u32,
    pub height: u32,
}

impl Dimensions {
    pub fn new(width: u32, height: u32) -> Result<Self, DomainError> {
        if width == 0 || height == 0 {
            return Err(DomainError::InvalidDimensions(format!(
                "width: {}, height: {}",
                width, height
            )));
        }
        Ok(Self { width, height })
    }

    /// Parse `WIDTHxHEIGHT`
    pub fn parse(dimensions: &str) -> Result<Self, DomainError> {
        let wrong = || DomainError::ParseFailed(format!("wrong dimensions: {}", dimensions));

        let (width, height) = dimensions.trim().split_once('x').ok_or_else(wrong)?;
        let width = width.parse::<u32>().map_err(|_| wrong())?;
        let height = height.parse::<u32>().map_err(|_| wrong())?;

        Self::new(width, height)
    }

    /// Number of pixels in one frame
    pub fn area(&self) -> u64 {
        self.width as u64 * self.height as u64
    }
}

impl fmt::Display for Dimensions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

/// What the prober reports about the first video stream of a file
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct VideoInfo {
    pub width: u32,
    pub height: u32,
    /// Seconds
    pub duration: f64,
    /// Frames per second
    pub frame_rate: f64,
    /// Bits per second, 0 when unknown
    pub bit_rate: u64,
    pub codec: String,
}

impl VideoInfo {
    pub fn dimensions(&self) -> Result<Dimensions, DomainError> {
        Dimensions::new(self.width, self.height)
    }
}

/// File system facts needed by the batch driver
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileMetadata {
    pub path: PathBuf,
    pub size: u64,
    pub is_dir: bool,
}

/// One row of the info report
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct InfoRow {
    pub name: String,
    pub size: u64,
    pub bit_rate: u64,
    pub length: f64,
    pub frame_rate: f64,
    pub width: u32,
    pub height: u32,
    pub codec: String,
    /// Keyframe times, `None` when skipped
    pub keyframes: Option<Vec<f64>>,
}

#[cfg(test)]
mod tests;
