// Local filesystem adapter - File system operations over std::fs

use std::fs;
use std::path::Path;

use crate::domain::errors::*;
use crate::domain::model::*;
use crate::ports::*;

/// Local filesystem adapter
#[derive(Debug, Default, Clone, Copy)]
pub struct FsLocalAdapter;

impl FsLocalAdapter {
    /// Create new local filesystem adapter
    pub fn new() -> Self {
        Self
    }
}

impl FsPort for FsLocalAdapter {
    fn metadata(&self, file_path: &Path) -> Result<FileMetadata, DomainError> {
        let metadata = fs::metadata(file_path).map_err(|e| {
            DomainError::FsFail(format!(
                "Failed to get metadata of {}: {}",
                file_path.display(),
                e
            ))
        })?;

        Ok(FileMetadata {
            path: file_path.to_path_buf(),
            size: metadata.len(),
            is_dir: metadata.is_dir(),
        })
    }

    fn exists(&self, file_path: &Path) -> bool {
        // symlink_metadata so a dangling link still counts as taken
        fs::symlink_metadata(file_path).is_ok()
    }

    fn rename(&self, from: &Path, to: &Path) -> Result<(), DomainError> {
        fs::rename(from, to).map_err(|e| {
            DomainError::FsFail(format!(
                "Failed to rename {} to {}: {}",
                from.display(),
                to.display(),
                e
            ))
        })
    }
}
