// Batch driver - File collection and the per-file processing loop shared by all interactors

use std::path::{Path, PathBuf};
use std::time::Instant;

use crate::domain::errors::DomainError;
use crate::error::{FfrError, FfrResult};
use crate::ports::{FsPort, LogPort};
use crate::utils::format_duration;

/// A file whose processing failed; the batch went on without it
#[derive(Debug, Clone, PartialEq)]
pub struct FileFailure {
    pub path: PathBuf,
    pub error: DomainError,
}

/// Result of running one command over a batch of files
#[derive(Debug, Clone, PartialEq)]
pub struct BatchReport<T> {
    /// Per-file results, in processing order
    pub completed: Vec<T>,
    pub failures: Vec<FileFailure>,
}

impl<T> BatchReport<T> {
    pub fn new() -> Self {
        Self {
            completed: Vec::new(),
            failures: Vec::new(),
        }
    }

    /// Number of files that were looked at
    pub fn processed(&self) -> usize {
        self.completed.len() + self.failures.len()
    }
}

impl<T> Default for BatchReport<T> {
    fn default() -> Self {
        Self::new()
    }
}

/// Resolve the file arguments of a command.
///
/// Fails on the first argument that cannot be stat'ed. Directories are fatal unless
/// `skip_directories` is set, in which case they are left out.
pub fn collect_files(
    fs_port: &dyn FsPort,
    paths: &[PathBuf],
    skip_directories: bool,
) -> FfrResult<Vec<PathBuf>> {
    if paths.is_empty() {
        return Err(FfrError::NoFilesProvided);
    }

    let mut files = Vec::with_capacity(paths.len());
    for path in paths {
        let metadata = fs_port
            .metadata(path)
            .map_err(|source| FfrError::NotAFile {
                path: path.clone(),
                source,
            })?;

        if metadata.is_dir {
            if skip_directories {
                continue;
            }
            return Err(FfrError::IsDirectory { path: path.clone() });
        }
        files.push(path.clone());
    }

    Ok(files)
}

/// Run `process` over every file in order.
///
/// Errors are logged and recorded and do not stop the batch. Per-file and total elapsed time
/// go to the log.
pub fn run_each<T, F>(log_port: &dyn LogPort, files: &[PathBuf], mut process: F) -> BatchReport<T>
where
    F: FnMut(&Path) -> Result<T, DomainError>,
{
    let all = Instant::now();
    let mut report = BatchReport::new();

    for file in files {
        let start = Instant::now();
        log_port.info(&format!("file found: {}", file.display()));

        match process(file) {
            Ok(result) => report.completed.push(result),
            Err(error) => {
                log_port.warn(&format!("{}: {}", file.display(), error));
                report.failures.push(FileFailure {
                    path: file.clone(),
                    error,
                });
            }
        }

        log_port.info(&format!("done in {}.", format_duration(start.elapsed())));
    }

    log_port.info(&format!("all done in {}.", format_duration(all.elapsed())));
    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::{FsLocalAdapter, TracingLogAdapter};
    use tempfile::TempDir;

    #[test]
    fn test_collect_files() {
        let dir = TempDir::new().unwrap();
        let file = dir.path().join("a.txt");
        std::fs::write(&file, "a").unwrap();
        let fs = FsLocalAdapter::new();

        let files = collect_files(&fs, &[file.clone()], false).unwrap();
        assert_eq!(files, vec![file.clone()]);

        let missing = dir.path().join("missing.txt");
        assert!(matches!(
            collect_files(&fs, &[file.clone(), missing], false),
            Err(FfrError::NotAFile { .. })
        ));
        assert!(matches!(
            collect_files(&fs, &[dir.path().to_path_buf()], false),
            Err(FfrError::IsDirectory { .. })
        ));
        assert!(matches!(collect_files(&fs, &[], false), Err(FfrError::NoFilesProvided)));

        let files = collect_files(&fs, &[dir.path().to_path_buf(), file.clone()], true).unwrap();
        assert_eq!(files, vec![file]);
    }

    #[test]
    fn test_run_each_keeps_going() {
        let log = TracingLogAdapter::new(false);
        let files = vec![PathBuf::from("a"), PathBuf::from("b"), PathBuf::from("c")];

        let report = run_each(&log, &files, |path| {
            if path == Path::new("b") {
                Err(DomainError::NoMatches("b".to_string()))
            } else {
                Ok(path.to_path_buf())
            }
        });

        assert_eq!(report.completed, vec![PathBuf::from("a"), PathBuf::from("c")]);
        assert_eq!(report.failures.len(), 1);
        assert_eq!(report.failures[0].path, PathBuf::from("b"));
        assert_eq!(report.processed(), 3);

        let history = log.history();
        assert_eq!(history.iter().filter(|l| l.starts_with("file found")).count(), 3);
        assert!(history.iter().any(|l| l.starts_with("b: ")));
        assert!(history.last().unwrap().starts_with("all done in"));
    }
}
