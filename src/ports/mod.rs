// Ports - Interface definitions (contracts)

use std::path::Path;

use crate::domain::errors::*;
use crate::domain::model::*;

/// Port for media file probing
pub trait ProbePort: Send + Sync {
    /// Describe the first video stream and the container of a file
    fn probe(&self, file_path: &Path) -> Result<VideoInfo, DomainError>;

    /// Presentation times of the first `limit` keyframes of the first video stream
    fn keyframes(&self, file_path: &Path, limit: usize) -> Result<Vec<f64>, DomainError>;

    /// Pixel dimensions of the first video stream
    fn dimensions(&self, file_path: &Path) -> Result<Dimensions, DomainError> {
        self.probe(file_path)?.dimensions()
    }
}

/// Port for running the external encoder
pub trait TranscodePort: Send + Sync {
    /// Program the arguments are handed to
    fn program(&self) -> &str;

    /// Run the encoder with `args`, returning what it printed
    fn run(&self, args: &[String]) -> Result<String, DomainError>;

    /// Shell-like rendering of a run, for logs and dry runs
    fn command_line(&self, args: &[String]) -> String {
        let mut line = self.program().to_string();
        for arg in args {
            line.push(' ');
            if arg.is_empty() || arg.contains(char::is_whitespace) {
                line.push_str(&format!("{:?}", arg));
            } else {
                line.push_str(arg);
            }
        }
        line
    }
}

/// Port for file system operations
pub trait FsPort: Send + Sync {
    /// Stat a path
    fn metadata(&self, file_path: &Path) -> Result<FileMetadata, DomainError>;

    /// Check if anything exists at a path
    fn exists(&self, file_path: &Path) -> bool;

    /// Move a file, replacing an existing target
    fn rename(&self, from: &Path, to: &Path) -> Result<(), DomainError>;
}

/// Port for the operation log
pub trait LogPort: Send + Sync {
    /// Log info message
    fn info(&self, message: &str);

    /// Log warning message
    fn warn(&self, message: &str);

    /// Log error message
    fn error(&self, message: &str);

    /// Log debug message
    fn debug(&self, message: &str);

    /// Every line logged so far, oldest first
    fn history(&self) -> Vec<String>;
}
