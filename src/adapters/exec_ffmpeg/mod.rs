//! FFmpeg execution adapter
//!
//! Hands argument lists to the `ffmpeg` binary and waits for it to finish.

use std::process::Command;

use tracing::debug;

use crate::domain::errors::*;
use crate::ports::*;

/// FFmpeg-based transcode adapter
pub struct FFmpegAdapter {
    program: String,
}

impl FFmpegAdapter {
    /// Create new FFmpeg adapter running `program`
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }
}

impl TranscodePort for FFmpegAdapter {
    fn program(&self) -> &str {
        &self.program
    }

    fn run(&self, args: &[String]) -> Result<String, DomainError> {
        debug!(command = %self.command_line(args), "running encoder");

        let output = Command::new(&self.program)
            .args(args)
            .output()
            .map_err(|e| DomainError::ExecFailed(format!("failed to start {}: {}", self.program, e)))?;

        let stderr = String::from_utf8_lossy(&output.stderr).into_owned();
        if !output.status.success() {
            return Err(DomainError::ExecFailed(format!(
                "{} exited with {}: {}",
                self.program,
                output.status,
                stderr.trim()
            )));
        }

        let mut printed = String::from_utf8_lossy(&output.stdout).into_owned();
        printed.push_str(&stderr);
        Ok(printed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_command_line_quotes_spaces() {
        let adapter = FFmpegAdapter::new("ffmpeg");
        let args = vec!["-i".to_string(), "my video.mp4".to_string(), "out.mp4".to_string()];
        assert_eq!(adapter.command_line(&args), r#"ffmpeg -i "my video.mp4" out.mp4"#);
    }

    #[test]
    fn test_missing_program_is_exec_failure() {
        let adapter = FFmpegAdapter::new("ffr-no-such-encoder-binary");
        let result = adapter.run(&["-version".to_string()]);
        assert!(matches!(result, Err(DomainError::ExecFailed(_))));
    }
}
