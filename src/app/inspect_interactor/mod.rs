// Inspect interactor - Builds the info report over a whole batch

use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::app::batch::collect_files;
use crate::domain::model::*;
use crate::error::FfrResult;
use crate::output::{ReportFormat, ReportWriter};
use crate::ports::*;
use crate::utils::format_duration;

/// How the report is built and printed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InspectRequest {
    pub skip_keyframes: bool,
    pub max_name_length: usize,
    pub keyframe_limit: usize,
    pub format: ReportFormat,
}

impl Default for InspectRequest {
    fn default() -> Self {
        Self {
            skip_keyframes: false,
            max_name_length: 50,
            keyframe_limit: 4,
            format: ReportFormat::Text,
        }
    }
}

/// Rows of the report and their rendering
#[derive(Debug, Clone, PartialEq)]
pub struct InspectResponse {
    pub rows: Vec<InfoRow>,
    pub rendered: String,
}

/// Interactor for the info command
pub struct InspectInteractor {
    probe_port: Arc<dyn ProbePort>,
    fs_port: Arc<dyn FsPort>,
    log_port: Arc<dyn LogPort>,
}

impl InspectInteractor {
    /// Create new inspect interactor with injected ports
    pub fn new(
        probe_port: Arc<dyn ProbePort>,
        fs_port: Arc<dyn FsPort>,
        log_port: Arc<dyn LogPort>,
    ) -> Self {
        Self {
            probe_port,
            fs_port,
            log_port,
        }
    }

    /// Describe every file of `paths`, in argument order, directories left out
    pub fn execute(&self, request: &InspectRequest, paths: &[PathBuf]) -> FfrResult<InspectResponse> {
        let start = std::time::Instant::now();
        let files = collect_files(self.fs_port.as_ref(), paths, true)?;

        let rows: Vec<InfoRow> = files.iter().map(|path| self.row(request, path)).collect();
        let rendered = ReportWriter::new(request.max_name_length, request.skip_keyframes)
            .render(&rows, request.format)?;

        self.log_port
            .info(&format!("all done in {}.", format_duration(start.elapsed())));
        Ok(InspectResponse { rows, rendered })
    }

    /// One report row; probe failures are logged and leave the columns empty
    fn row(&self, request: &InspectRequest, path: &Path) -> InfoRow {
        self.log_port.info(&format!("file found: {}", path.display()));

        let mut row = InfoRow {
            name: path
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_default(),
            ..Default::default()
        };

        match self.fs_port.metadata(path) {
            Ok(metadata) => row.size = metadata.size,
            Err(e) => self.log_port.warn(&format!("{}: {}", path.display(), e)),
        }

        match self.probe_port.probe(path) {
            Ok(info) => {
                row.bit_rate = info.bit_rate;
                row.length = info.duration;
                row.frame_rate = info.frame_rate;
                row.width = info.width;
                row.height = info.height;
                row.codec = info.codec;
            }
            Err(e) => self.log_port.warn(&format!("{}: {}", path.display(), e)),
        }

        if !request.skip_keyframes {
            match self.probe_port.keyframes(path, request.keyframe_limit) {
                Ok(times) => row.keyframes = Some(times),
                Err(e) => {
                    self.log_port.warn(&format!("{}: {}", path.display(), e));
                    row.keyframes = Some(Vec::new());
                }
            }
        }

        row
    }
}
