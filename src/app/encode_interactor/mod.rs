// Encode interactor - Re-encode, crop and keyframe listing over a batch of files

use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::app::batch::{collect_files, run_each, BatchReport};
use crate::domain::errors::*;
use crate::domain::model::*;
use crate::engine::crop::CropRequest;
use crate::engine::reencode::{
    apply_bit_rate, backup_path, output_path, target_bit_rate, ReencodeSettings,
};
use crate::error::FfrResult;
use crate::ports::*;

/// One encoder run, planned or executed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodeReport {
    pub input: PathBuf,
    pub output: PathBuf,
    /// Rendered command line
    pub command: String,
    /// False on dry runs
    pub executed: bool,
}

/// Keyframe times of one file
#[derive(Debug, Clone, PartialEq)]
pub struct KeyframeReport {
    pub path: PathBuf,
    pub times: Vec<f64>,
}

/// Interactor for the commands driving the encoder
pub struct EncodeInteractor {
    probe_port: Arc<dyn ProbePort>,
    transcode_port: Arc<dyn TranscodePort>,
    fs_port: Arc<dyn FsPort>,
    log_port: Arc<dyn LogPort>,
    keyframe_limit: usize,
}

impl EncodeInteractor {
    /// Create new encode interactor with injected ports
    pub fn new(
        probe_port: Arc<dyn ProbePort>,
        transcode_port: Arc<dyn TranscodePort>,
        fs_port: Arc<dyn FsPort>,
        log_port: Arc<dyn LogPort>,
        keyframe_limit: usize,
    ) -> Self {
        Self {
            probe_port,
            transcode_port,
            fs_port,
            log_port,
            keyframe_limit,
        }
    }

    fn files(&self, paths: &[PathBuf], options: &RenameOptions) -> FfrResult<Vec<PathBuf>> {
        let mut files = collect_files(self.fs_port.as_ref(), paths, false)?;
        if options.backwards {
            files.reverse();
        }
        Ok(files)
    }

    /// Re-encode every file
    pub fn reencode(
        &self,
        settings: &ReencodeSettings,
        paths: &[PathBuf],
        options: RenameOptions,
    ) -> FfrResult<BatchReport<EncodeReport>> {
        let files = self.files(paths, &options)?;
        Ok(run_each(self.log_port.as_ref(), &files, |path| {
            self.reencode_file(settings, path, &options)
        }))
    }

    pub fn reencode_file(
        &self,
        settings: &ReencodeSettings,
        input: &Path,
        options: &RenameOptions,
    ) -> Result<EncodeReport, DomainError> {
        let mut params = settings.params(&input.to_string_lossy())?;
        if settings.needs_bit_rate() {
            let source = self.probe_port.probe(input)?;
            apply_bit_rate(&mut params, target_bit_rate(&source, settings.codec));
        }

        let container = settings.codec.container();
        let output = output_path(input, &params, container, |p| self.fs_port.exists(p));
        let args = params.to_args(&output);
        let command = self.transcode_port.command_line(&args);

        self.log_port
            .info(&format!("new file: {:?}", output.display().to_string()));
        self.log_port.info(&format!("command: {}", command));

        let mut report = EncodeReport {
            input: input.to_path_buf(),
            output,
            command,
            executed: false,
        };
        if options.dry_run {
            return Ok(report);
        }

        let printed = self.transcode_port.run(&args)?;
        self.log_port.debug(&printed);
        report.executed = true;

        if settings.replace_file {
            let backup = backup_path(input, container);
            self.move_file(input, &backup)?;
            self.move_file(&report.output, input)?;
            report.output = input.to_path_buf();
        }

        Ok(report)
    }

    fn move_file(&self, from: &Path, to: &Path) -> Result<(), DomainError> {
        self.log_port
            .info(&format!("mv {:?} {:?}", from.display().to_string(), to.display().to_string()));
        self.fs_port.rename(from, to)
    }

    /// Crop every file
    pub fn crop(
        &self,
        crop: &CropRequest,
        paths: &[PathBuf],
        options: RenameOptions,
    ) -> FfrResult<BatchReport<EncodeReport>> {
        let files = self.files(paths, &options)?;
        Ok(run_each(self.log_port.as_ref(), &files, |path| {
            self.crop_file(crop, path, &options)
        }))
    }

    pub fn crop_file(
        &self,
        crop: &CropRequest,
        input: &Path,
        options: &RenameOptions,
    ) -> Result<EncodeReport, DomainError> {
        let source = self.probe_port.dimensions(input)?;
        let window = crop.window(&source)?;

        if let Some(preset) = crop.preset.as_deref().filter(|p| !p.is_empty()) {
            self.log_port.info(&format!("dimension preset: {}", preset));
        }
        self.log_port.info(&format!(
            "old dimensions: {}, new dimensions: {}x{}",
            source, window.width, window.height
        ));
        self.log_port
            .info(&format!("pos x: {}, pos y: {}", window.x, window.y));

        let output = window.output_path(input);
        if self.fs_port.exists(&output) && !options.force_overwrite {
            return Err(DomainError::AlreadyExists(output.display().to_string()));
        }

        let args = window.args(input, &output);
        let command = self.transcode_port.command_line(&args);
        self.log_port.info(&format!("command: {}", command));

        let mut report = EncodeReport {
            input: input.to_path_buf(),
            output,
            command,
            executed: false,
        };
        if options.dry_run {
            return Ok(report);
        }

        let printed = self.transcode_port.run(&args)?;
        self.log_port.debug(&printed);
        report.executed = true;
        Ok(report)
    }

    /// List the first keyframes of every file
    pub fn keyframes(
        &self,
        paths: &[PathBuf],
        options: RenameOptions,
    ) -> FfrResult<BatchReport<KeyframeReport>> {
        let files = self.files(paths, &options)?;
        Ok(run_each(self.log_port.as_ref(), &files, |path| {
            self.keyframes_file(path)
        }))
    }

    pub fn keyframes_file(&self, input: &Path) -> Result<KeyframeReport, DomainError> {
        let name = input
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        self.log_port.info(&format!("file: {}", name));

        let times = self.probe_port.keyframes(input, self.keyframe_limit)?;
        let indexes = times
            .iter()
            .map(|t| format!("{:.1}", t))
            .collect::<Vec<_>>()
            .join(", ");
        self.log_port.info(&format!("indexes: {}...", indexes));

        Ok(KeyframeReport {
            path: input.to_path_buf(),
            times,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::{FsLocalAdapter, TracingLogAdapter};
    use crate::engine::reencode::Codec;
    use std::sync::Mutex;
    use tempfile::TempDir;

    struct FixedProbe;

    impl ProbePort for FixedProbe {
        fn probe(&self, _file_path: &Path) -> Result<VideoInfo, DomainError> {
            Ok(VideoInfo {
                width: 1920,
                height: 1080,
                frame_rate: 30.0,
                codec: "h264".to_string(),
                ..Default::default()
            })
        }

        fn keyframes(&self, _file_path: &Path, limit: usize) -> Result<Vec<f64>, DomainError> {
            Ok([0.0, 2.0, 4.0, 6.0, 8.0].into_iter().take(limit).collect())
        }
    }

    /// Records runs and writes the output file like the encoder would
    #[derive(Default)]
    struct RecordingTranscoder {
        runs: Mutex<Vec<Vec<String>>>,
    }

    impl TranscodePort for RecordingTranscoder {
        fn program(&self) -> &str {
            "ffmpeg"
        }

        fn run(&self, args: &[String]) -> Result<String, DomainError> {
            if let Some(output) = args.last() {
                std::fs::write(output, "encoded").map_err(|e| DomainError::ExecFailed(e.to_string()))?;
            }
            self.runs.lock().unwrap().push(args.to_vec());
            Ok(String::new())
        }
    }

    fn setup() -> (TempDir, Arc<RecordingTranscoder>, EncodeInteractor) {
        let dir = TempDir::new().unwrap();
        let transcoder = Arc::new(RecordingTranscoder::default());
        let interactor = EncodeInteractor::new(
            Arc::new(FixedProbe),
            Arc::clone(&transcoder) as Arc<dyn TranscodePort>,
            Arc::new(FsLocalAdapter::new()),
            Arc::new(TracingLogAdapter::new(false)),
            4,
        );
        (dir, transcoder, interactor)
    }

    #[test]
    fn test_reencode_dry_run_runs_nothing() {
        let (dir, transcoder, interactor) = setup();
        let input = dir.path().join("foo.mp4");
        std::fs::write(&input, "original").unwrap();
        let options = RenameOptions {
            dry_run: true,
            ..Default::default()
        };

        let report = interactor
            .reencode(&ReencodeSettings::new(Codec::X265), &[input], options)
            .unwrap();

        let encode = &report.completed[0];
        assert!(!encode.executed);
        assert_eq!(encode.output, dir.path().join("foo-libx265-23-ultrafast.mp4"));
        assert!(encode.command.starts_with("ffmpeg -i "));
        assert!(transcoder.runs.lock().unwrap().is_empty());
    }

    #[test]
    fn test_reencode_replace_file_keeps_backup() {
        let (dir, transcoder, interactor) = setup();
        let input = dir.path().join("foo.mp4");
        std::fs::write(&input, "original").unwrap();
        let settings = ReencodeSettings::new(Codec::X264).with_replace_file(true);

        let report = interactor
            .reencode(&settings, &[input.clone()], RenameOptions::default())
            .unwrap();

        assert!(report.failures.is_empty());
        assert_eq!(transcoder.runs.lock().unwrap().len(), 1);
        assert_eq!(std::fs::read_to_string(&input).unwrap(), "encoded");
        assert_eq!(
            std::fs::read_to_string(dir.path().join("foo-backup.mp4")).unwrap(),
            "original"
        );
        assert!(!dir.path().join("foo-libx264-20-ultrafast.mp4").exists());
    }

    #[test]
    fn test_reencode_hwaccel_adds_bit_rate() {
        let (dir, transcoder, interactor) = setup();
        let input = dir.path().join("foo.mp4");
        std::fs::write(&input, "original").unwrap();
        let settings =
            ReencodeSettings::new(Codec::X265).with_hwaccel(Some("qsv".to_string()), None);

        interactor
            .reencode(&settings, &[input], RenameOptions::default())
            .unwrap();

        let runs = transcoder.runs.lock().unwrap();
        let args = &runs[0];
        let rate = args.iter().position(|a| a == "-b:v").unwrap();
        assert_eq!(args[rate + 1], "3.7M");
        assert!(args.contains(&"hevc_qsv".to_string()));
    }

    #[test]
    fn test_crop_refuses_existing_output() {
        let (dir, transcoder, interactor) = setup();
        let input = dir.path().join("foo.mp4");
        std::fs::write(&input, "original").unwrap();
        std::fs::write(dir.path().join("foo-1280x720.mp4"), "taken").unwrap();
        let crop = CropRequest {
            preset: Some("hd".to_string()),
            ..Default::default()
        };

        let report = interactor
            .crop(&crop, &[input.clone()], RenameOptions::default())
            .unwrap();
        assert!(matches!(report.failures[0].error, DomainError::AlreadyExists(_)));

        let forced = RenameOptions {
            force_overwrite: true,
            ..Default::default()
        };
        let report = interactor.crop(&crop, &[input], forced).unwrap();
        let encode = &report.completed[0];
        assert!(encode.executed);
        assert!(encode.command.contains("crop=1280:720:320:180"));
        assert_eq!(transcoder.runs.lock().unwrap().len(), 1);
    }

    #[test]
    fn test_keyframes_limit() {
        let (dir, _, interactor) = setup();
        let input = dir.path().join("foo.mp4");
        std::fs::write(&input, "original").unwrap();

        let report = interactor.keyframes(&[input], RenameOptions::default()).unwrap();
        assert_eq!(report.completed[0].times, vec![0.0, 2.0, 4.0, 6.0]);
    }
}
