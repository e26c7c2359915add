use std::sync::Arc;

use crate::adapters::{FFmpegAdapter, FFprobeAdapter, FsLocalAdapter, TracingLogAdapter};
use crate::app::{
    encode_interactor::EncodeInteractor, inspect_interactor::InspectInteractor,
    rename_interactor::RenameInteractor,
};
use crate::config_initialization::FfrConfig;
use crate::ports::{FsPort, LogPort, ProbePort, TranscodePort};

pub trait AppContainer: Send + Sync {
    fn rename_interactor(&self) -> Arc<RenameInteractor>;
    fn encode_interactor(&self) -> Arc<EncodeInteractor>;
    fn inspect_interactor(&self) -> Arc<InspectInteractor>;
    fn log_port(&self) -> Arc<dyn LogPort>;
}

pub struct DefaultAppContainer {
    rename_interactor: Arc<RenameInteractor>,
    encode_interactor: Arc<EncodeInteractor>,
    inspect_interactor: Arc<InspectInteractor>,
    log_port: Arc<dyn LogPort>,
}

impl DefaultAppContainer {
    /// Wire the external-process adapters described by `config`
    pub fn new(config: &FfrConfig, verbose: bool) -> Self {
        Self::with_ports(
            Arc::new(FFprobeAdapter::new(config.ffprobe_path.as_str())),
            Arc::new(FFmpegAdapter::new(config.ffmpeg_path.as_str())),
            Arc::new(FsLocalAdapter::new()),
            Arc::new(TracingLogAdapter::new(verbose)),
            config.keyframe_limit,
        )
    }

    pub fn with_ports(
        probe_port: Arc<dyn ProbePort>,
        transcode_port: Arc<dyn TranscodePort>,
        fs_port: Arc<dyn FsPort>,
        log_port: Arc<dyn LogPort>,
        keyframe_limit: usize,
    ) -> Self {
        let rename_interactor = Arc::new(RenameInteractor::new(
            Arc::clone(&probe_port),
            Arc::clone(&fs_port),
            Arc::clone(&log_port),
        ));

        let encode_interactor = Arc::new(EncodeInteractor::new(
            Arc::clone(&probe_port),
            transcode_port,
            Arc::clone(&fs_port),
            Arc::clone(&log_port),
            keyframe_limit,
        ));

        let inspect_interactor = Arc::new(InspectInteractor::new(
            probe_port,
            fs_port,
            Arc::clone(&log_port),
        ));

        Self {
            rename_interactor,
            encode_interactor,
            inspect_interactor,
            log_port,
        }
    }
}

impl AppContainer for DefaultAppContainer {
    fn rename_interactor(&self) -> Arc<RenameInteractor> {
        Arc::clone(&self.rename_interactor)
    }

    fn encode_interactor(&self) -> Arc<EncodeInteractor> {
        Arc::clone(&self.encode_interactor)
    }

    fn inspect_interactor(&self) -> Arc<InspectInteractor> {
        Arc::clone(&self.inspect_interactor)
    }

    fn log_port(&self) -> Arc<dyn LogPort> {
        Arc::clone(&self.log_port)
    }
}
