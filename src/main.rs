//! ffr
//!
//! Batch file renamer built around dash separated name parts, with a thin front end to
//! ffmpeg for re-encoding, cropping and inspecting videos.
//!
//! # Usage
//!
//! ```bash
//! ffr --dry-run add-number 2 foo-1bar.mp4
//! ffr merge-parts foo-1bar-2baz.mp4
//! ffr reencode --codec libx264 --crf 18 clip.mp4
//! ffr info --format json *.mp4
//! ```

use anyhow::Result;
use clap::Parser;
use tracing::debug;
use tracing_subscriber::EnvFilter;

use ffr_cli::cli::{commands, Cli, LogFormat};

/// Main entry point for the ffr CLI application
fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(&cli);
    debug!(command = ?cli.command, "starting ffr");

    commands::execute(&cli)
}

/// Install the stderr subscriber; `RUST_LOG` wins over the flag-derived default
fn init_logging(cli: &Cli) {
    let default_level = if cli.verbose || cli.dry_run {
        "ffr_cli=info"
    } else {
        "ffr_cli=warn"
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    let builder = tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(filter)
        .with_target(false);

    match cli.log_format {
        LogFormat::Text => builder.init(),
        LogFormat::Json => builder.json().init(),
    }
}
