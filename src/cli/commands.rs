//! Command implementations

use std::path::PathBuf;

use anyhow::{Context, Result};
use tracing::{info, warn};

use crate::app::container::{AppContainer, DefaultAppContainer};
use crate::app::encode_interactor::EncodeReport;
use crate::app::inspect_interactor::InspectRequest;
use crate::app::rename_interactor::RenameOutcome;
use crate::app::BatchReport;
use crate::cli::args::{CropArgs, InfoArgs, ReencodeArgs};
use crate::cli::{Cli, Commands};
use crate::config_initialization::{initialize_configuration_hierarchy, FfrConfig};
use crate::domain::model::RenameOptions;
use crate::domain::rules::RenameOperation;
use crate::engine::reencode::{Codec, ReencodeSettings};

/// Resolve the configuration and run the requested command
pub fn execute(cli: &Cli) -> Result<()> {
    let config =
        initialize_configuration_hierarchy(cli).context("Failed to initialize configuration")?;
    let container = DefaultAppContainer::new(&config, cli.verbose);
    let options = cli.options();

    match &cli.command {
        Commands::Prefix(args) => rename(&container, &args.prefix(), &args.files, options),
        Commands::Suffix(args) => rename(&container, &args.suffix(), &args.files, options),
        Commands::Replace(args) => rename(&container, &args.operation(), &args.files, options),
        Commands::DeleteParts(args) => rename(&container, &args.operation(), &args.files, options),
        Commands::DeleteRegexp(args) => {
            rename(&container, &args.operation(), &args.files, options)
        }
        Commands::AddNumber(args) => rename(&container, &args.operation(), &args.files, options),
        Commands::InsertBefore(args) => {
            rename(&container, &args.operation(), &args.files, options)
        }
        Commands::InsertDimensions(args) => {
            rename(&container, &args.operation(), &args.files, options)
        }
        Commands::MergeParts(args) => rename(&container, &args.operation(), &args.files, options),
        Commands::PrefixDate(args) => {
            rename(&container, &RenameOperation::DatePrefix, &args.files, options)
        }
        Commands::Reencode(args) => reencode(&container, &config, args, options),
        Commands::Crop(args) => crop(&container, args, options),
        Commands::Keyframes(args) => keyframes(&container, &args.files, options),
        Commands::Info(args) => inspect(&container, &config, args),
    }
}

/// Execute one of the rename commands
pub fn rename(
    container: &dyn AppContainer,
    operation: &RenameOperation,
    files: &[PathBuf],
    options: RenameOptions,
) -> Result<()> {
    let report = container
        .rename_interactor()
        .execute(operation, files, options)
        .with_context(|| format!("Failed to run {}", operation.name()))?;

    for file in &report.completed {
        if file.outcome == RenameOutcome::Previewed {
            println!("{}", file.plan);
        }
    }

    summarize(operation.name(), &report);
    Ok(())
}

/// Execute the reencode command
pub fn reencode(
    container: &dyn AppContainer,
    config: &FfrConfig,
    args: &ReencodeArgs,
    options: RenameOptions,
) -> Result<()> {
    let codec: Codec = config.codec.parse().context("Invalid codec")?;
    let settings = ReencodeSettings::new(codec)
        .with_crf(args.crf)
        .with_preset(config.preset.as_str())
        .with_hwaccel(args.hwaccel.clone(), config.hwaccel_device.clone())
        .with_replace_file(args.replace_file);

    let report = container
        .encode_interactor()
        .reencode(&settings, &args.files, options)
        .context("Failed to run reencode")?;

    print_planned(&report);
    summarize("reencode", &report);
    Ok(())
}

/// Execute the crop command
pub fn crop(container: &dyn AppContainer, args: &CropArgs, options: RenameOptions) -> Result<()> {
    let report = container
        .encode_interactor()
        .crop(&args.request(), &args.files, options)
        .context("Failed to run crop")?;

    print_planned(&report);
    summarize("crop", &report);
    Ok(())
}

/// Execute the keyframes command
pub fn keyframes(
    container: &dyn AppContainer,
    files: &[PathBuf],
    options: RenameOptions,
) -> Result<()> {
    let report = container
        .encode_interactor()
        .keyframes(files, options)
        .context("Failed to run keyframes")?;

    for file in &report.completed {
        let times: Vec<String> = file.times.iter().map(|t| format!("{:.1}", t)).collect();
        println!("{}: {}", file.path.display(), times.join(", "));
    }

    summarize("keyframes", &report);
    Ok(())
}

/// Execute the info command
pub fn inspect(container: &dyn AppContainer, config: &FfrConfig, args: &InfoArgs) -> Result<()> {
    let request = InspectRequest {
        skip_keyframes: args.skip_keyframes,
        max_name_length: config.max_name_length,
        keyframe_limit: config.keyframe_limit,
        format: args.format,
    };

    let response = container
        .inspect_interactor()
        .execute(&request, &args.files)
        .context("Failed to run info")?;

    print!("{}", response.rendered);
    Ok(())
}

/// Dry runs print the encoder command they would have run
fn print_planned(report: &BatchReport<EncodeReport>) {
    for encode in report.completed.iter().filter(|e| !e.executed) {
        println!("{}", encode.command);
    }
}

fn summarize<T>(command: &str, report: &BatchReport<T>) {
    if report.failures.is_empty() {
        info!("{}: {} file(s) processed", command, report.processed());
    } else {
        warn!(
            "{}: {} file(s) processed, {} failed",
            command,
            report.processed(),
            report.failures.len()
        );
    }
}
