//! CLI module for ffr
//!
//! This module handles command-line argument parsing and command execution.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

use crate::domain::model::RenameOptions;

pub mod args;
pub mod commands;

/// ffr
///
/// Batch file renamer built around dash separated name parts, plus a thin front end to
/// ffmpeg for re-encoding, cropping and inspecting videos.
#[derive(Parser, Debug)]
#[command(name = "ffr")]
#[command(about = "ffr - Batch file renaming and video transcoding")]
#[command(version)]
#[command(long_about = None)]
pub struct Cli {
    /// Only report what would happen
    #[arg(short, long, global = true)]
    pub dry_run: bool,

    /// Log every step
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Replace existing target files
    #[arg(short, long, global = true)]
    pub force_overwrite: bool,

    /// Process the files in reverse order
    #[arg(short, long, global = true)]
    pub backwards: bool,

    /// Configuration file (default: ./ffr.toml, then ~/.config/ffr/config.toml)
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Log output format
    #[arg(long, global = true, value_enum, default_value_t = LogFormat::Text)]
    pub log_format: LogFormat,

    /// The command to execute
    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    /// Switches shared by every file of the batch
    pub fn options(&self) -> RenameOptions {
        RenameOptions {
            dry_run: self.dry_run,
            force_overwrite: self.force_overwrite,
            backwards: self.backwards,
            verbose: self.verbose,
        }
    }
}

/// Formatter used for log lines on stderr
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Insert a part before the others
    #[command(visible_alias = "p")]
    Prefix(args::PartArgs),
    /// Insert a part after the others
    #[command(visible_alias = "s")]
    Suffix(args::PartArgs),
    /// Replace a text in the file names
    #[command(visible_alias = "r")]
    Replace(args::ReplaceArgs),
    /// Delete parts by their position
    #[command(visible_alias = "dp")]
    DeleteParts(args::DeletePartsArgs),
    /// Delete the matches of a regular expression
    #[command(visible_alias = "dr")]
    DeleteRegexp(args::DeleteRegexpArgs),
    /// Add a number to the number of descriptions
    #[command(visible_alias = "a")]
    AddNumber(args::AddNumberArgs),
    /// Insert a text before the last description
    #[command(visible_alias = "ib")]
    InsertBefore(args::InsertBeforeArgs),
    /// Insert the video dimensions before the last description
    #[command(visible_alias = "id")]
    InsertDimensions(args::InsertDimensionsArgs),
    /// Merge numbered descriptions into one
    #[command(visible_alias = "m")]
    MergeParts(args::MergePartsArgs),
    /// Prefix file names with the date they contain
    #[command(visible_alias = "pd")]
    PrefixDate(args::FilesArgs),
    /// Re-encode videos
    Reencode(args::ReencodeArgs),
    /// Crop videos
    #[command(visible_alias = "c")]
    Crop(args::CropArgs),
    /// List the first keyframes of videos
    #[command(visible_alias = "k")]
    Keyframes(args::FilesArgs),
    /// Print a table describing videos
    #[command(visible_alias = "i")]
    Info(args::InfoArgs),
}
