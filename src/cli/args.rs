//! Command-line argument definitions

use std::path::PathBuf;

use clap::Args;
use clap_num::number_range;

use crate::domain::rules::RenameOperation;
use crate::engine::crop::CropRequest;
use crate::output::{ReportFormat, MIN_NAME_LENGTH};

fn parse_crf(s: &str) -> Result<u8, String> {
    number_range(s, 0, 63)
}

fn parse_name_length(s: &str) -> Result<usize, String> {
    number_range(s, MIN_NAME_LENGTH, usize::MAX)
}

/// Arguments of commands taking nothing but files
#[derive(Args, Debug)]
pub struct FilesArgs {
    /// Files to process
    pub files: Vec<PathBuf>,
}

/// Arguments for prefix and suffix
#[derive(Args, Debug)]
pub struct PartArgs {
    /// Part to insert
    pub text: String,

    /// Number of parts to skip
    #[arg(short, long, default_value_t = 0)]
    pub skip_parts: usize,

    /// Files to rename
    pub files: Vec<PathBuf>,
}

/// Arguments for the replace command
#[derive(Args, Debug)]
pub struct ReplaceArgs {
    /// Text to look for
    pub needle: String,

    /// Text to put in its place
    pub replacement: String,

    /// Number of occurrences to leave alone
    #[arg(short, long, default_value_t = 0)]
    pub skip_finds: usize,

    /// Files to rename
    pub files: Vec<PathBuf>,
}

/// Arguments for the delete-parts command
#[derive(Args, Debug)]
pub struct DeletePartsArgs {
    /// Comma separated 1-based part positions, e.g. 1,3
    pub parts: String,

    /// Count positions from the end
    #[arg(long, visible_alias = "fb")]
    pub from_back: bool,

    /// Files to rename
    pub files: Vec<PathBuf>,
}

/// Arguments for the delete-regexp command
#[derive(Args, Debug)]
pub struct DeleteRegexpArgs {
    /// Regular expression (default: -\d+[a-z]+)
    #[arg(short = 'r', long)]
    pub regular_expression: Option<String>,

    /// Capture group to delete
    #[arg(long, visible_alias = "rg", default_value_t = 0)]
    pub regexp_group: usize,

    /// Number of matches to leave alone
    #[arg(short, long, default_value_t = 0)]
    pub skip_finds: usize,

    /// Maximum number of matches to change, 0 for all
    #[arg(long, visible_alias = "mc", default_value_t = 1)]
    pub max_count: usize,

    /// Files to rename
    pub files: Vec<PathBuf>,
}

/// Arguments for the add-number command
#[derive(Args, Debug)]
pub struct AddNumberArgs {
    /// Number to add, may be negative
    #[arg(allow_negative_numbers = true)]
    pub number: i64,

    /// Regular expression (default: -(\d+)[a-z]+)
    #[arg(short = 'r', long)]
    pub regular_expression: Option<String>,

    /// Capture group holding the number
    #[arg(long, visible_alias = "rg", default_value_t = 1)]
    pub regexp_group: usize,

    /// Number of matches to leave alone
    #[arg(short, long, default_value_t = 0)]
    pub skip_finds: usize,

    /// Maximum number of matches to change, 0 for all
    #[arg(long, visible_alias = "mc", default_value_t = 1)]
    pub max_count: usize,

    /// Files to rename
    pub files: Vec<PathBuf>,
}

/// Arguments for the insert-before command
#[derive(Args, Debug)]
pub struct InsertBeforeArgs {
    /// Text to insert
    pub text: String,

    /// Regular expression (default: \d+[a-z]+)
    #[arg(short = 'r', long)]
    pub regular_expression: Option<String>,

    /// Do not put a dash in front of the regular expression
    #[arg(long, visible_alias = "sdp")]
    pub skip_dash_prefix: bool,

    /// Leave names already containing the text alone
    #[arg(long, visible_alias = "sd")]
    pub skip_duplicate: bool,

    /// Files to rename
    pub files: Vec<PathBuf>,
}

/// Arguments for the insert-dimensions command
#[derive(Args, Debug)]
pub struct InsertDimensionsArgs {
    /// Regular expression (default: \d+[a-z]+)
    #[arg(short = 'r', long)]
    pub regular_expression: Option<String>,

    /// Do not put a dash in front of the regular expression
    #[arg(long, visible_alias = "sdp")]
    pub skip_dash_prefix: bool,

    /// Leave names already containing the dimensions alone
    #[arg(long, visible_alias = "sd")]
    pub skip_duplicate: bool,

    /// Files to rename
    pub files: Vec<PathBuf>,
}

/// Arguments for the merge-parts command
#[derive(Args, Debug)]
pub struct MergePartsArgs {
    /// Label fragment (default: [a-z]+)
    #[arg(short = 'r', long)]
    pub regular_expression: Option<String>,

    /// Text removed from the merged name
    #[arg(long, visible_alias = "del")]
    pub delete_text: Option<String>,

    /// Files to rename
    pub files: Vec<PathBuf>,
}

/// Arguments for the reencode command
#[derive(Args, Debug)]
pub struct ReencodeArgs {
    /// Target codec: libx264, libx265 or vp9
    #[arg(long)]
    pub codec: Option<String>,

    /// Constant rate factor, 0 for the codec default
    #[arg(long, value_parser = parse_crf, default_value_t = 0)]
    pub crf: u8,

    /// Encoder preset
    #[arg(long)]
    pub preset: Option<String>,

    /// Hardware acceleration, e.g. qsv
    #[arg(long, visible_alias = "hw")]
    pub hwaccel: Option<String>,

    /// Hardware acceleration device
    #[arg(long, visible_alias = "hwd")]
    pub hwaccel_device: Option<String>,

    /// Replace the original, keeping it as a backup
    #[arg(long, visible_alias = "rf")]
    pub replace_file: bool,

    /// Videos to re-encode
    pub files: Vec<PathBuf>,
}

/// Arguments for the crop command
#[derive(Args, Debug)]
pub struct CropArgs {
    /// Target width
    #[arg(long, default_value_t = 0)]
    pub width: u32,

    /// Target height
    #[arg(long, default_value_t = 0)]
    pub height: u32,

    /// left, center, right or a pixel offset
    #[arg(long, default_value = "center")]
    pub x: String,

    /// top, center, bottom or a pixel offset
    #[arg(long, default_value = "center")]
    pub y: String,

    /// Dimension preset overriding width and height, e.g. hd or 1080p
    #[arg(long, visible_alias = "dp")]
    pub dimension_preset: Option<String>,

    /// Videos to crop
    pub files: Vec<PathBuf>,
}

/// Arguments for the info command
#[derive(Args, Debug)]
pub struct InfoArgs {
    /// Do not list keyframes
    #[arg(long, visible_alias = "sk")]
    pub skip_keyframes: bool,

    /// Longest file name shown before shortening
    #[arg(long, visible_alias = "mnl", value_parser = parse_name_length)]
    pub maximum_name_length: Option<usize>,

    /// Report format
    #[arg(long, value_enum, default_value_t = ReportFormat::Text)]
    pub format: ReportFormat,

    /// Videos to describe
    pub files: Vec<PathBuf>,
}

impl CropArgs {
    pub fn request(&self) -> CropRequest {
        CropRequest {
            width: self.width,
            height: self.height,
            x: self.x.clone(),
            y: self.y.clone(),
            preset: self.dimension_preset.clone(),
        }
    }
}

impl PartArgs {
    pub fn prefix(&self) -> RenameOperation {
        RenameOperation::Prefix {
            text: self.text.clone(),
            skip_parts: self.skip_parts,
        }
    }

    pub fn suffix(&self) -> RenameOperation {
        RenameOperation::Suffix {
            text: self.text.clone(),
            skip_parts: self.skip_parts,
        }
    }
}

impl ReplaceArgs {
    pub fn operation(&self) -> RenameOperation {
        RenameOperation::Replace {
            search: self.needle.clone(),
            replace_with: self.replacement.clone(),
            skip_finds: self.skip_finds,
        }
    }
}

impl DeletePartsArgs {
    pub fn operation(&self) -> RenameOperation {
        RenameOperation::DeleteParts {
            parts: self.parts.clone(),
            from_back: self.from_back,
        }
    }
}

impl DeleteRegexpArgs {
    pub fn operation(&self) -> RenameOperation {
        RenameOperation::DeleteRegexp {
            pattern: self.regular_expression.clone(),
            group: self.regexp_group,
            skip_finds: self.skip_finds,
            max_count: self.max_count,
        }
    }
}

impl AddNumberArgs {
    pub fn operation(&self) -> RenameOperation {
        RenameOperation::AddNumber {
            pattern: self.regular_expression.clone(),
            number: self.number,
            group: self.regexp_group,
            skip_finds: self.skip_finds,
            max_count: self.max_count,
        }
    }
}

impl InsertBeforeArgs {
    pub fn operation(&self) -> RenameOperation {
        RenameOperation::InsertBefore {
            pattern: self.regular_expression.clone(),
            text: self.text.clone(),
            skip_dash_prefix: self.skip_dash_prefix,
            skip_duplicate: self.skip_duplicate,
        }
    }
}

impl InsertDimensionsArgs {
    pub fn operation(&self) -> RenameOperation {
        RenameOperation::InsertDimensions {
            pattern: self.regular_expression.clone(),
            skip_dash_prefix: self.skip_dash_prefix,
            skip_duplicate: self.skip_duplicate,
        }
    }
}

impl MergePartsArgs {
    pub fn operation(&self) -> RenameOperation {
        RenameOperation::MergeParts {
            pattern: self.regular_expression.clone(),
            delete_text: self.delete_text.clone(),
        }
    }
}
