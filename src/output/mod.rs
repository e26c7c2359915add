//! Report output module

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

pub mod writer;

pub use writer::{ReportWriter, MIN_NAME_LENGTH};

/// How the info report is printed
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReportFormat {
    /// Aligned text table
    #[default]
    Text,
    /// JSON array
    Json,
    /// YAML sequence
    Yaml,
}
