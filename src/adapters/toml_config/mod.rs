// TOML config adapter - Reads the optional `[ffr]` table of a TOML file

use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::domain::errors::*;

/// Name of the file looked up in the working directory
pub const LOCAL_CONFIG_FILE: &str = "ffr.toml";

/// Values found in a configuration file, all optional
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FileConfig {
    pub ffmpeg_path: Option<String>,
    pub ffprobe_path: Option<String>,
    pub codec: Option<String>,
    pub preset: Option<String>,
    pub hwaccel_device: Option<String>,
    pub max_name_length: Option<usize>,
    pub keyframe_limit: Option<usize>,
}

#[derive(Debug, Default, Deserialize)]
struct ConfigDocument {
    #[serde(default)]
    ffr: FileConfig,
}

/// TOML configuration adapter
#[derive(Debug, Clone)]
pub struct TomlConfigAdapter {
    search_paths: Vec<PathBuf>,
}

impl TomlConfigAdapter {
    /// Adapter looking in the working directory, then in the user's config directory
    pub fn new() -> Self {
        let mut search_paths = vec![PathBuf::from(LOCAL_CONFIG_FILE)];
        if let Some(home) = std::env::var_os("HOME") {
            search_paths.push(PathBuf::from(home).join(".config").join("ffr").join("config.toml"));
        }
        Self { search_paths }
    }

    /// Adapter with an explicit list of candidate files
    pub fn with_search_paths(search_paths: Vec<PathBuf>) -> Self {
        Self { search_paths }
    }

    /// First existing candidate file
    pub fn discover(&self) -> Option<&Path> {
        self.search_paths
            .iter()
            .map(PathBuf::as_path)
            .find(|p| p.is_file())
    }

    /// Read and parse a configuration file
    pub fn load(&self, path: &Path) -> Result<FileConfig, DomainError> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            DomainError::FsFail(format!(
                "Failed to read config file {}: {}",
                path.display(),
                e
            ))
        })?;

        Self::parse(&content).map_err(|e| match e {
            DomainError::ParseFailed(msg) => {
                DomainError::ParseFailed(format!("{}: {}", path.display(), msg))
            }
            other => other,
        })
    }

    /// Parse the content of a configuration file
    pub fn parse(content: &str) -> Result<FileConfig, DomainError> {
        let document: ConfigDocument = toml::from_str(content)
            .map_err(|e| DomainError::ParseFailed(format!("Failed to parse TOML config: {}", e)))?;
        Ok(document.ffr)
    }
}

impl Default for TomlConfigAdapter {
    fn default() -> Self {
        Self::new()
    }
}
