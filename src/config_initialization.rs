//! Configuration initialization and hierarchy management

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::adapters::toml_config::{FileConfig, TomlConfigAdapter};
use crate::cli::{Cli, Commands};
use crate::error::{FfrError, FfrResult};
use crate::output::MIN_NAME_LENGTH;

/// Resolved settings of a run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FfrConfig {
    pub ffmpeg_path: String,
    pub ffprobe_path: String,
    pub codec: String,
    pub preset: String,
    pub hwaccel_device: Option<String>,
    pub max_name_length: usize,
    pub keyframe_limit: usize,
}

impl Default for FfrConfig {
    fn default() -> Self {
        Self {
            ffmpeg_path: "ffmpeg".to_string(),
            ffprobe_path: "ffprobe".to_string(),
            codec: "libx265".to_string(),
            preset: "ultrafast".to_string(),
            hwaccel_device: None,
            max_name_length: 50,
            keyframe_limit: 4,
        }
    }
}

impl FfrConfig {
    /// Overlay the values present in a configuration file
    pub fn merge_file(&mut self, file: FileConfig) -> FfrResult<()> {
        if let Some(v) = file.ffmpeg_path {
            self.ffmpeg_path = v;
        }
        if let Some(v) = file.ffprobe_path {
            self.ffprobe_path = v;
        }
        if let Some(v) = file.codec {
            self.codec = v;
        }
        if let Some(v) = file.preset {
            self.preset = v;
        }
        if file.hwaccel_device.is_some() {
            self.hwaccel_device = file.hwaccel_device;
        }
        if let Some(v) = file.max_name_length {
            self.max_name_length = check_name_length("max_name_length", v)?;
        }
        if let Some(v) = file.keyframe_limit {
            self.keyframe_limit = v;
        }
        Ok(())
    }
}

/// Initialize configuration hierarchy following precedence: CLI > Env > File > Defaults
pub fn initialize_configuration_hierarchy(cli: &Cli) -> FfrResult<FfrConfig> {
    let mut config = FfrConfig::default();

    load_config_file(&mut config, &TomlConfigAdapter::new(), cli.config.as_deref())?;
    load_environment_variables(&mut config, |key| std::env::var(key).ok())?;
    apply_cli_configuration_overrides(&mut config, &cli.command);

    debug!(?config, "configuration resolved");
    Ok(config)
}

/// Load configuration from the explicit file, or the first one found
pub fn load_config_file(
    config: &mut FfrConfig,
    adapter: &TomlConfigAdapter,
    explicit: Option<&Path>,
) -> FfrResult<()> {
    let path = match explicit {
        Some(path) => {
            if !path.is_file() {
                return Err(FfrError::Config {
                    message: format!("config file not found: {}", path.display()),
                });
            }
            path
        }
        None => match adapter.discover() {
            Some(path) => path,
            None => {
                debug!("no configuration file found");
                return Ok(());
            }
        },
    };

    info!("Loading configuration from: {}", path.display());
    let file = adapter.load(path).map_err(|e| FfrError::Config {
        message: e.to_string(),
    })?;
    config.merge_file(file)
}

/// Apply `FFR_*` environment variables looked up through `lookup`
pub fn load_environment_variables<F>(config: &mut FfrConfig, lookup: F) -> FfrResult<()>
where
    F: Fn(&str) -> Option<String>,
{
    let mut env_overrides = 0;
    let mut text = |key: &str, target: &mut String| {
        if let Some(value) = lookup(key) {
            debug!("Found environment override: {} = {}", key, value);
            *target = value;
            env_overrides += 1;
        }
    };

    text("FFR_FFMPEG", &mut config.ffmpeg_path);
    text("FFR_FFPROBE", &mut config.ffprobe_path);
    text("FFR_CODEC", &mut config.codec);
    text("FFR_PRESET", &mut config.preset);

    if let Some(device) = lookup("FFR_HWACCEL_DEVICE") {
        config.hwaccel_device = Some(device);
        env_overrides += 1;
    }
    if let Some(value) = lookup("FFR_MAX_NAME_LENGTH") {
        let length = parse_number("FFR_MAX_NAME_LENGTH", &value)?;
        config.max_name_length = check_name_length("FFR_MAX_NAME_LENGTH", length)?;
        env_overrides += 1;
    }
    if let Some(value) = lookup("FFR_KEYFRAME_LIMIT") {
        config.keyframe_limit = parse_number("FFR_KEYFRAME_LIMIT", &value)?;
        env_overrides += 1;
    }

    if env_overrides > 0 {
        debug!("Applied {} environment variable overrides", env_overrides);
    }
    Ok(())
}

fn parse_number(key: &str, value: &str) -> FfrResult<usize> {
    value.trim().parse().map_err(|_| FfrError::Config {
        message: format!("{} is not a number: {:?}", key, value),
    })
}

fn check_name_length(key: &str, length: usize) -> FfrResult<usize> {
    if length < MIN_NAME_LENGTH {
        return Err(FfrError::Config {
            message: format!("{} must be at least {}, got {}", key, MIN_NAME_LENGTH, length),
        });
    }
    Ok(length)
}

/// Apply CLI argument overrides to configuration
pub fn apply_cli_configuration_overrides(config: &mut FfrConfig, command: &Commands) {
    match command {
        Commands::Reencode(args) => {
            if let Some(codec) = &args.codec {
                config.codec = codec.clone();
            }
            if let Some(preset) = &args.preset {
                config.preset = preset.clone();
            }
            if args.hwaccel_device.is_some() {
                config.hwaccel_device = args.hwaccel_device.clone();
            }
        }
        Commands::Info(args) => {
            if let Some(length) = args.maximum_name_length {
                config.max_name_length = length;
            }
        }
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use std::collections::HashMap;
    use tempfile::TempDir;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_file_then_env_then_cli() {
        let dir = TempDir::new().unwrap();
        let file = dir.path().join("ffr.toml");
        std::fs::write(
            &file,
            "[ffr]\ncodec = \"vp9\"\npreset = \"slow\"\nmax_name_length = 30\n",
        )
        .unwrap();

        let mut config = FfrConfig::default();
        load_config_file(&mut config, &TomlConfigAdapter::with_search_paths(vec![]), Some(&file))
            .unwrap();
        assert_eq!(config.codec, "vp9");
        assert_eq!(config.max_name_length, 30);
        assert_eq!(config.ffmpeg_path, "ffmpeg");

        load_environment_variables(&mut config, env(&[("FFR_PRESET", "fast"), ("FFR_KEYFRAME_LIMIT", "8")]))
            .unwrap();
        assert_eq!(config.preset, "fast");
        assert_eq!(config.keyframe_limit, 8);

        let cli = Cli::parse_from(["ffr", "reencode", "--codec", "libx264", "a.mp4"]);
        apply_cli_configuration_overrides(&mut config, &cli.command);
        assert_eq!(config.codec, "libx264");
        assert_eq!(config.preset, "fast");
    }

    #[test]
    fn test_discovered_file_is_optional() {
        let dir = TempDir::new().unwrap();
        let adapter = TomlConfigAdapter::with_search_paths(vec![dir.path().join("none.toml")]);
        let mut config = FfrConfig::default();
        load_config_file(&mut config, &adapter, None).unwrap();
        assert_eq!(config, FfrConfig::default());
    }

    #[test]
    fn test_explicit_file_must_exist_and_parse() {
        let dir = TempDir::new().unwrap();
        let adapter = TomlConfigAdapter::with_search_paths(vec![]);
        let mut config = FfrConfig::default();

        let missing = dir.path().join("none.toml");
        assert!(matches!(
            load_config_file(&mut config, &adapter, Some(&missing)),
            Err(FfrError::Config { .. })
        ));

        let broken = dir.path().join("broken.toml");
        std::fs::write(&broken, "[ffr\n").unwrap();
        assert!(matches!(
            load_config_file(&mut config, &adapter, Some(&broken)),
            Err(FfrError::Config { .. })
        ));
    }

    #[test]
    fn test_bad_numeric_env_is_fatal() {
        let mut config = FfrConfig::default();
        let result = load_environment_variables(&mut config, env(&[("FFR_MAX_NAME_LENGTH", "wide")]));
        assert!(matches!(result, Err(FfrError::Config { .. })));
    }

    #[test]
    fn test_short_name_length_is_rejected() {
        let mut config = FfrConfig::default();
        let result = load_environment_variables(&mut config, env(&[("FFR_MAX_NAME_LENGTH", "8")]));
        assert!(matches!(result, Err(FfrError::Config { .. })));
        assert_eq!(config.max_name_length, 50);

        load_environment_variables(&mut config, env(&[("FFR_MAX_NAME_LENGTH", "16")])).unwrap();
        assert_eq!(config.max_name_length, 16);

        let dir = TempDir::new().unwrap();
        let file = dir.path().join("ffr.toml");
        std::fs::write(&file, "[ffr]\nmax_name_length = 8\n").unwrap();
        let mut config = FfrConfig::default();
        let result = load_config_file(&mut config, &TomlConfigAdapter::with_search_paths(vec![]), Some(&file));
        assert!(matches!(result, Err(FfrError::Config { .. })));
    }
}
