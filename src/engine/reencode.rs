//! Re-encoding parameters: codec profiles, bit rate heuristic and output naming

use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use tracing::debug;

use crate::domain::errors::DomainError;
use crate::domain::model::{FileName, VideoInfo};
use crate::utils::human;

pub const VIDEO_CODEC_KEY: &str = "-c:v";
pub const AUDIO_CODEC_KEY: &str = "-c:a";
pub const CRF_KEY: &str = "-crf";
pub const BIT_RATE_KEY: &str = "-b:v";
pub const MAX_RATE_KEY: &str = "-maxrate";
pub const BUFSIZE_KEY: &str = "-bufsize";
pub const PRESET_KEY: &str = "-preset";
pub const LOSSLESS_KEY: &str = "-lossless";
pub const HWACCEL_KEY: &str = "-hwaccel";
pub const HWACCEL_DEVICE_KEY: &str = "-hwaccel_device";
pub const INPUT_KEY: &str = "-i";

/// Keys whose values make up the output label, in label order
const LABEL_KEYS: [&str; 5] = [VIDEO_CODEC_KEY, HWACCEL_KEY, CRF_KEY, LOSSLESS_KEY, PRESET_KEY];
/// Keys rendered by name instead of value in the label
const FLAG_KEYS: [&str; 1] = [LOSSLESS_KEY];

/// Presets accepted by the x264 and x265 encoders
pub const PRESETS: [&str; 9] = [
    "ultrafast",
    "superfast",
    "veryfast",
    "faster",
    "fast",
    "medium",
    "slow",
    "slower",
    "veryslow",
];

/// Hardware acceleration that swaps in a dedicated encoder
pub const QSV: &str = "qsv";

/// Supported target codecs
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Codec {
    X264,
    X265,
    Vp9,
}

impl Codec {
    /// Encoder name handed to `-c:v`
    pub fn encoder(&self) -> &'static str {
        match self {
            Codec::X264 => "libx264",
            Codec::X265 => "libx265",
            Codec::Vp9 => "vp9",
        }
    }

    /// Quick Sync encoder replacing the software one
    pub fn qsv_encoder(&self) -> &'static str {
        match self {
            Codec::X264 => "h264_qsv",
            Codec::X265 => "hevc_qsv",
            Codec::Vp9 => "vp9_qsv",
        }
    }

    /// CRF used when none is requested, `None` for lossless
    pub fn default_crf(&self) -> Option<u8> {
        match self {
            Codec::X264 => Some(20),
            Codec::X265 => Some(23),
            Codec::Vp9 => None,
        }
    }

    /// Container of the encoded file
    pub fn container(&self) -> &'static str {
        match self {
            Codec::Vp9 => "mkv",
            _ => "mp4",
        }
    }
}

impl FromStr for Codec {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "libx264" => Ok(Codec::X264),
            "libx265" => Ok(Codec::X265),
            "vp9" => Ok(Codec::Vp9),
            other => Err(DomainError::UnsupportedCodec(format!(
                "{} (supported: libx264, libx265, vp9)",
                other
            ))),
        }
    }
}

impl fmt::Display for Codec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.encoder())
    }
}

/// Check a preset name against [`PRESETS`]
pub fn find_preset(preset: &str) -> Result<&str, DomainError> {
    PRESETS
        .iter()
        .find(|p| **p == preset)
        .copied()
        .ok_or_else(|| DomainError::BadArgs(format!("invalid preset: {}", preset)))
}

/// Ordered encoder parameters.
///
/// Setting an existing key keeps its position, deleting removes it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EncodeParams {
    params: Vec<(String, String)>,
}

impl EncodeParams {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, key: &str, value: impl Into<String>) -> &mut Self {
        let value = value.into();
        match self.params.iter_mut().find(|(k, _)| k == key) {
            Some(entry) => entry.1 = value,
            None => self.params.push((key.to_string(), value)),
        }
        self
    }

    pub fn delete(&mut self, key: &str) -> &mut Self {
        self.params.retain(|(k, _)| k != key);
        self
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.params
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.params.iter().map(|(k, _)| k.as_str())
    }

    /// Short description of the encode used in the output name, e.g. `libx265-23-ultrafast`
    pub fn label(&self) -> String {
        LABEL_KEYS
            .iter()
            .filter_map(|key| {
                self.get(key).map(|value| {
                    if FLAG_KEYS.contains(key) {
                        key.trim_start_matches('-').to_string()
                    } else {
                        value.to_string()
                    }
                })
            })
            .collect::<Vec<_>>()
            .join("-")
    }

    /// Flattened argument list followed by the output path
    pub fn to_args(&self, output: &Path) -> Vec<String> {
        let mut args: Vec<String> = self
            .params
            .iter()
            .flat_map(|(k, v)| [k.clone(), v.clone()])
            .collect();
        args.push(output.to_string_lossy().into_owned());
        args
    }
}

/// What the user asked the re-encode to do
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReencodeSettings {
    pub codec: Codec,
    /// 0 picks the codec default
    pub crf: u8,
    pub preset: String,
    pub hwaccel: Option<String>,
    pub hwaccel_device: Option<String>,
    pub replace_file: bool,
}

impl ReencodeSettings {
    /// Settings for `codec` with its default quality and the fastest preset
    pub fn new(codec: Codec) -> Self {
        Self {
            codec,
            crf: 0,
            preset: "ultrafast".to_string(),
            hwaccel: None,
            hwaccel_device: None,
            replace_file: false,
        }
    }

    pub fn with_crf(mut self, crf: u8) -> Self {
        self.crf = crf;
        self
    }

    pub fn with_preset(mut self, preset: impl Into<String>) -> Self {
        self.preset = preset.into();
        self
    }

    pub fn with_hwaccel(mut self, hwaccel: Option<String>, device: Option<String>) -> Self {
        self.hwaccel = hwaccel.filter(|h| !h.is_empty());
        self.hwaccel_device = device.filter(|d| !d.is_empty());
        self
    }

    pub fn with_replace_file(mut self, replace_file: bool) -> Self {
        self.replace_file = replace_file;
        self
    }

    /// Bit rate flags are only added when a hardware encoder is requested
    pub fn needs_bit_rate(&self) -> bool {
        self.hwaccel.is_some()
    }

    /// Encoder parameters for `input`, without bit rate flags
    pub fn params(&self, input: &str) -> Result<EncodeParams, DomainError> {
        let mut params = EncodeParams::new();
        params.set(HWACCEL_KEY, "auto");
        if let Some(device) = &self.hwaccel_device {
            params.set(HWACCEL_DEVICE_KEY, device.as_str());
        }
        params
            .set(INPUT_KEY, input)
            .set(CRF_KEY, self.crf.to_string())
            .set(PRESET_KEY, self.preset.as_str());

        match self.codec {
            Codec::X264 | Codec::X265 => {
                let crf = match self.crf {
                    0 => self.codec.default_crf().unwrap_or_default(),
                    crf => crf,
                };
                let preset = find_preset(&self.preset)?;
                let params_key = match self.codec {
                    Codec::X265 => "-x265-params",
                    _ => "-x264-params",
                };

                params
                    .delete(CRF_KEY)
                    .set(VIDEO_CODEC_KEY, self.codec.encoder())
                    .set(params_key, "keyint=1")
                    .set(PRESET_KEY, preset)
                    .set(CRF_KEY, crf.to_string())
                    .set(AUDIO_CODEC_KEY, "copy");
                if self.codec == Codec::X265 {
                    params.set("-tag:v", "hvc1");
                }
            }
            Codec::Vp9 => {
                params
                    .delete(PRESET_KEY)
                    .delete(CRF_KEY)
                    .set(VIDEO_CODEC_KEY, self.codec.encoder())
                    .set("-g", "1")
                    .set(CRF_KEY, self.crf.to_string())
                    .set(AUDIO_CODEC_KEY, "copy");
                if self.crf == 0 {
                    params.delete(CRF_KEY).set(LOSSLESS_KEY, "1");
                }
            }
        }

        match self.hwaccel.as_deref() {
            Some(QSV) => {
                params
                    .delete(PRESET_KEY)
                    .delete(CRF_KEY)
                    .set(VIDEO_CODEC_KEY, self.codec.qsv_encoder());
            }
            _ => {
                params.delete(HWACCEL_KEY).delete(HWACCEL_DEVICE_KEY);
            }
        }

        debug!(label = %params.label(), "encoder parameters");
        Ok(params)
    }
}

/// Target bit rate for re-encoding `source` with `codec`, in bits per second.
///
/// An unknown source rate is estimated from the picture size and frame rate. HEVC needs
/// roughly 60% of the rate of older codecs.
pub fn target_bit_rate(source: &VideoInfo, codec: Codec) -> u64 {
    let mut rate = source.bit_rate;
    if rate == 0 {
        rate = source.width as u64 * source.height as u64 / 10 * source.frame_rate as u64;
    }

    if codec == Codec::X265 && source.codec != "hevc" {
        rate = rate * 6 / 10;
    }

    rate
}

/// Add `-b:v`, `-maxrate` and `-bufsize` for a target rate
pub fn apply_bit_rate(params: &mut EncodeParams, rate: u64) {
    let max = human(rate.saturating_mul(2), "", "");
    params
        .set(BIT_RATE_KEY, human(rate, "", ""))
        .set(MAX_RATE_KEY, max.as_str())
        .set(BUFSIZE_KEY, max);
}

/// First free output path `<base>-<label>.<ext>`, then `<base>-<label><i>.<ext>` for i = 1, 2, ...
pub fn output_path(
    input: &Path,
    params: &EncodeParams,
    container: &str,
    exists: impl Fn(&Path) -> bool,
) -> PathBuf {
    let name = FileName::split(&input.to_string_lossy());
    let label = params.label();
    let dir = input.parent().unwrap_or_else(|| Path::new(""));

    let mut candidate = dir.join(format!("{}-{}.{}", name.base, label, container));
    let mut i = 1;
    while exists(&candidate) {
        debug!(path = %candidate.display(), "file exists");
        candidate = dir.join(format!("{}-{}{}.{}", name.base, label, i, container));
        i += 1;
    }
    candidate
}

/// Where the original goes when the encode replaces it
pub fn backup_path(input: &Path, container: &str) -> PathBuf {
    let name = FileName::split(&input.to_string_lossy());
    let dir = input.parent().unwrap_or_else(|| Path::new(""));
    dir.join(format!("{}-backup.{}", name.base, container))
}
