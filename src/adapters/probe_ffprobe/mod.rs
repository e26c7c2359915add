//! FFprobe adapter for media file probing
//!
//! Runs the `ffprobe` binary once per question and parses its JSON or CSV output.

use std::path::Path;
use std::process::Command;

use serde::Deserialize;
use tracing::debug;

use crate::domain::errors::*;
use crate::domain::model::*;
use crate::ports::*;

/// FFprobe-based probe adapter
pub struct FFprobeAdapter {
    program: String,
}

#[derive(Debug, Deserialize)]
struct ProbeOutput {
    #[serde(default)]
    streams: Vec<ProbeStream>,
    format: Option<ProbeFormat>,
}

#[derive(Debug, Deserialize)]
struct ProbeStream {
    width: Option<u32>,
    height: Option<u32>,
    codec_name: Option<String>,
    bit_rate: Option<String>,
    r_frame_rate: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ProbeFormat {
    duration: Option<String>,
}

impl FFprobeAdapter {
    /// Create new FFprobe adapter running `program`
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }

    fn run(&self, args: &[&str], file_path: &Path) -> Result<String, DomainError> {
        let output = Command::new(&self.program)
            .args(args)
            .arg(file_path)
            .output()
            .map_err(|e| {
                DomainError::ProbeFailed(format!("failed to start {}: {}", self.program, e))
            })?;

        if !output.status.success() {
            return Err(DomainError::ProbeFailed(format!(
                "{} failed on {}: {}",
                self.program,
                file_path.display(),
                String::from_utf8_lossy(&output.stderr).trim()
            )));
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}

/// Turn `30000/1001` or `25` into frames per second
pub fn parse_frame_rate(raw: &str) -> Result<f64, DomainError> {
    let wrong = || DomainError::ParseFailed(format!("invalid frame rate: {:?}", raw));

    match raw.trim().split_once('/') {
        Some((num, den)) => {
            let num: f64 = num.parse().map_err(|_| wrong())?;
            let den: f64 = den.parse().map_err(|_| wrong())?;
            if den == 0.0 {
                return Ok(0.0);
            }
            Ok(num / den)
        }
        None => raw.trim().parse().map_err(|_| wrong()),
    }
}

/// Parse the JSON printed by `ffprobe -of json` for the first video stream
pub fn parse_probe_output(json: &str) -> Result<VideoInfo, DomainError> {
    let output: ProbeOutput = serde_json::from_str(json)
        .map_err(|e| DomainError::ProbeFailed(format!("invalid ffprobe output: {}", e)))?;

    let stream = output
        .streams
        .into_iter()
        .next()
        .ok_or_else(|| DomainError::ProbeFailed("no video stream found".to_string()))?;

    let bit_rate = match stream.bit_rate.as_deref() {
        None | Some("N/A") => 0,
        Some(raw) => raw
            .parse()
            .map_err(|_| DomainError::ParseFailed(format!("invalid bit rate: {:?}", raw)))?,
    };

    let frame_rate = match stream.r_frame_rate.as_deref() {
        Some(raw) => parse_frame_rate(raw)?,
        None => 0.0,
    };

    let duration = match output.format.and_then(|f| f.duration) {
        Some(raw) if raw != "N/A" => raw
            .parse()
            .map_err(|_| DomainError::ParseFailed(format!("invalid duration: {:?}", raw)))?,
        _ => 0.0,
    };

    Ok(VideoInfo {
        width: stream.width.unwrap_or_default(),
        height: stream.height.unwrap_or_default(),
        duration,
        frame_rate,
        bit_rate,
        codec: stream.codec_name.unwrap_or_default(),
    })
}

/// Parse `pts_time,flags` CSV lines, keeping the first `limit` keyframes
pub fn parse_keyframes(csv: &str, limit: usize) -> Result<Vec<f64>, DomainError> {
    csv.lines()
        .filter_map(|line| line.trim().split_once(','))
        .filter(|(_, flags)| flags.contains('K'))
        .filter(|(time, _)| !time.is_empty())
        .take(limit)
        .map(|(time, _)| {
            time.parse::<f64>()
                .map_err(|_| DomainError::ParseFailed(format!("invalid packet time: {:?}", time)))
        })
        .collect()
}

impl ProbePort for FFprobeAdapter {
    fn probe(&self, file_path: &Path) -> Result<VideoInfo, DomainError> {
        let json = self.run(
            &[
                "-v",
                "error",
                "-select_streams",
                "v:0",
                "-show_entries",
                "stream=width,height,codec_name,bit_rate,r_frame_rate:format=duration",
                "-of",
                "json",
            ],
            file_path,
        )?;
        debug!(file = %file_path.display(), "probed");

        parse_probe_output(&json)
    }

    fn keyframes(&self, file_path: &Path, limit: usize) -> Result<Vec<f64>, DomainError> {
        let csv = self.run(
            &[
                "-loglevel",
                "error",
                "-select_streams",
                "v:0",
                "-show_entries",
                "packet=pts_time,flags",
                "-of",
                "csv=print_section=0",
            ],
            file_path,
        )?;

        parse_keyframes(&csv, limit)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_frame_rate() {
        assert_eq!(parse_frame_rate("30/1").unwrap(), 30.0);
        assert!((parse_frame_rate("30000/1001").unwrap() - 29.97).abs() < 0.01);
        assert_eq!(parse_frame_rate("25").unwrap(), 25.0);
        assert_eq!(parse_frame_rate("0/0").unwrap(), 0.0);
        assert!(parse_frame_rate("x/1").is_err());
    }

    #[test]
    fn test_parse_probe_output() {
        let json = r#"{
            "programs": [],
            "streams": [
                {"width": 1920, "height": 1080, "codec_name": "h264",
                 "r_frame_rate": "30/1", "bit_rate": "4000000"}
            ],
            "format": {"duration": "12.500000"}
        }"#;

        let info = parse_probe_output(json).unwrap();
        assert_eq!(info.width, 1920);
        assert_eq!(info.height, 1080);
        assert_eq!(info.codec, "h264");
        assert_eq!(info.frame_rate, 30.0);
        assert_eq!(info.bit_rate, 4_000_000);
        assert_eq!(info.duration, 12.5);
    }

    #[test]
    fn test_parse_probe_output_missing_bit_rate() {
        let json = r#"{"streams": [{"width": 320, "height": 240, "codec_name": "vp9",
            "r_frame_rate": "25/1", "bit_rate": "N/A"}], "format": {}}"#;

        let info = parse_probe_output(json).unwrap();
        assert_eq!(info.bit_rate, 0);
        assert_eq!(info.duration, 0.0);
    }

    #[test]
    fn test_parse_probe_output_no_stream() {
        let result = parse_probe_output(r#"{"streams": []}"#);
        assert!(matches!(result, Err(DomainError::ProbeFailed(_))));
    }

    #[test]
    fn test_parse_keyframes() {
        let csv = "0.000000,K__\n0.033333,___\n2.000000,K__\n4.000000,K_\n6.000000,K__\n8.000000,K__\n";
        assert_eq!(parse_keyframes(csv, 4).unwrap(), vec![0.0, 2.0, 4.0, 6.0]);
        assert_eq!(parse_keyframes(csv, 1).unwrap(), vec![0.0]);
        assert!(parse_keyframes("", 4).unwrap().is_empty());
    }
}
