//! Crop geometry: dimension presets, anchors and bounds checks

use std::path::{Path, PathBuf};

use crate::domain::errors::DomainError;
use crate::domain::model::{Dimensions, FileName};

/// Target size for a named preset
pub fn preset_dimensions(preset: &str) -> Option<Dimensions> {
    let (width, height) = match preset {
        "8k" | "4320p" => (7680, 4320),
        "4k" | "2160p" => (3840, 2160),
        "qhd" | "1440p" => (2560, 1440),
        "2k" => (2048, 1080),
        "fullhd" | "1080p" => (1920, 1080),
        "hd" | "720p" => (1280, 720),
        "540p" => (960, 540),
        "sd" | "480p" => (640, 480),
        _ => return None,
    };
    Some(Dimensions { width, height })
}

/// A requested crop before the source is known
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CropRequest {
    pub width: u32,
    pub height: u32,
    /// `left`, `center`, `right`, empty or a pixel offset
    pub x: String,
    /// `top`, `center`, `bottom`, empty or a pixel offset
    pub y: String,
    pub preset: Option<String>,
}

/// A crop window that fits its source
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CropWindow {
    pub width: u32,
    pub height: u32,
    pub x: u32,
    pub y: u32,
}

impl CropRequest {
    /// Target size after applying the preset, if any
    pub fn target(&self) -> Result<Dimensions, DomainError> {
        if let Some(preset) = self.preset.as_deref().filter(|p| !p.is_empty()) {
            return preset_dimensions(preset)
                .ok_or_else(|| DomainError::BadArgs(format!("unknown dimension preset: {}", preset)));
        }

        Dimensions::new(self.width, self.height)
    }

    /// Place the target inside a source of the given size
    pub fn window(&self, source: &Dimensions) -> Result<CropWindow, DomainError> {
        let target = self.target()?;
        if source.width < target.width || source.height < target.height {
            return Err(DomainError::InvalidDimensions(format!(
                "new dimensions: {}, old dimensions: {}",
                target, source
            )));
        }

        let x = anchor(&self.x, "left", "right", source.width, target.width)?;
        let y = anchor(&self.y, "top", "bottom", source.height, target.height)?;

        if x as u64 + target.width as u64 > source.width as u64
            || y as u64 + target.height as u64 > source.height as u64
        {
            return Err(DomainError::InvalidDimensions(format!(
                "new dimensions: {}, pos x: {}, pos y: {}, old dimensions: {}",
                target, x, y, source
            )));
        }

        Ok(CropWindow {
            width: target.width,
            height: target.height,
            x,
            y,
        })
    }
}

fn anchor(value: &str, start: &str, end: &str, source: u32, target: u32) -> Result<u32, DomainError> {
    match value {
        v if v == start => Ok(0),
        "center" | "" => Ok((source - target) / 2),
        v if v == end => Ok(source - target),
        v => v
            .parse::<u32>()
            .map_err(|_| DomainError::BadArgs(format!("wrong position: {:?}", v))),
    }
}

impl CropWindow {
    /// ffmpeg filter expression
    pub fn filter(&self) -> String {
        format!("crop={}:{}:{}:{}", self.width, self.height, self.x, self.y)
    }

    /// `<base>-<W>x<H><ext>` next to the input
    pub fn output_path(&self, input: &Path) -> PathBuf {
        let name = FileName::split(&input.to_string_lossy());
        let file_name = format!("{}-{}x{}{}", name.base, self.width, self.height, name.extension);
        match input.parent() {
            Some(dir) => dir.join(file_name),
            None => PathBuf::from(file_name),
        }
    }

    /// Encoder arguments cropping `input` into `output`
    pub fn args(&self, input: &Path, output: &Path) -> Vec<String> {
        vec![
            "-i".to_string(),
            input.to_string_lossy().into_owned(),
            "-filter:v".to_string(),
            self.filter(),
            output.to_string_lossy().into_owned(),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn source() -> Dimensions {
        Dimensions { width: 320, height: 240 }
    }

    fn request(x: &str, y: &str) -> CropRequest {
        CropRequest {
            width: 120,
            height: 80,
            x: x.to_string(),
            y: y.to_string(),
            preset: None,
        }
    }

    #[test]
    fn test_anchors() {
        let w = request("left", "top").window(&source()).unwrap();
        assert_eq!((w.x, w.y), (0, 0));

        let w = request("center", "").window(&source()).unwrap();
        assert_eq!((w.x, w.y), (100, 80));

        let w = request("right", "bottom").window(&source()).unwrap();
        assert_eq!((w.x, w.y), (200, 160));

        let w = request("10", "20").window(&source()).unwrap();
        assert_eq!((w.x, w.y), (10, 20));
    }

    #[test]
    fn test_bad_anchor() {
        assert!(matches!(
            request("middle", "top").window(&source()),
            Err(DomainError::BadArgs(_))
        ));
        assert!(matches!(
            request("top", "left").window(&source()),
            Err(DomainError::BadArgs(_))
        ));
    }

    #[test]
    fn test_window_must_fit() {
        assert!(matches!(
            request("250", "0").window(&source()),
            Err(DomainError::InvalidDimensions(_))
        ));
        assert!(matches!(
            request("0", "200").window(&source()),
            Err(DomainError::InvalidDimensions(_))
        ));
        // x is checked against the width, y against the height
        assert!(request("200", "0").window(&source()).is_ok());
    }

    #[test]
    fn test_target_larger_than_source() {
        let req = CropRequest {
            preset: Some("hd".to_string()),
            ..Default::default()
        };
        assert!(matches!(req.window(&source()), Err(DomainError::InvalidDimensions(_))));
    }

    #[test]
    fn test_zero_dimensions() {
        let req = CropRequest::default();
        assert!(matches!(req.target(), Err(DomainError::InvalidDimensions(_))));
    }

    #[test]
    fn test_presets() {
        assert_eq!(preset_dimensions("1080p"), Some(Dimensions { width: 1920, height: 1080 }));
        assert_eq!(preset_dimensions("2k"), Some(Dimensions { width: 2048, height: 1080 }));
        assert_eq!(preset_dimensions("huge"), None);

        let req = CropRequest {
            width: 1,
            height: 1,
            preset: Some("sd".to_string()),
            ..Default::default()
        };
        assert_eq!(req.target().unwrap(), Dimensions { width: 640, height: 480 });
    }

    #[test]
    fn test_output_and_args() {
        let w = request("left", "top").window(&source()).unwrap();
        let output = w.output_path(Path::new("dir/foo.mp4"));
        assert_eq!(output, PathBuf::from("dir/foo-120x80.mp4"));
        assert_eq!(
            w.args(Path::new("dir/foo.mp4"), &output),
            vec!["-i", "dir/foo.mp4", "-filter:v", "crop=120:80:0:0", "dir/foo-120x80.mp4"]
        );
    }
}
