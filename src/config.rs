use std::path::Path;

use anyhow::Context as _;

use crate::codec::still::OutputFormat;
use crate::foundation::core::Axis;
use crate::foundation::error::{FramecutError, FramecutResult};
use crate::slice::slicer::FrameFinish;
use crate::slice::spec::SliceParams;

/// Everything needed to slice one or many sheets and write the frames out.
///
/// Loadable from JSON, e.g. `{"frame_width": 48, "direction": "h", "padding": 2}`.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SliceJob {
    #[serde(default)]
    pub frame_width: Option<u32>,
    #[serde(default)]
    pub frame_height: Option<u32>,
    #[serde(default)]
    pub slices: Option<u32>,
    #[serde(default)]
    pub direction: Axis,
    #[serde(default = "default_auto_detect")]
    pub auto_detect: bool,
    #[serde(default)]
    pub padding: u32,
    #[serde(default)]
    pub resize: Option<[u32; 2]>,
    #[serde(default)]
    pub format: OutputFormat,
    #[serde(default = "default_quality")]
    pub quality: u8,
}

fn default_auto_detect() -> bool {
    true
}

fn default_quality() -> u8 {
    90
}

impl Default for SliceJob {
    fn default() -> Self {
        Self {
            frame_width: None,
            frame_height: None,
            slices: None,
            direction: Axis::default(),
            auto_detect: default_auto_detect(),
            padding: 0,
            resize: None,
            format: OutputFormat::default(),
            quality: default_quality(),
        }
    }
}

impl SliceJob {
    pub fn from_json_str(s: &str) -> FramecutResult<Self> {
        serde_json::from_str(s)
            .map_err(|e| FramecutError::configuration(format!("parse slice job JSON: {e}")))
    }

    pub fn from_path(path: &Path) -> FramecutResult<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("read slice job '{}'", path.display()))?;
        Self::from_json_str(&text)
    }

    pub fn params(&self) -> SliceParams {
        SliceParams {
            frame_width: self.frame_width,
            frame_height: self.frame_height,
            count: self.slices,
            axis: self.direction,
            auto_detect: self.auto_detect,
        }
    }

    pub fn finish(&self) -> FrameFinish {
        FrameFinish {
            padding: self.padding,
            resize: self.resize.map(|[w, h]| (w, h)),
        }
    }

    /// Every configuration check, run before any file is opened.
    pub fn validate(&self) -> FramecutResult<()> {
        self.params().validate()?;
        self.finish().validate()?;
        if !(1..=100).contains(&self.quality) {
            return Err(FramecutError::configuration(format!(
                "quality must be in 1..=100, got {}",
                self.quality
            )));
        }
        Ok(())
    }
}

/// Parse `"48"` into `(48, None)` and `"48x32"` into `(48, Some(32))`.
pub fn parse_dimensions(s: &str) -> FramecutResult<(u32, Option<u32>)> {
    let bad = || FramecutError::configuration(format!("invalid dimensions '{s}'"));
    let lower = s.trim().to_ascii_lowercase();
    let (w, h) = match lower.split_once('x') {
        Some((w, h)) => (w, Some(h)),
        None => (lower.as_str(), None),
    };
    let w: u32 = w.trim().parse().map_err(|_| bad())?;
    let h = h
        .map(|h| h.trim().parse::<u32>().map_err(|_| bad()))
        .transpose()?;
    if w == 0 || h == Some(0) {
        return Err(FramecutError::configuration(format!(
            "dimensions must be non-zero, got '{s}'"
        )));
    }
    Ok((w, h))
}

/// Parse `"WIDTHxHEIGHT"`, requiring both parts.
pub fn parse_size(s: &str) -> FramecutResult<(u32, u32)> {
    match parse_dimensions(s)? {
        (w, Some(h)) => Ok((w, h)),
        (_, None) => Err(FramecutError::configuration(format!(
            "expected WIDTHxHEIGHT, got '{s}'"
        ))),
    }
}

#[cfg(test)]
#[path = "../tests/unit/config.rs"]
mod tests;
