use std::path::{Path, PathBuf};

use image::Rgb;
use kpf_core::SizeFilter;
use kpf_detect::DetectorConfig;
use serde::{Deserialize, Serialize};

use crate::render::DrawStyle;
use crate::{CliError, CliResult};

/// Marker color used when neither the file nor the command line sets one
pub const DEFAULT_COLOR: [u8; 3] = [0, 255, 0];

/// Run settings as written in a TOML or JSON file; every field is optional
/// so the command line can fill the gaps
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RunConfigFile {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub input: Option<PathBuf>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output: Option<PathBuf>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_size: Option<f32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub style: Option<DrawStyle>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<[u8; 3]>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub detector: Option<DetectorConfig>,
}

impl RunConfigFile {
    /// Load from disk; `.json` files are parsed as JSON, everything else as TOML
    pub fn load<P: AsRef<Path>>(path: P) -> CliResult<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .map_err(|e| CliError::Config(format!("{}: {}", path.display(), e)))?;

        let is_json = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));

        let parsed = if is_json { Self::from_json(&content) } else { Self::from_toml(&content) };
        parsed.map_err(|e| match e {
            CliError::Config(msg) => CliError::Config(format!("{}: {}", path.display(), msg)),
            other => other,
        })
    }

    pub fn from_toml(text: &str) -> CliResult<Self> {
        let file: Self = toml::from_str(text).map_err(|e| CliError::Config(e.to_string()))?;
        file.validate()?;
        Ok(file)
    }

    pub fn from_json(text: &str) -> CliResult<Self> {
        let file: Self = serde_json::from_str(text).map_err(|e| CliError::Config(e.to_string()))?;
        file.validate()?;
        Ok(file)
    }

    pub fn to_toml(&self) -> CliResult<String> {
        toml::to_string_pretty(self).map_err(|e| CliError::Config(e.to_string()))
    }

    fn validate(&self) -> CliResult<()> {
        if let Some(detector) = &self.detector {
            detector.validate()?;
        }
        Ok(())
    }
}

/// Fully resolved settings for one run
#[derive(Debug, Clone, PartialEq)]
pub struct RunConfig {
    pub input: PathBuf,
    pub output: Option<PathBuf>,
    /// Keypoints must be strictly larger than this to be kept
    pub min_size: f32,
    pub style: DrawStyle,
    pub color: Rgb<u8>,
    pub display: bool,
    pub detector: DetectorConfig,
}

impl RunConfig {
    /// Settings for `input` with every optional part at its default
    pub fn new<P: Into<PathBuf>>(input: P, min_size: f32) -> Self {
        Self {
            input: input.into(),
            output: None,
            min_size,
            style: DrawStyle::default(),
            color: Rgb(DEFAULT_COLOR),
            display: true,
            detector: DetectorConfig::default(),
        }
    }

    /// Resolve a file into run settings; input and threshold must both be present
    pub fn from_file(file: RunConfigFile) -> CliResult<Self> {
        let input = file
            .input
            .ok_or_else(|| CliError::Config("no input image given".to_string()))?;
        let min_size = file
            .min_size
            .ok_or_else(|| CliError::Config("no size threshold given (min_size)".to_string()))?;

        let config = Self {
            input,
            output: file.output,
            min_size,
            style: file.style.unwrap_or_default(),
            color: Rgb(file.color.unwrap_or(DEFAULT_COLOR)),
            display: file.display.unwrap_or(true),
            detector: file.detector.unwrap_or_default(),
        };
        config.validate()?;
        Ok(config)
    }

    pub fn size_filter(&self) -> SizeFilter {
        SizeFilter::new(self.min_size)
    }

    pub fn validate(&self) -> CliResult<()> {
        if self.input.as_os_str().is_empty() {
            return Err(CliError::Config("input path is empty".to_string()));
        }
        self.detector.validate()?;
        Ok(())
    }
}
