use std::path::PathBuf;

use clap::Parser;
use image::Rgb;
use kpf_core::SizeThreshold;
use kpf_detect::DetectorConfig;

use crate::config::{RunConfig, RunConfigFile};
use crate::render::DrawStyle;
use crate::{CliError, CliResult};

/// Detect keypoints, keep those whose size is strictly greater than
/// --min-size, draw them and show the result until a key is pressed
#[derive(Debug, Clone, Default, PartialEq, Parser)]
#[command(name = "kpf", version)]
pub struct CliArgs {
    /// Image to process
    pub input: Option<PathBuf>,

    /// Size threshold (required unless set in --config)
    #[arg(long, value_name = "VALUE", allow_negative_numbers = true)]
    pub min_size: Option<SizeThreshold>,

    /// TOML or JSON run configuration
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Also write the annotated image to FILE
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Marker style [default: rich]
    #[arg(long, value_enum)]
    pub style: Option<DrawStyle>,

    /// Marker color as r,g,b [default: 0,255,0]
    #[arg(long, value_name = "R,G,B", value_parser = parse_color)]
    pub color: Option<Rgb<u8>>,

    /// Keep at most N detector keypoints
    #[arg(long, value_name = "N")]
    pub max_features: Option<usize>,

    /// Detector preset: default, dense, sparse
    #[arg(long, value_name = "NAME", value_parser = parse_preset)]
    pub preset: Option<DetectorConfig>,

    /// Do not open a window
    #[arg(long)]
    pub no_display: bool,
}

impl CliArgs {
    /// Merge with an optional config file; command-line values win
    pub fn resolve(self, file: Option<RunConfigFile>) -> CliResult<RunConfig> {
        let mut file = file.unwrap_or_default();

        if let Some(input) = self.input {
            file.input = Some(input);
        }
        if let Some(t) = self.min_size {
            file.min_size = Some(t.value());
        }
        if file.input.is_none() {
            return Err(CliError::Usage("Missing <INPUT> image (see --help)".to_string()));
        }
        if file.min_size.is_none() {
            return Err(CliError::Usage("Missing --min-size (see --help)".to_string()));
        }

        let mut config = RunConfig::from_file(file)?;

        if let Some(output) = self.output {
            config.output = Some(output);
        }
        if let Some(style) = self.style {
            config.style = style;
        }
        if let Some(color) = self.color {
            config.color = color;
        }
        if let Some(preset) = self.preset {
            config.detector = preset;
        }
        if let Some(n) = self.max_features {
            config.detector.max_features = Some(n);
        }
        if self.no_display {
            config.display = false;
        }

        config.validate()?;
        Ok(config)
    }
}

/// Parse `r,g,b` with each channel in 0-255
pub fn parse_color(text: &str) -> Result<Rgb<u8>, String> {
    let invalid = || format!("invalid color '{}' (expected r,g,b)", text);
    let channels: Vec<u8> = text
        .split(',')
        .map(|c| c.trim().parse::<u8>())
        .collect::<Result<_, _>>()
        .map_err(|_| invalid())?;

    match channels.as_slice() {
        &[r, g, b] => Ok(Rgb([r, g, b])),
        _ => Err(invalid()),
    }
}

fn parse_preset(name: &str) -> Result<DetectorConfig, String> {
    DetectorConfig::preset(name)
        .ok_or_else(|| format!("unknown preset '{}' (expected default, dense or sparse)", name))
}
