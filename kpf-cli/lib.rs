use std::path::PathBuf;

use kpf_detect::DetectError;

pub mod args;
pub mod config;
pub mod display;
pub mod pipeline;
pub mod render;

pub use args::CliArgs;
pub use config::{RunConfig, RunConfigFile};
pub use display::DisplayWindow;
pub use pipeline::{process, run, Annotated, RunSummary};
pub use render::{draw_keypoints, DrawStyle};

pub use kpf_core::{self, filter_by_size, Keypoint, SizeFilter, SizeThreshold};
pub use kpf_detect::{self, Detector, DetectorConfig, ScaleSpaceDetector};

#[derive(Debug)]
pub enum CliError {
    LoadImage { path: PathBuf, source: image::ImageError },
    SaveImage { path: PathBuf, source: image::ImageError },
    Display(String),
    Detect(DetectError),
    Config(String),
    Usage(String),
}

impl std::fmt::Display for CliError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CliError::LoadImage { path, source } => {
                write!(f, "Failed to load image {}: {}", path.display(), source)
            }
            CliError::SaveImage { path, source } => {
                write!(f, "Failed to save image {}: {}", path.display(), source)
            }
            CliError::Display(msg) => write!(f, "Display error: {}", msg),
            CliError::Detect(e) => write!(f, "Detector error: {}", e),
            CliError::Config(msg) => write!(f, "Config error: {}", msg),
            CliError::Usage(msg) => write!(f, "{}", msg),
        }
    }
}

impl std::error::Error for CliError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CliError::LoadImage { source, .. } | CliError::SaveImage { source, .. } => Some(source),
            CliError::Detect(e) => Some(e),
            _ => None,
        }
    }
}

impl From<DetectError> for CliError {
    fn from(err: DetectError) -> Self {
        CliError::Detect(err)
    }
}

impl From<minifb::Error> for CliError {
    fn from(err: minifb::Error) -> Self {
        CliError::Display(err.to_string())
    }
}

pub type CliResult<T> = Result<T, CliError>;
