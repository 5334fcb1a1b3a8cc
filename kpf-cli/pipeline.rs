use std::path::{Path, PathBuf};

use image::{GrayImage, Rgb, RgbImage};
use kpf_core::{Keypoint, SizeFilter};
use kpf_detect::{Detector, ScaleSpaceDetector};
use log::info;

use crate::config::RunConfig;
use crate::display::show_image;
use crate::render::{draw_keypoints, DrawStyle};
use crate::{CliError, CliResult};

/// Title of the result window
pub const WINDOW_TITLE: &str = "Image with size-filtered keypoints";

/// Result of detect, filter and draw on one image
#[derive(Debug, Clone)]
pub struct Annotated {
    pub detected: usize,
    pub kept: Vec<Keypoint>,
    pub image: RgbImage,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RunSummary {
    pub width: u32,
    pub height: u32,
    pub detected: usize,
    pub kept: usize,
    pub saved_to: Option<PathBuf>,
}

/// Load an image from disk as 8-bit grayscale
pub fn load_grayscale<P: AsRef<Path>>(path: P) -> CliResult<GrayImage> {
    let path = path.as_ref();
    let img = image::open(path).map_err(|source| CliError::LoadImage {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(img.to_luma8())
}

/// Detect keypoints, keep those passing `filter` and draw them
pub fn process<D: Detector + ?Sized>(
    detector: &D,
    img: &GrayImage,
    filter: &SizeFilter,
    style: DrawStyle,
    color: Rgb<u8>,
) -> CliResult<Annotated> {
    let keypoints = detector.detect(img)?;
    let kept = filter.apply(&keypoints);
    info!(
        "Detected {} keypoints, kept {} with size > {}",
        keypoints.len(),
        kept.len(),
        filter.min_size
    );

    let image = draw_keypoints(img, &kept, color, style);
    Ok(Annotated {
        detected: keypoints.len(),
        kept,
        image,
    })
}

/// Run the whole pipeline described by `config` on the current rayon pool
pub fn run(config: &RunConfig) -> CliResult<RunSummary> {
    config.validate()?;

    let img = load_grayscale(&config.input)?;
    let (width, height) = img.dimensions();
    info!("Loaded {}x{} image from {}", width, height, config.input.display());

    let detector = ScaleSpaceDetector::new(config.detector.clone())?;
    let annotated = process(&detector, &img, &config.size_filter(), config.style, config.color)?;

    if let Some(path) = &config.output {
        annotated.image.save(path).map_err(|source| CliError::SaveImage {
            path: path.clone(),
            source,
        })?;
        info!("Saved annotated image to {}", path.display());
    }

    if config.display {
        show_image(WINDOW_TITLE, &annotated.image)?;
    }

    Ok(RunSummary {
        width,
        height,
        detected: annotated.detected,
        kept: annotated.kept.len(),
        saved_to: config.output.clone(),
    })
}
