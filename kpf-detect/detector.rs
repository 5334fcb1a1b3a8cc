use image::GrayImage;
use kpf_core::Keypoint;
use log::debug;
use rayon::prelude::*;

use crate::config::DetectorConfig;
use crate::corners::CornerDetector;
use crate::error::{DetectError, DetectResult};
use crate::pyramid::ImagePyramid;
use crate::refinement::KeypointRefinement;
use crate::types::ScaleLevel;

/// Anything that turns a grayscale image into keypoints
pub trait Detector {
    fn detect(&self, img: &GrayImage) -> DetectResult<Vec<Keypoint>>;
}

/// Multi-scale FAST detector with intensity-centroid orientation.
///
/// Keypoint `size` is `patch_size * scale` of the level it was found on, so
/// coarser levels report larger features.
#[derive(Debug, Clone)]
pub struct ScaleSpaceDetector {
    cfg: DetectorConfig,
}

impl ScaleSpaceDetector {
    /// Creates a new detector with validation
    pub fn new(cfg: DetectorConfig) -> DetectResult<Self> {
        cfg.validate()?;
        Ok(Self { cfg })
    }

    pub fn config(&self) -> &DetectorConfig {
        &self.cfg
    }

    /// Scale levels this detector would scan for an image of the given size
    pub fn scale_levels(&self, width: u32, height: u32) -> Vec<ScaleLevel> {
        ImagePyramid::generate_scale_levels(
            width,
            height,
            self.cfg.n_levels,
            self.cfg.scale_factor,
            self.cfg.min_level_dim(),
        )
    }

    fn validate_image(&self, img: &GrayImage) -> DetectResult<()> {
        let (width, height) = img.dimensions();
        if width == 0 || height == 0 {
            return Err(DetectError::InvalidImageSize { width, height });
        }
        let min_size = self.cfg.min_level_dim();
        if width < min_size || height < min_size {
            return Err(DetectError::ImageTooSmall { width, height, min_size });
        }
        Ok(())
    }

    /// Detect, suppress and orient keypoints on one level, in base-image coordinates
    fn detect_at_scale(&self, img: &GrayImage, scale_level: &ScaleLevel) -> Vec<Keypoint> {
        let corners = CornerDetector::detect(
            img,
            self.cfg.fast_threshold,
            self.cfg.fast_n,
            self.cfg.edge_border as u32,
        );
        let suppressed = KeypointRefinement::non_maximum_suppression(&corners, self.cfg.nms_radius);

        debug!(
            "level {} ({}x{}, scale {:.3}): {} corners, {} after NMS",
            scale_level.level,
            scale_level.width,
            scale_level.height,
            scale_level.scale,
            corners.len(),
            suppressed.len()
        );

        let size = self.cfg.patch_size as f32 * scale_level.scale;
        suppressed
            .into_iter()
            .map(|c| {
                let angle = KeypointRefinement::compute_orientation(img, c.x, c.y, self.cfg.patch_size);
                Keypoint::new(c.x as f32 * scale_level.scale, c.y as f32 * scale_level.scale, size)
                    .with_angle(angle)
                    .with_response(c.response)
                    .with_octave(scale_level.level as i32)
            })
            .collect()
    }

    /// Keep the `max` strongest keypoints; equal responses keep detection order
    fn retain_strongest(keypoints: &mut Vec<Keypoint>, max: usize) {
        if keypoints.len() <= max {
            return;
        }
        keypoints.sort_by(|a, b| b.response.total_cmp(&a.response));
        keypoints.truncate(max);
    }
}

impl Detector for ScaleSpaceDetector {
    fn detect(&self, img: &GrayImage) -> DetectResult<Vec<Keypoint>> {
        self.validate_image(img)?;

        let (width, height) = img.dimensions();
        let levels = self.scale_levels(width, height);
        let pyramid = ImagePyramid::build_image_pyramid(img, &levels);

        let mut keypoints: Vec<Keypoint> = levels
            .par_iter()
            .zip(pyramid.par_iter())
            .map(|(scale_level, level_img)| self.detect_at_scale(level_img, scale_level))
            .collect::<Vec<_>>()
            .into_iter()
            .flatten()
            .collect();

        if let Some(max) = self.cfg.max_features {
            Self::retain_strongest(&mut keypoints, max);
        }

        debug!("{} keypoints over {} levels", keypoints.len(), levels.len());
        Ok(keypoints)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::DetectorBuilder;
    use image::Luma;

    fn small_detector() -> ScaleSpaceDetector {
        DetectorBuilder::new()
            .patch_size(7)
            .edge_border(4)
            .levels(3)
            .scale_factor(1.5)
            .threads(1)
            .build()
            .unwrap()
    }

    fn corner_image(width: u32, height: u32) -> GrayImage {
        let mut img = GrayImage::from_pixel(width, height, Luma([50]));
        let corners = [(width / 4, height / 4), (3 * width / 4, height / 4), (width / 2, 2 * height / 3)];
        for &(cx, cy) in &corners {
            for y in cy - 4..=cy + 4 {
                for x in cx - 4..=cx + 4 {
                    img.put_pixel(x, y, Luma([255]));
                }
            }
        }
        img
    }

    #[test]
    fn test_uniform_image_has_no_keypoints() {
        let img = GrayImage::from_pixel(64, 64, Luma([128]));
        assert!(small_detector().detect(&img).unwrap().is_empty());
    }

    #[test]
    fn test_detects_squares() {
        let img = corner_image(96, 96);
        let kps = small_detector().detect(&img).unwrap();
        assert!(!kps.is_empty());
    }

    #[test]
    fn test_keypoint_metadata() {
        let det = small_detector();
        let img = corner_image(96, 96);
        for kp in det.detect(&img).unwrap() {
            assert!(kp.size > 0.0);
            assert!(kp.octave >= 0 && (kp.octave as usize) < det.config().n_levels);
            assert!((0.0..360.0).contains(&kp.angle), "angle {}", kp.angle);
            assert!(kp.response > 0.0);
            assert!(kp.x >= 0.0 && kp.x < 96.0);
            assert!(kp.y >= 0.0 && kp.y < 96.0);
        }
    }

    #[test]
    fn test_size_grows_with_octave() {
        let det = small_detector();
        let img = corner_image(128, 128);
        let kps = det.detect(&img).unwrap();
        for kp in &kps {
            let expected = 7.0 * 1.5f32.powi(kp.octave);
            assert!((kp.size - expected).abs() < 1e-3);
        }
    }

    #[test]
    fn test_max_features_caps_count() {
        let img = corner_image(128, 128);
        let all = small_detector().detect(&img).unwrap();
        assert!(all.len() > 3);

        let capped = DetectorBuilder::from_config(small_detector().config().clone())
            .max_features(3)
            .build()
            .unwrap()
            .detect(&img)
            .unwrap();
        assert_eq!(capped.len(), 3);

        let mut responses: Vec<f32> = all.iter().map(|kp| kp.response).collect();
        responses.sort_by(|a, b| b.total_cmp(a));
        for kp in &capped {
            assert!(kp.response >= responses[2]);
        }
    }

    #[test]
    fn test_image_too_small() {
        let img = GrayImage::from_pixel(8, 8, Luma([0]));
        let err = small_detector().detect(&img).unwrap_err();
        assert_eq!(err, DetectError::ImageTooSmall { width: 8, height: 8, min_size: 9 });
    }

    #[test]
    fn test_empty_image() {
        let img = GrayImage::new(0, 0);
        let err = small_detector().detect(&img).unwrap_err();
        assert!(matches!(err, DetectError::InvalidImageSize { .. }));
    }

    #[test]
    fn test_detection_is_deterministic() {
        let det = small_detector();
        let img = corner_image(96, 96);
        let first = det.detect(&img).unwrap();
        for _ in 0..5 {
            assert_eq!(det.detect(&img).unwrap(), first);
        }
    }

    #[test]
    fn test_scale_levels_respect_border() {
        let det = small_detector();
        let levels = det.scale_levels(20, 20);
        // 20 -> 13 -> 9 all fit a 9-pixel minimum
        assert_eq!(levels.len(), 3);
        assert!(det.scale_levels(8, 8).is_empty());
    }
}
