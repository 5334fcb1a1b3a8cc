use image::imageops::{self, FilterType};
use image::GrayImage;

use crate::types::ScaleLevel;

/// Image pyramid operations for multi-scale feature detection
pub struct ImagePyramid;

impl ImagePyramid {
    /// Generate up to `n_levels` scale levels, stopping once a level would be
    /// narrower or shorter than `min_dim`
    pub fn generate_scale_levels(
        width: u32,
        height: u32,
        n_levels: usize,
        scale_factor: f32,
        min_dim: u32,
    ) -> Vec<ScaleLevel> {
        let mut levels = Vec::with_capacity(n_levels);
        let mut current_scale = 1.0f32;

        for level in 0..n_levels {
            let scaled_width = ((width as f32) / current_scale).round() as u32;
            let scaled_height = ((height as f32) / current_scale).round() as u32;

            if scaled_width < min_dim || scaled_height < min_dim {
                break;
            }

            levels.push(ScaleLevel {
                level,
                scale: current_scale,
                width: scaled_width,
                height: scaled_height,
            });

            current_scale *= scale_factor;
        }

        levels
    }

    /// Build one image per scale level; level 0 is the base image itself
    pub fn build_image_pyramid(img: &GrayImage, scale_levels: &[ScaleLevel]) -> Vec<GrayImage> {
        scale_levels
            .iter()
            .map(|sl| {
                if sl.level == 0 {
                    img.clone()
                } else {
                    imageops::resize(img, sl.width, sl.height, FilterType::Triangle)
                }
            })
            .collect()
    }
}
