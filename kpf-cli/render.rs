use image::{DynamicImage, GrayImage, Rgb, RgbImage};
use imageproc::drawing::{draw_hollow_circle_mut, draw_line_segment_mut};
use kpf_core::Keypoint;
use serde::{Deserialize, Serialize};

/// Radius of the plain position marker
pub const DEFAULT_MARKER_RADIUS: i32 = 3;

/// How keypoints are drawn
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum DrawStyle {
    /// Fixed-radius circle at the position only
    Default,
    /// Circle scaled by `size` plus an orientation tick along `angle`
    #[default]
    Rich,
}

/// Draw `keypoints` over a color copy of `img`. The input image is left untouched.
pub fn draw_keypoints(img: &GrayImage, keypoints: &[Keypoint], color: Rgb<u8>, style: DrawStyle) -> RgbImage {
    let mut output = DynamicImage::ImageLuma8(img.clone()).into_rgb8();

    for kp in keypoints {
        let center = (kp.x.round() as i32, kp.y.round() as i32);
        match style {
            DrawStyle::Default => {
                draw_hollow_circle_mut(&mut output, center, DEFAULT_MARKER_RADIUS, color);
            }
            DrawStyle::Rich => {
                let radius = rich_radius(kp);
                draw_hollow_circle_mut(&mut output, center, radius, color);
                if kp.has_angle() {
                    let (s, c) = kp.angle.to_radians().sin_cos();
                    let start = (center.0 as f32, center.1 as f32);
                    let end = (start.0 + c * radius as f32, start.1 + s * radius as f32);
                    draw_line_segment_mut(&mut output, start, end, color);
                }
            }
        }
    }

    output
}

/// Rich markers show the support region, so the radius is half the diameter
pub fn rich_radius(kp: &Keypoint) -> i32 {
    ((kp.size / 2.0).round() as i32).max(1)
}
