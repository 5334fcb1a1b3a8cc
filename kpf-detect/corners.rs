use image::GrayImage;
use rayon::prelude::*;

use crate::types::LevelCorner;
use crate::utils::has_consecutive_bits;

/// FAST segment-test corner detection on a single pyramid level
pub struct CornerDetector;

impl CornerDetector {
    /// Bresenham circle of radius 3, clockwise from 12 o'clock
    pub const FAST_OFFSETS: [(i32, i32); 16] = [
        (0, -3), (1, -3), (2, -2), (3, -1),
        (3, 0), (3, 1), (2, 2), (1, 3),
        (0, 3), (-1, 3), (-2, 2), (-3, 1),
        (-3, 0), (-3, -1), (-2, -2), (-1, -3),
    ];

    /// Detect FAST-`arc_len` corners, skipping `border` pixels on every side.
    ///
    /// `border` must be at least 3 so the circle stays inside the image.
    /// Rows are processed in parallel; the result is in row-major order.
    pub fn detect(img: &GrayImage, threshold: u8, arc_len: u8, border: u32) -> Vec<LevelCorner> {
        let (width, height) = img.dimensions();
        let border = border.max(3);
        if width <= 2 * border || height <= 2 * border {
            return Vec::new();
        }

        (border..height - border)
            .into_par_iter()
            .flat_map_iter(|y| {
                (border..width - border)
                    .filter_map(move |x| Self::test_pixel(img, x, y, threshold, arc_len))
            })
            .collect()
    }

    /// Segment test for one pixel; returns the corner with its response when it passes
    fn test_pixel(img: &GrayImage, x: u32, y: u32, threshold: u8, arc_len: u8) -> Option<LevelCorner> {
        let center = img.get_pixel(x, y).0[0] as i32;
        let t = threshold as i32;

        let mut bright_mask = 0u16;
        let mut dark_mask = 0u16;
        let mut bright_sum = 0i32;
        let mut dark_sum = 0i32;

        for (i, &(dx, dy)) in Self::FAST_OFFSETS.iter().enumerate() {
            let q = img.get_pixel((x as i32 + dx) as u32, (y as i32 + dy) as u32).0[0] as i32;
            let diff = q - center;
            if diff >= t {
                bright_mask |= 1 << i;
                bright_sum += diff;
            } else if -diff >= t {
                dark_mask |= 1 << i;
                dark_sum -= diff;
            }
        }

        let n = arc_len as usize;
        let response = if has_consecutive_bits(bright_mask, n) {
            bright_sum as f32 / bright_mask.count_ones() as f32
        } else if has_consecutive_bits(dark_mask, n) {
            dark_sum as f32 / dark_mask.count_ones() as f32
        } else {
            return None;
        };

        Some(LevelCorner { x, y, response })
    }
}
