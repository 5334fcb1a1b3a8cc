use image::GrayImage;

use crate::types::LevelCorner;

/// Orientation assignment and non-maximum suppression
pub struct KeypointRefinement;

impl KeypointRefinement {
    /// Intensity-centroid orientation in degrees, normalized to `[0, 360)`.
    ///
    /// The square patch is clipped to the image, so corners close to the
    /// border still get an angle.
    pub fn compute_orientation(img: &GrayImage, x: u32, y: u32, patch_size: usize) -> f32 {
        let (width, height) = img.dimensions();
        let half = (patch_size / 2) as i64;
        let (cx, cy) = (x as i64, y as i64);

        let mut m10 = 0i64;
        let mut m01 = 0i64;

        for dy in -half..=half {
            let yy = cy + dy;
            if yy < 0 || yy >= height as i64 {
                continue;
            }
            for dx in -half..=half {
                let xx = cx + dx;
                if xx < 0 || xx >= width as i64 {
                    continue;
                }
                let val = img.get_pixel(xx as u32, yy as u32).0[0] as i64;
                m10 += dx * val;
                m01 += dy * val;
            }
        }

        if m10 == 0 && m01 == 0 {
            return 0.0;
        }

        Self::normalize_degrees((m01 as f32).atan2(m10 as f32).to_degrees())
    }

    /// Wrap an angle in degrees into `[0, 360)`
    pub fn normalize_degrees(angle: f32) -> f32 {
        let wrapped = angle.rem_euclid(360.0);
        // rem_euclid can round up to exactly 360 for tiny negative inputs
        if wrapped >= 360.0 { 0.0 } else { wrapped }
    }

    /// Greedy radius NMS: strongest first, drop anything closer than `min_distance`
    /// to an already accepted corner. Output is sorted by descending response.
    pub fn non_maximum_suppression(corners: &[LevelCorner], min_distance: f32) -> Vec<LevelCorner> {
        if corners.is_empty() {
            return Vec::new();
        }

        let mut sorted = corners.to_vec();
        sorted.sort_by(|a, b| b.response.total_cmp(&a.response));

        if min_distance <= 0.0 {
            return sorted;
        }

        let mut suppressed: Vec<LevelCorner> = Vec::new();
        let min_distance_sq = min_distance * min_distance;

        for candidate in sorted {
            let is_local_max = suppressed.iter().all(|existing| {
                let dx = candidate.x as f32 - existing.x as f32;
                let dy = candidate.y as f32 - existing.y as f32;
                dx * dx + dy * dy >= min_distance_sq
            });

            if is_local_max {
                suppressed.push(candidate);
            }
        }

        suppressed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Luma;

    fn corner(x: u32, y: u32, response: f32) -> LevelCorner {
        LevelCorner { x, y, response }
    }

    #[test]
    fn test_normalize_degrees() {
        assert_eq!(KeypointRefinement::normalize_degrees(0.0), 0.0);
        assert_eq!(KeypointRefinement::normalize_degrees(-90.0), 270.0);
        assert_eq!(KeypointRefinement::normalize_degrees(360.0), 0.0);
        assert_eq!(KeypointRefinement::normalize_degrees(450.0), 90.0);
        let tiny = KeypointRefinement::normalize_degrees(-1e-7);
        assert!((0.0..360.0).contains(&tiny));
    }

    #[test]
    fn test_uniform_patch_has_zero_angle() {
        let img = GrayImage::from_pixel(31, 31, Luma([100]));
        assert_eq!(KeypointRefinement::compute_orientation(&img, 15, 15, 15), 0.0);
    }

    #[test]
    fn test_bright_right_half_points_right() {
        let img = GrayImage::from_fn(31, 31, |x, _| if x > 15 { Luma([200]) } else { Luma([0]) });
        let angle = KeypointRefinement::compute_orientation(&img, 15, 15, 15);
        assert!(angle < 1.0 || angle > 359.0, "angle {}", angle);
    }

    #[test]
    fn test_bright_bottom_half_points_down() {
        // Image y grows downward, so a bright lower half gives +90 degrees
        let img = GrayImage::from_fn(31, 31, |_, y| if y > 15 { Luma([200]) } else { Luma([0]) });
        let angle = KeypointRefinement::compute_orientation(&img, 15, 15, 15);
        assert!((angle - 90.0).abs() < 1.0, "angle {}", angle);
    }

    #[test]
    fn test_patch_clipped_at_border() {
        let img = GrayImage::from_fn(20, 20, |x, y| Luma([(x * 10 + y) as u8]));
        let angle = KeypointRefinement::compute_orientation(&img, 0, 0, 31);
        assert!((0.0..360.0).contains(&angle));
    }

    #[test]
    fn test_nms_keeps_strongest_in_cluster() {
        let corners = vec![corner(10, 10, 5.0), corner(11, 10, 9.0), corner(30, 30, 1.0)];
        let kept = KeypointRefinement::non_maximum_suppression(&corners, 3.0);
        assert_eq!(kept.len(), 2);
        assert_eq!((kept[0].x, kept[0].y), (11, 10));
        assert_eq!((kept[1].x, kept[1].y), (30, 30));
    }

    #[test]
    fn test_nms_min_distance_holds() {
        let corners: Vec<LevelCorner> = (0..20)
            .flat_map(|y| (0..20).map(move |x| corner(x, y, ((x * 7 + y * 13) % 17) as f32)))
            .collect();
        let kept = KeypointRefinement::non_maximum_suppression(&corners, 4.0);
        assert!(kept.len() < corners.len());
        for i in 0..kept.len() {
            for j in (i + 1)..kept.len() {
                let dx = kept[i].x as f32 - kept[j].x as f32;
                let dy = kept[i].y as f32 - kept[j].y as f32;
                assert!((dx * dx + dy * dy).sqrt() >= 4.0);
            }
        }
    }

    #[test]
    fn test_nms_zero_radius_keeps_all() {
        let corners = vec![corner(1, 1, 1.0), corner(1, 2, 2.0)];
        assert_eq!(KeypointRefinement::non_maximum_suppression(&corners, 0.0).len(), 2);
    }

    #[test]
    fn test_nms_empty() {
        assert!(KeypointRefinement::non_maximum_suppression(&[], 3.0).is_empty());
    }
}
