use crate::Keypoint;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Keep the keypoints whose `size` is strictly greater than `threshold`.
///
/// Input order is preserved and keypoints are copied unchanged. A NaN
/// threshold compares false against every size and yields an empty result.
pub fn filter_by_size(keypoints: &[Keypoint], threshold: f32) -> Vec<Keypoint> {
    keypoints
        .iter()
        .filter(|kp| kp.size > threshold)
        .copied()
        .collect()
}

/// Size predicate carried around as configuration
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SizeFilter {
    pub min_size: f32,
}

impl SizeFilter {
    pub fn new(min_size: f32) -> Self {
        Self { min_size }
    }

    pub fn accepts(&self, kp: &Keypoint) -> bool {
        kp.size > self.min_size
    }

    pub fn apply(&self, keypoints: &[Keypoint]) -> Vec<Keypoint> {
        filter_by_size(keypoints, self.min_size)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn kps_with_sizes(sizes: &[f32]) -> Vec<Keypoint> {
        sizes
            .iter()
            .enumerate()
            .map(|(i, &s)| Keypoint::new(i as f32, 2.0 * i as f32, s).with_response(i as f32))
            .collect()
    }

    #[test]
    fn test_keeps_sizes_above_threshold_in_order() {
        let kps = kps_with_sizes(&[10.0, 35.0, 5.0, 40.0]);
        let out = filter_by_size(&kps, 30.0);
        assert_eq!(out.len(), 2);
        assert_eq!(out[0], kps[1]);
        assert_eq!(out[1], kps[3]);
    }

    #[test]
    fn test_threshold_is_strict() {
        let kps = kps_with_sizes(&[30.0, 30.0001]);
        let out = filter_by_size(&kps, 30.0);
        assert_eq!(out, vec![kps[1]]);
    }

    #[test]
    fn test_empty_input() {
        assert!(filter_by_size(&[], 0.0).is_empty());
        assert!(filter_by_size(&[], f32::NEG_INFINITY).is_empty());
    }

    #[test]
    fn test_nan_threshold_keeps_nothing() {
        let kps = kps_with_sizes(&[1.0, 100.0]);
        assert!(filter_by_size(&kps, f32::NAN).is_empty());
    }

    #[test]
    fn test_metadata_passes_through() {
        let kp = Keypoint::new(3.5, 4.5, 50.0)
            .with_angle(271.0)
            .with_response(0.25)
            .with_octave(3);
        let out = filter_by_size(&[kp], 30.0);
        assert_eq!(out, vec![kp]);
    }

    #[test]
    fn test_size_filter_matches_function() {
        let kps = kps_with_sizes(&[10.0, 35.0, 5.0, 40.0]);
        let filter = SizeFilter::new(30.0);
        assert_eq!(filter.apply(&kps), filter_by_size(&kps, 30.0));
        assert!(filter.accepts(&kps[1]));
        assert!(!filter.accepts(&kps[0]));
    }

    fn arb_keypoints() -> impl Strategy<Value = Vec<Keypoint>> {
        prop::collection::vec(
            (0.0f32..1000.0, 0.0f32..1000.0, 0.0f32..200.0, 0.0f32..360.0),
            0..64,
        )
        .prop_map(|v| {
            v.into_iter()
                .map(|(x, y, s, a)| Keypoint::new(x, y, s).with_angle(a))
                .collect()
        })
    }

    proptest! {
        #[test]
        fn prop_output_is_exactly_the_large_ones(kps in arb_keypoints(), t in -10.0f32..250.0) {
            let out = filter_by_size(&kps, t);
            let expected: Vec<Keypoint> = kps.iter().copied().filter(|kp| kp.size > t).collect();
            prop_assert!(out.iter().all(|kp| kp.size > t));
            prop_assert_eq!(out, expected);
        }

        #[test]
        fn prop_idempotent(kps in arb_keypoints(), t in -10.0f32..250.0) {
            let once = filter_by_size(&kps, t);
            let twice = filter_by_size(&once, t);
            prop_assert_eq!(once, twice);
        }

        #[test]
        fn prop_threshold_at_or_above_max_is_empty(kps in arb_keypoints(), extra in 0.0f32..50.0) {
            let max = kps.iter().map(|kp| kp.size).fold(0.0f32, f32::max);
            prop_assert!(filter_by_size(&kps, max + extra).is_empty());
        }

        #[test]
        fn prop_threshold_below_min_keeps_all(kps in arb_keypoints(), gap in 0.001f32..50.0) {
            let min = kps.iter().map(|kp| kp.size).fold(f32::INFINITY, f32::min);
            let t = if min.is_finite() { min - gap } else { 0.0 };
            prop_assert_eq!(filter_by_size(&kps, t), kps);
        }
    }
}
