mod filter;
mod threshold;

pub use filter::{filter_by_size, SizeFilter};
pub use threshold::{ParseThresholdError, SizeThreshold};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Sentinel stored in [`Keypoint::angle`] when no orientation was computed
pub const ANGLE_UNSET: f32 = -1.0;

/// Detected local feature in base-image pixel coordinates
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Keypoint {
    pub x: f32,
    pub y: f32,
    /// Diameter of the support region, never negative
    pub size: f32,
    /// Orientation in degrees within `[0, 360)`, or [`ANGLE_UNSET`]
    pub angle: f32,
    pub response: f32,
    /// Pyramid level the keypoint was found on
    pub octave: i32,
}

impl Keypoint {
    /// Keypoint at `(x, y)` with the given size and no detector metadata
    pub fn new(x: f32, y: f32, size: f32) -> Self {
        debug_assert!(size >= 0.0, "keypoint size must be non-negative");
        Self {
            x,
            y,
            size,
            angle: ANGLE_UNSET,
            response: 0.0,
            octave: 0,
        }
    }

    pub fn with_angle(mut self, angle: f32) -> Self {
        self.angle = angle;
        self
    }

    pub fn with_response(mut self, response: f32) -> Self {
        self.response = response;
        self
    }

    pub fn with_octave(mut self, octave: i32) -> Self {
        self.octave = octave;
        self
    }

    pub fn position(&self) -> (f32, f32) {
        (self.x, self.y)
    }

    pub fn has_angle(&self) -> bool {
        self.angle >= 0.0
    }
}

/// Initialize Rayon thread pool with the specified number of threads
pub fn init_thread_pool(n_threads: usize) -> Result<(), rayon::ThreadPoolBuildError> {
    rayon::ThreadPoolBuilder::new()
        .num_threads(n_threads)
        .build_global()
}

/// Thread count used when a config does not pin one
pub fn default_thread_count() -> usize {
    num_cpus::get().max(1)
}
