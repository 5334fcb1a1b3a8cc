//! Multi-scale FAST keypoint detection.
//!
//! This crate is the detector side of the pipeline: it turns a grayscale
//! image into [`Keypoint`]s carrying position, size, orientation, response
//! and octave. Downstream code only depends on the [`Detector`] trait, so any
//! other detector can be swapped in.

pub mod builder;
pub mod config;
pub mod corners;
pub mod detector;
pub mod error;
pub mod pyramid;
pub mod refinement;
pub mod types;
pub mod utils;

pub use builder::DetectorBuilder;
pub use config::DetectorConfig;
pub use detector::{Detector, ScaleSpaceDetector};
pub use error::{DetectError, DetectResult};
pub use kpf_core::Keypoint;
pub use types::ScaleLevel;
