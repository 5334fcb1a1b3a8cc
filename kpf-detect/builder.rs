use crate::config::DetectorConfig;
use crate::detector::ScaleSpaceDetector;
use crate::error::DetectResult;

/// Builder for creating a `ScaleSpaceDetector`
#[derive(Debug, Clone, Default)]
pub struct DetectorBuilder {
    config: DetectorConfig,
}

impl DetectorBuilder {
    /// Create a new builder with default settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the FAST threshold (1-127)
    pub fn threshold(mut self, threshold: u8) -> Self {
        self.config.fast_threshold = threshold;
        self
    }

    /// Set the FAST arc length (9-12)
    pub fn fast_n(mut self, n: u8) -> Self {
        self.config.fast_n = n;
        self
    }

    /// Set the patch size and widen the edge border to fit it
    pub fn patch_size(mut self, patch_size: usize) -> Self {
        self.config.patch_size = patch_size;
        self.config.edge_border = self.config.edge_border.max(patch_size / 2 + 1);
        self
    }

    pub fn edge_border(mut self, edge_border: usize) -> Self {
        self.config.edge_border = edge_border;
        self
    }

    pub fn levels(mut self, n_levels: usize) -> Self {
        self.config.n_levels = n_levels;
        self
    }

    pub fn scale_factor(mut self, scale_factor: f32) -> Self {
        self.config.scale_factor = scale_factor;
        self
    }

    pub fn nms_radius(mut self, radius: f32) -> Self {
        self.config.nms_radius = radius;
        self
    }

    /// Keep at most `n` keypoints, strongest first
    pub fn max_features(mut self, n: usize) -> Self {
        self.config.max_features = Some(n);
        self
    }

    pub fn unlimited_features(mut self) -> Self {
        self.config.max_features = None;
        self
    }

    pub fn threads(mut self, n_threads: usize) -> Self {
        self.config.n_threads = n_threads;
        self
    }

    pub fn preset_dense(mut self) -> Self {
        self.config = DetectorConfig::dense_preset();
        self
    }

    pub fn preset_sparse(mut self) -> Self {
        self.config = DetectorConfig::sparse_preset();
        self
    }

    /// Build the detector, validating the configuration
    pub fn build(self) -> DetectResult<ScaleSpaceDetector> {
        ScaleSpaceDetector::new(self.config)
    }

    pub fn summary(&self) -> String {
        self.config.summary()
    }

    pub fn from_config(config: DetectorConfig) -> Self {
        Self { config }
    }

    pub fn to_config(self) -> DetectorConfig {
        self.config
    }
}
