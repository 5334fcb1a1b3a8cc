use crate::builder::DetectorBuilder;
use crate::error::{DetectError, DetectResult};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Complete detector configuration
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct DetectorConfig {
    /// Intensity difference for the FAST segment test
    pub fast_threshold: u8,
    /// Contiguous circle pixels required by the segment test
    pub fast_n: u8,
    /// Patch used for orientation; also the keypoint size on level 0
    pub patch_size: usize,
    /// Pixels skipped on every side of each level
    pub edge_border: usize,
    pub n_levels: usize,
    pub scale_factor: f32,
    pub nms_radius: f32,
    /// Keep only the strongest N keypoints
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Option::is_none"))]
    pub max_features: Option<usize>,
    /// Worker threads; 0 picks one per CPU when the pool is built
    pub n_threads: usize,
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Option::is_none"))]
    pub name: Option<String>,
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Option::is_none"))]
    pub description: Option<String>,
}

impl Default for DetectorConfig {
    fn default() -> Self {
        Self {
            fast_threshold: 20,
            fast_n: 9,
            patch_size: 31,
            edge_border: 16,
            n_levels: 8,
            scale_factor: 1.2,
            nms_radius: 3.0,
            max_features: None,
            n_threads: 0,
            name: None,
            description: None,
        }
    }
}

impl DetectorConfig {
    /// Dense preset: low threshold, tight NMS, many small features
    pub fn dense_preset() -> Self {
        Self {
            fast_threshold: 10,
            nms_radius: 2.0,
            name: Some("Dense".to_string()),
            description: Some("Low contrast threshold with tight suppression".to_string()),
            ..Self::default()
        }
    }

    /// Sparse preset: strong corners only, capped count
    pub fn sparse_preset() -> Self {
        Self {
            fast_threshold: 35,
            nms_radius: 6.0,
            max_features: Some(500),
            name: Some("Sparse".to_string()),
            description: Some("High contrast threshold, at most 500 keypoints".to_string()),
            ..Self::default()
        }
    }

    /// Look up a preset by name (`default`, `dense`, `sparse`)
    pub fn preset(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "default" => Some(Self::default()),
            "dense" => Some(Self::dense_preset()),
            "sparse" => Some(Self::sparse_preset()),
            _ => None,
        }
    }

    pub fn with_metadata(mut self, name: &str, description: &str) -> Self {
        self.name = Some(name.to_string());
        self.description = Some(description.to_string());
        self
    }

    pub fn to_builder(self) -> DetectorBuilder {
        DetectorBuilder::from_config(self)
    }

    /// Thread count to build a pool with, resolving 0 to the CPU count
    pub fn thread_count(&self) -> usize {
        match self.n_threads {
            0 => kpf_core::default_thread_count(),
            n => n,
        }
    }

    /// Smallest level side the detector will scan
    pub fn min_level_dim(&self) -> u32 {
        (2 * self.edge_border + 1) as u32
    }

    /// Generate human-readable summary
    pub fn summary(&self) -> String {
        format!(
            "DetectorConfig{}: FAST-{} threshold={}, patch={}, border={}, levels={}x{:.2}, NMS={:.1}, max={}, threads={}",
            self.name.as_deref().map(|n| format!(" '{}'", n)).unwrap_or_default(),
            self.fast_n,
            self.fast_threshold,
            self.patch_size,
            self.edge_border,
            self.n_levels,
            self.scale_factor,
            self.nms_radius,
            self.max_features.map(|n| n.to_string()).unwrap_or_else(|| "all".to_string()),
            match self.n_threads {
                0 => "auto".to_string(),
                n => n.to_string(),
            },
        )
    }

    /// Validate configuration parameters
    pub fn validate(&self) -> DetectResult<()> {
        if self.fast_threshold == 0 || self.fast_threshold > 127 {
            return Err(DetectError::InvalidThreshold(self.fast_threshold));
        }
        if !(9..=12).contains(&self.fast_n) {
            return Err(DetectError::InvalidArcLength(self.fast_n));
        }
        if self.patch_size < 7 || self.patch_size % 2 == 0 {
            return Err(DetectError::InvalidPatchSize(self.patch_size));
        }
        if self.edge_border < 3 || self.edge_border < self.patch_size / 2 {
            return Err(DetectError::InvalidBorder {
                edge_border: self.edge_border,
                patch_size: self.patch_size,
            });
        }
        if self.n_levels == 0 || self.n_levels > 32 {
            return Err(DetectError::InvalidLevelCount(self.n_levels));
        }
        if !self.scale_factor.is_finite() || self.scale_factor <= 1.0 {
            return Err(DetectError::InvalidScaleFactor(self.scale_factor));
        }
        if !self.nms_radius.is_finite() || self.nms_radius < 0.0 {
            return Err(DetectError::InvalidNmsRadius(self.nms_radius));
        }
        Ok(())
    }

    /// Save configuration to JSON file
    #[cfg(feature = "serde")]
    pub fn save_json<P: AsRef<std::path::Path>>(&self, path: P) -> Result<(), Box<dyn std::error::Error>> {
        std::fs::write(path, self.to_json()?)?;
        Ok(())
    }

    /// Load configuration from JSON file
    #[cfg(feature = "serde")]
    pub fn load_json<P: AsRef<std::path::Path>>(path: P) -> Result<Self, Box<dyn std::error::Error>> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    /// Save configuration to TOML file
    #[cfg(feature = "serde")]
    pub fn save_toml<P: AsRef<std::path::Path>>(&self, path: P) -> Result<(), Box<dyn std::error::Error>> {
        std::fs::write(path, self.to_toml()?)?;
        Ok(())
    }

    /// Load configuration from TOML file
    #[cfg(feature = "serde")]
    pub fn load_toml<P: AsRef<std::path::Path>>(path: P) -> Result<Self, Box<dyn std::error::Error>> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml(&content)
    }

    #[cfg(feature = "serde")]
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    #[cfg(feature = "serde")]
    pub fn from_json(json: &str) -> Result<Self, Box<dyn std::error::Error>> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    #[cfg(feature = "serde")]
    pub fn to_toml(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }

    #[cfg(feature = "serde")]
    pub fn from_toml(toml_str: &str) -> Result<Self, Box<dyn std::error::Error>> {
        let config: Self = toml::from_str(toml_str)?;
        config.validate()?;
        Ok(config)
    }
}
