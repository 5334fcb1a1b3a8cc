#[derive(Debug, Clone, PartialEq)]
pub enum DetectError {
    InvalidImageSize { width: u32, height: u32 },
    ImageTooSmall { width: u32, height: u32, min_size: u32 },
    InvalidThreshold(u8),
    InvalidArcLength(u8),
    InvalidPatchSize(usize),
    InvalidBorder { edge_border: usize, patch_size: usize },
    InvalidScaleFactor(f32),
    InvalidLevelCount(usize),
    InvalidNmsRadius(f32),
}

impl std::fmt::Display for DetectError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DetectError::InvalidImageSize { width, height } => {
                write!(f, "Invalid image dimensions: {}x{} (must be > 0)", width, height)
            }
            DetectError::ImageTooSmall { width, height, min_size } => {
                write!(f, "Image {}x{} too small (minimum {}x{})", width, height, min_size, min_size)
            }
            DetectError::InvalidThreshold(t) => {
                write!(f, "Invalid FAST threshold: {} (must be 1-127)", t)
            }
            DetectError::InvalidArcLength(n) => {
                write!(f, "Invalid FAST arc length: {} (must be 9-12)", n)
            }
            DetectError::InvalidPatchSize(p) => {
                write!(f, "Invalid patch size: {} (must be odd and at least 7)", p)
            }
            DetectError::InvalidBorder { edge_border, patch_size } => {
                write!(f, "Edge border {} cannot hold half of patch size {}", edge_border, patch_size)
            }
            DetectError::InvalidScaleFactor(s) => {
                write!(f, "Invalid scale factor: {} (must be > 1)", s)
            }
            DetectError::InvalidLevelCount(n) => {
                write!(f, "Invalid pyramid level count: {} (must be 1-32)", n)
            }
            DetectError::InvalidNmsRadius(r) => {
                write!(f, "Invalid NMS radius: {} (must be finite and >= 0)", r)
            }
        }
    }
}

impl std::error::Error for DetectError {}

pub type DetectResult<T> = Result<T, DetectError>;
