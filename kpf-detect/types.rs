/// Corner found on one pyramid level, in that level's pixel grid
#[derive(Debug, Clone, Copy)]
pub struct LevelCorner {
    pub x: u32,
    pub y: u32,
    pub response: f32,
}

/// Scale information for pyramid levels
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScaleLevel {
    pub level: usize,
    pub scale: f32,
    pub width: u32,
    pub height: u32,
}
