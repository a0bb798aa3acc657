//! Polygon rasterization state

/// Polygon fill mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FillMode {
    /// Fill polygons
    Solid,
    /// Draw edges only
    Wireframe,
}

/// Polygon rasterization state
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RasterizerState {
    /// Polygon fill mode
    pub fill_mode: FillMode,
    /// Line width in pixels, applied in wireframe mode
    pub line_width: f32,
}

impl Default for RasterizerState {
    fn default() -> Self {
        Self {
            fill_mode: FillMode::Solid,
            line_width: 1.0,
        }
    }
}

impl RasterizerState {
    /// Wireframe rendering with 1px lines
    pub fn wireframe() -> Self {
        Self {
            fill_mode: FillMode::Wireframe,
            ..Self::default()
        }
    }
}
