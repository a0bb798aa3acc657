//! Color blending state

/// Blend equation combining source and destination terms
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlendEquation {
    /// result = src * srcFactor + dst * dstFactor
    Add,
    /// result = src * srcFactor - dst * dstFactor
    Subtract,
    /// result = dst * dstFactor - src * srcFactor
    ReverseSubtract,
    /// result = min(src, dst)
    Min,
    /// result = max(src, dst)
    Max,
}

/// Blend factor applied to the source or destination color
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlendFactor {
    Zero,
    One,
    SrcColor,
    OneMinusSrcColor,
    DstColor,
    OneMinusDstColor,
    SrcAlpha,
    OneMinusSrcAlpha,
    DstAlpha,
    OneMinusDstAlpha,
}

/// Color blending state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BlendState {
    /// Enable blending
    pub enabled: bool,
    /// Blend equation
    pub equation: BlendEquation,
    /// Factor applied to the incoming fragment color
    pub src_factor: BlendFactor,
    /// Factor applied to the framebuffer color
    pub dst_factor: BlendFactor,
}

impl Default for BlendState {
    fn default() -> Self {
        Self {
            enabled: false,
            equation: BlendEquation::Add,
            src_factor: BlendFactor::One,
            dst_factor: BlendFactor::Zero,
        }
    }
}

impl BlendState {
    /// Blending disabled (same as `Default`)
    pub fn disabled() -> Self {
        Self::default()
    }

    /// Standard alpha blending: src*alpha + dst*(1-alpha)
    pub fn alpha_blend() -> Self {
        Self {
            enabled: true,
            equation: BlendEquation::Add,
            src_factor: BlendFactor::SrcAlpha,
            dst_factor: BlendFactor::OneMinusSrcAlpha,
        }
    }
}
