//! Face culling state

/// Which faces are culled
///
/// `None` disables culling entirely; the winding order is not applied in
/// that case.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CullMode {
    /// No culling
    None,
    /// Cull front faces
    Front,
    /// Cull back faces
    Back,
    /// Cull both faces
    FrontAndBack,
}

/// Winding order that defines a front face
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrontFace {
    /// Counter-clockwise vertices define front face
    CounterClockwise,
    /// Clockwise vertices define front face
    Clockwise,
}

/// Face culling state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CullState {
    /// Which faces to cull
    pub mode: CullMode,
    /// Front face winding order
    pub front_face: FrontFace,
}

impl Default for CullState {
    fn default() -> Self {
        Self {
            mode: CullMode::Back,
            front_face: FrontFace::CounterClockwise,
        }
    }
}

impl CullState {
    /// Culling disabled
    pub fn disabled() -> Self {
        Self {
            mode: CullMode::None,
            ..Self::default()
        }
    }

    /// Cull front faces instead of back faces
    pub fn cull_front_faces() -> Self {
        Self {
            mode: CullMode::Front,
            ..Self::default()
        }
    }
}
