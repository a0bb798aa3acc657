//! Viewport state

/// Viewport rectangle for a draw call
///
/// `Full` resolves to the extent of whatever render target the draw goes to,
/// so a state set built once keeps working when the target is resized.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ViewportState {
    /// Cover the full render target
    #[default]
    Full,
    /// Explicit rectangle in pixels (origin at bottom-left)
    Fixed {
        x: i32,
        y: i32,
        width: u32,
        height: u32,
    },
}

impl ViewportState {
    /// Resolve to a concrete rectangle for a target of the given extent
    pub fn resolve(&self, target_width: u32, target_height: u32) -> (i32, i32, u32, u32) {
        match *self {
            ViewportState::Full => (0, 0, target_width, target_height),
            ViewportState::Fixed {
                x,
                y,
                width,
                height,
            } => (x, y, width, height),
        }
    }
}
