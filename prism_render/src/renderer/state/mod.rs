//! Fixed-function render state
//!
//! Each state group is a plain `Copy` value with a GL-compatible default.
//! A [`StateSet`] bundles every group and travels with each draw call; the
//! dispatcher re-specifies the full set before every draw so no state leaks
//! between draws.

pub mod blend;
pub mod cull;
pub mod depth;
pub mod rasterizer;
pub mod stencil;
pub mod viewport;

pub use blend::{BlendEquation, BlendFactor, BlendState};
pub use cull::{CullMode, CullState, FrontFace};
pub use depth::{CompareFunc, DepthState};
pub use rasterizer::{FillMode, RasterizerState};
pub use stencil::{StencilOp, StencilState};
pub use viewport::ViewportState;

/// Complete fixed-function state for one draw call
///
/// Defaults match a freshly created GL context: blending off, back-face
/// culling, depth test/write on with `Less`, solid fill, stencil off,
/// viewport covering the full render target.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct StateSet {
    /// Color blending
    pub blend: BlendState,
    /// Face culling
    pub cull: CullState,
    /// Depth testing and writing
    pub depth: DepthState,
    /// Polygon fill mode
    pub rasterizer: RasterizerState,
    /// Stencil testing
    pub stencil: StencilState,
    /// Viewport rectangle
    pub viewport: ViewportState,
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
#[path = "state_tests.rs"]
mod tests;
