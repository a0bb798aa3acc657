//! Stencil testing state

use crate::renderer::state::depth::CompareFunc;

/// Operation applied to the stencil buffer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StencilOp {
    /// Keep current value
    Keep,
    /// Set to zero
    Zero,
    /// Replace with the reference value
    Replace,
    /// Increment and clamp to max
    Increment,
    /// Increment and wrap around
    IncrementWrap,
    /// Decrement and clamp to zero
    Decrement,
    /// Decrement and wrap around
    DecrementWrap,
    /// Bitwise invert
    Invert,
}

/// Stencil testing state (applied to both faces)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StencilState {
    /// Enable the stencil test
    pub enabled: bool,
    /// Action on stencil test fail
    pub fail_op: StencilOp,
    /// Action on stencil pass + depth fail
    pub depth_fail_op: StencilOp,
    /// Action on stencil pass + depth pass
    pub pass_op: StencilOp,
    /// Stencil comparison function
    pub func: CompareFunc,
    /// Reference value for compare and `Replace`
    pub reference: u32,
    /// Bits of the stencil buffer read for compare
    pub read_mask: u32,
    /// Bits of the stencil buffer written
    pub write_mask: u32,
}

impl Default for StencilState {
    fn default() -> Self {
        Self {
            enabled: false,
            fail_op: StencilOp::Keep,
            depth_fail_op: StencilOp::Keep,
            pass_op: StencilOp::Keep,
            func: CompareFunc::Always,
            reference: 0,
            read_mask: 0xFF,
            write_mask: 0xFF,
        }
    }
}
