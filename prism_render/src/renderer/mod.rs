//! Render command abstraction
//!
//! Declarative descriptions of what to draw (geometry), with which shader
//! inputs (shader data), under which pipeline state (state set), into which
//! target (render target) are translated by the [`Renderer`] into the
//! ordered, imperative call sequence a [`RenderDevice`] backend expects.

pub mod buffer;
pub mod device;
pub mod geometry;
pub mod render_target;
#[allow(clippy::module_inception)]
pub mod renderer;
pub mod shader;
pub mod state;
pub mod texture;

#[cfg(test)]
pub mod mock_device;

pub use buffer::{IndexBuffer, VertexBuffer};
pub use device::{
    BufferHandle, BufferKind, FramebufferHandle, FramebufferStatus, ProgramHandle,
    RenderBufferHandle, RenderDevice, TextureHandle,
};
pub use geometry::{
    Geometry, VertexComponent, VertexComponentType, VertexLayout, VertexPos3, VertexPos3Color4,
    VertexPos3Nrm3, VertexPos3Tex2,
};
pub use render_target::{AttachmentSlot, RenderTarget};
pub use renderer::Renderer;
pub use shader::{
    Shader, ShaderData, ShaderStageSources, UniformDesc, UniformType, UniformValue,
};
pub use state::{
    BlendEquation, BlendFactor, BlendState, CompareFunc, CullMode, CullState, DepthState,
    FillMode, FrontFace, RasterizerState, StateSet, StencilOp, StencilState, ViewportState,
};
pub use texture::{
    FilterMode, ImageFormat, ImagePixelType, RenderBuffer, RenderBufferFormat, SamplerDesc,
    Texture2D, TextureFormat, TextureSampler, WrapMode,
};
