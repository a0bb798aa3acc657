//! Backend device trait
//!
//! [`RenderDevice`] is the raw command surface a rendering backend provides:
//! object creation, state application, binding, and draw submission. Every
//! call executes immediately on the caller's thread. The trait is object-safe
//! and deliberately not `Send`/`Sync`: a GL context is bound to one thread,
//! so devices are shared within that thread via `Rc<dyn RenderDevice>`.
//!
//! Everything above this trait ([`crate::renderer::Renderer`] and the
//! resource wrappers) is backend-agnostic; everything below it lives in a
//! backend crate such as `prism_render_gl`.

use glam::Vec4;

use crate::error::Result;
use crate::renderer::geometry::VertexLayout;
use crate::renderer::render_target::AttachmentSlot;
use crate::renderer::shader::{ShaderStageSources, UniformDesc, UniformValue};
use crate::renderer::state::{
    BlendState, CullState, DepthState, RasterizerState, StencilState,
};
use crate::renderer::texture::{
    ImageFormat, ImagePixelType, RenderBufferFormat, SamplerDesc, TextureFormat,
};

// ===== HANDLES =====

/// Opaque vertex/index buffer handle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BufferHandle(pub u64);

/// Opaque 2D texture handle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TextureHandle(pub u64);

/// Opaque render buffer handle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RenderBufferHandle(pub u64);

/// Opaque linked shader program handle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ProgramHandle(pub u64);

/// Opaque framebuffer handle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FramebufferHandle(pub u64);

impl FramebufferHandle {
    /// The backend's default framebuffer (the window back buffer)
    pub const DEFAULT: FramebufferHandle = FramebufferHandle(0);

    /// True for the default (back buffer) framebuffer
    pub fn is_default(&self) -> bool {
        self.0 == 0
    }
}

// ===== SUPPORT TYPES =====

/// Buffer binding point
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BufferKind {
    /// Vertex data
    Vertex,
    /// Index data (32-bit indices)
    Index,
}

/// Result of a framebuffer completeness check
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FramebufferStatus {
    /// The framebuffer is complete and can be rendered to
    Complete,
    /// An attachment is invalid for its slot
    IncompleteAttachment,
    /// No image is attached at all
    MissingAttachment,
    /// The attachment combination is not supported by the driver
    Unsupported,
    /// Any other backend status code
    Other(u32),
}

impl FramebufferStatus {
    /// Human-readable description for error messages
    pub fn describe(&self) -> String {
        match self {
            FramebufferStatus::Complete => "complete".to_string(),
            FramebufferStatus::IncompleteAttachment => {
                "incomplete attachment".to_string()
            }
            FramebufferStatus::MissingAttachment => {
                "missing attachment".to_string()
            }
            FramebufferStatus::Unsupported => {
                "unsupported attachment combination".to_string()
            }
            FramebufferStatus::Other(code) => {
                format!("backend status 0x{:X}", code)
            }
        }
    }
}

// ===== DEVICE TRAIT =====

/// Raw command surface implemented by every rendering backend
///
/// Methods take `&self`; backends use interior mutability for their handle
/// tables. Calls never queue: when a method returns, the command has been
/// issued to the underlying API.
pub trait RenderDevice {
    // ----- Buffers -----

    /// Create an empty buffer object
    fn create_buffer(&self, kind: BufferKind) -> Result<BufferHandle>;

    /// Replace the full contents of a buffer
    fn upload_buffer(
        &self,
        handle: BufferHandle,
        kind: BufferKind,
        data: &[u8],
    ) -> Result<()>;

    /// Destroy a buffer object
    fn delete_buffer(&self, handle: BufferHandle);

    // ----- Textures and render buffers -----

    /// Create a 2D texture, optionally uploading initial pixel data
    ///
    /// `data` is interpreted per `image_format`/`pixel_type`; `None` leaves
    /// the storage uninitialized (render target use).
    fn create_texture_2d(
        &self,
        width: u32,
        height: u32,
        format: TextureFormat,
        data: Option<&[u8]>,
        image_format: ImageFormat,
        pixel_type: ImagePixelType,
    ) -> Result<TextureHandle>;

    /// Destroy a texture
    fn delete_texture(&self, handle: TextureHandle);

    /// Apply wrap and filter parameters to a texture
    fn apply_sampler(&self, handle: TextureHandle, sampler: &SamplerDesc) -> Result<()>;

    /// Create a render buffer with the given format and extent
    fn create_render_buffer(
        &self,
        format: RenderBufferFormat,
        width: u32,
        height: u32,
    ) -> Result<RenderBufferHandle>;

    /// Destroy a render buffer
    fn delete_render_buffer(&self, handle: RenderBufferHandle);

    // ----- Shader programs -----

    /// Compile, link and reflect a shader program
    ///
    /// On success returns the program handle and its active uniforms in
    /// declaration order. Compile or link failure yields
    /// [`crate::error::Error::ShaderCompilation`] carrying the info log.
    fn create_program(
        &self,
        sources: &ShaderStageSources,
    ) -> Result<(ProgramHandle, Vec<UniformDesc>)>;

    /// Destroy a shader program
    fn delete_program(&self, handle: ProgramHandle);

    // ----- Framebuffers -----

    /// Create an empty framebuffer object
    fn create_framebuffer(&self) -> Result<FramebufferHandle>;

    /// Destroy a framebuffer object
    fn delete_framebuffer(&self, handle: FramebufferHandle);

    /// Attach a texture image to a framebuffer slot
    fn attach_texture(
        &self,
        framebuffer: FramebufferHandle,
        slot: AttachmentSlot,
        texture: TextureHandle,
    ) -> Result<()>;

    /// Attach a render buffer to a framebuffer slot
    fn attach_render_buffer(
        &self,
        framebuffer: FramebufferHandle,
        slot: AttachmentSlot,
        render_buffer: RenderBufferHandle,
    ) -> Result<()>;

    /// Query framebuffer completeness
    fn framebuffer_status(&self, framebuffer: FramebufferHandle) -> FramebufferStatus;

    /// Set the fragment output to color attachment mapping
    ///
    /// `slots` must contain color slots only.
    fn set_draw_buffers(
        &self,
        framebuffer: FramebufferHandle,
        slots: &[AttachmentSlot],
    ) -> Result<()>;

    // ----- Fixed-function state -----

    /// Apply color blending state
    fn apply_blend(&self, state: &BlendState);

    /// Apply face culling state
    fn apply_cull(&self, state: &CullState);

    /// Apply depth test state
    fn apply_depth(&self, state: &DepthState);

    /// Apply rasterization state
    fn apply_rasterizer(&self, state: &RasterizerState);

    /// Apply stencil test state
    fn apply_stencil(&self, state: &StencilState);

    /// Set the viewport rectangle
    fn set_viewport(&self, x: i32, y: i32, width: u32, height: u32);

    // ----- Draw path -----

    /// Bind a framebuffer as the draw target
    fn bind_framebuffer(&self, framebuffer: FramebufferHandle);

    /// Activate a shader program
    fn use_program(&self, program: ProgramHandle);

    /// Upload one uniform value to a program location
    fn set_uniform(
        &self,
        program: ProgramHandle,
        location: i32,
        value: &UniformValue,
    ) -> Result<()>;

    /// Bind a texture to a texture unit
    fn bind_texture_unit(&self, unit: u32, texture: TextureHandle);

    /// Bind a vertex buffer and describe its layout to the pipeline
    fn bind_vertex_layout(
        &self,
        buffer: BufferHandle,
        layout: &VertexLayout,
    ) -> Result<()>;

    /// Draw consecutive vertices as a triangle list
    fn draw_triangles(&self, vertex_count: u32);

    /// Draw an indexed triangle list from a bound vertex layout
    fn draw_indexed_triangles(&self, index_buffer: BufferHandle, index_count: u32);

    // ----- Clear -----

    /// Clear color, depth and stencil of the bound framebuffer
    fn clear(&self, color: Vec4, depth: f32, stencil: i32);
}
