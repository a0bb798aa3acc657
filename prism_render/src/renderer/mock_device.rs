//! Mock device for tests
//!
//! Records every [`RenderDevice`] call as a typed [`DeviceCall`] so tests can
//! assert on exact call sequences. Program reflection is simulated with a
//! naive scan for `uniform <type> <name>;` declarations in the source text.
//! The reported framebuffer status is configurable to exercise the
//! incomplete-attachment path.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use glam::Vec4;

use crate::error::{Error, Result};
use crate::renderer::device::{
    BufferHandle, BufferKind, FramebufferHandle, FramebufferStatus, ProgramHandle,
    RenderBufferHandle, RenderDevice, TextureHandle,
};
use crate::renderer::geometry::VertexLayout;
use crate::renderer::render_target::AttachmentSlot;
use crate::renderer::shader::{ShaderStageSources, UniformDesc, UniformType, UniformValue};
use crate::renderer::state::{
    BlendState, CullState, DepthState, RasterizerState, StencilState,
};
use crate::renderer::texture::{
    ImageFormat, ImagePixelType, RenderBufferFormat, SamplerDesc, TextureFormat,
};

/// One recorded device call
#[derive(Debug, Clone, PartialEq)]
pub enum DeviceCall {
    CreateBuffer {
        kind: BufferKind,
        handle: BufferHandle,
    },
    UploadBuffer {
        handle: BufferHandle,
        kind: BufferKind,
        size_bytes: usize,
    },
    DeleteBuffer(BufferHandle),
    CreateTexture2D {
        handle: TextureHandle,
        width: u32,
        height: u32,
        format: TextureFormat,
        has_data: bool,
        image_format: ImageFormat,
        pixel_type: ImagePixelType,
    },
    DeleteTexture(TextureHandle),
    ApplySampler {
        texture: TextureHandle,
        desc: SamplerDesc,
    },
    CreateRenderBuffer {
        handle: RenderBufferHandle,
        format: RenderBufferFormat,
        width: u32,
        height: u32,
    },
    DeleteRenderBuffer(RenderBufferHandle),
    CreateProgram(ProgramHandle),
    DeleteProgram(ProgramHandle),
    CreateFramebuffer(FramebufferHandle),
    DeleteFramebuffer(FramebufferHandle),
    AttachTexture {
        framebuffer: FramebufferHandle,
        slot: AttachmentSlot,
        texture: TextureHandle,
    },
    AttachRenderBuffer {
        framebuffer: FramebufferHandle,
        slot: AttachmentSlot,
        render_buffer: RenderBufferHandle,
    },
    SetDrawBuffers {
        framebuffer: FramebufferHandle,
        slots: Vec<AttachmentSlot>,
    },
    ApplyBlend(BlendState),
    ApplyCull(CullState),
    ApplyDepth(DepthState),
    ApplyRasterizer(RasterizerState),
    ApplyStencil(StencilState),
    SetViewport {
        x: i32,
        y: i32,
        width: u32,
        height: u32,
    },
    BindFramebuffer(FramebufferHandle),
    UseProgram(ProgramHandle),
    SetUniform {
        program: ProgramHandle,
        location: i32,
        value: UniformValue,
    },
    BindTextureUnit {
        unit: u32,
        texture: TextureHandle,
    },
    BindVertexLayout {
        buffer: BufferHandle,
        layout: VertexLayout,
    },
    DrawTriangles {
        vertex_count: u32,
    },
    DrawIndexedTriangles {
        index_buffer: BufferHandle,
        index_count: u32,
    },
    Clear {
        color: Vec4,
        depth: f32,
        stencil: i32,
    },
}

/// Recording mock implementation of [`RenderDevice`]
pub struct MockDevice {
    next_id: Cell<u64>,
    calls: RefCell<Vec<DeviceCall>>,
    framebuffer_status: Cell<FramebufferStatus>,
    compile_error: RefCell<Option<String>>,
}

impl MockDevice {
    pub fn new() -> Rc<Self> {
        Rc::new(Self {
            next_id: Cell::new(1),
            calls: RefCell::new(Vec::new()),
            framebuffer_status: Cell::new(FramebufferStatus::Complete),
            compile_error: RefCell::new(None),
        })
    }

    /// Snapshot of the recorded calls
    pub fn calls(&self) -> Vec<DeviceCall> {
        self.calls.borrow().clone()
    }

    /// Drop all recorded calls
    pub fn clear_calls(&self) {
        self.calls.borrow_mut().clear();
    }

    /// Status reported by subsequent `framebuffer_status` queries
    pub fn set_framebuffer_status(&self, status: FramebufferStatus) {
        self.framebuffer_status.set(status);
    }

    /// Make subsequent `create_program` calls fail with the given log
    pub fn set_compile_error(&self, log: Option<&str>) {
        *self.compile_error.borrow_mut() = log.map(str::to_string);
    }

    fn record(&self, call: DeviceCall) {
        self.calls.borrow_mut().push(call);
    }

    fn next_id(&self) -> u64 {
        let id = self.next_id.get();
        self.next_id.set(id + 1);
        id
    }

    /// Scan GLSL source text for `uniform <type> <name>;` declarations
    fn reflect(sources: &ShaderStageSources) -> Vec<UniformDesc> {
        let mut uniforms: Vec<UniformDesc> = Vec::new();

        let stages = [
            Some(sources.vertex.as_str()),
            sources.tess_control.as_deref(),
            sources.tess_eval.as_deref(),
            sources.geometry.as_deref(),
            Some(sources.fragment.as_str()),
        ];

        for source in stages.into_iter().flatten() {
            for line in source.lines() {
                let line = line.trim();
                let Some(rest) = line.strip_prefix("uniform ") else {
                    continue;
                };
                let mut parts = rest.split_whitespace();
                let (Some(ty_name), Some(name)) = (parts.next(), parts.next()) else {
                    continue;
                };
                let Some(ty) = Self::parse_type(ty_name) else {
                    continue;
                };
                let name = name.trim_end_matches(';');
                if uniforms.iter().any(|u| u.name == name) {
                    continue;
                }
                let location = uniforms.len() as i32;
                uniforms.push(UniformDesc {
                    name: name.to_string(),
                    ty,
                    location,
                });
            }
        }

        uniforms
    }

    fn parse_type(name: &str) -> Option<UniformType> {
        match name {
            "int" => Some(UniformType::Int),
            "ivec2" => Some(UniformType::IVec2),
            "ivec3" => Some(UniformType::IVec3),
            "ivec4" => Some(UniformType::IVec4),
            "float" => Some(UniformType::Float),
            "vec2" => Some(UniformType::Vec2),
            "vec3" => Some(UniformType::Vec3),
            "vec4" => Some(UniformType::Vec4),
            "mat4" => Some(UniformType::Mat4),
            "sampler2D" => Some(UniformType::Sampler2D),
            _ => None,
        }
    }
}

impl RenderDevice for MockDevice {
    fn create_buffer(&self, kind: BufferKind) -> Result<BufferHandle> {
        let handle = BufferHandle(self.next_id());
        self.record(DeviceCall::CreateBuffer { kind, handle });
        Ok(handle)
    }

    fn upload_buffer(&self, handle: BufferHandle, kind: BufferKind, data: &[u8]) -> Result<()> {
        self.record(DeviceCall::UploadBuffer {
            handle,
            kind,
            size_bytes: data.len(),
        });
        Ok(())
    }

    fn delete_buffer(&self, handle: BufferHandle) {
        self.record(DeviceCall::DeleteBuffer(handle));
    }

    fn create_texture_2d(
        &self,
        width: u32,
        height: u32,
        format: TextureFormat,
        data: Option<&[u8]>,
        image_format: ImageFormat,
        pixel_type: ImagePixelType,
    ) -> Result<TextureHandle> {
        let handle = TextureHandle(self.next_id());
        self.record(DeviceCall::CreateTexture2D {
            handle,
            width,
            height,
            format,
            has_data: data.is_some(),
            image_format,
            pixel_type,
        });
        Ok(handle)
    }

    fn delete_texture(&self, handle: TextureHandle) {
        self.record(DeviceCall::DeleteTexture(handle));
    }

    fn apply_sampler(&self, handle: TextureHandle, sampler: &SamplerDesc) -> Result<()> {
        self.record(DeviceCall::ApplySampler {
            texture: handle,
            desc: *sampler,
        });
        Ok(())
    }

    fn create_render_buffer(
        &self,
        format: RenderBufferFormat,
        width: u32,
        height: u32,
    ) -> Result<RenderBufferHandle> {
        let handle = RenderBufferHandle(self.next_id());
        self.record(DeviceCall::CreateRenderBuffer {
            handle,
            format,
            width,
            height,
        });
        Ok(handle)
    }

    fn delete_render_buffer(&self, handle: RenderBufferHandle) {
        self.record(DeviceCall::DeleteRenderBuffer(handle));
    }

    fn create_program(
        &self,
        sources: &ShaderStageSources,
    ) -> Result<(ProgramHandle, Vec<UniformDesc>)> {
        if let Some(log) = self.compile_error.borrow().as_ref() {
            return Err(Error::ShaderCompilation(log.clone()));
        }
        let handle = ProgramHandle(self.next_id());
        self.record(DeviceCall::CreateProgram(handle));
        Ok((handle, Self::reflect(sources)))
    }

    fn delete_program(&self, handle: ProgramHandle) {
        self.record(DeviceCall::DeleteProgram(handle));
    }

    fn create_framebuffer(&self) -> Result<FramebufferHandle> {
        let handle = FramebufferHandle(self.next_id());
        self.record(DeviceCall::CreateFramebuffer(handle));
        Ok(handle)
    }

    fn delete_framebuffer(&self, handle: FramebufferHandle) {
        self.record(DeviceCall::DeleteFramebuffer(handle));
    }

    fn attach_texture(
        &self,
        framebuffer: FramebufferHandle,
        slot: AttachmentSlot,
        texture: TextureHandle,
    ) -> Result<()> {
        self.record(DeviceCall::AttachTexture {
            framebuffer,
            slot,
            texture,
        });
        Ok(())
    }

    fn attach_render_buffer(
        &self,
        framebuffer: FramebufferHandle,
        slot: AttachmentSlot,
        render_buffer: RenderBufferHandle,
    ) -> Result<()> {
        self.record(DeviceCall::AttachRenderBuffer {
            framebuffer,
            slot,
            render_buffer,
        });
        Ok(())
    }

    fn framebuffer_status(&self, _framebuffer: FramebufferHandle) -> FramebufferStatus {
        self.framebuffer_status.get()
    }

    fn set_draw_buffers(
        &self,
        framebuffer: FramebufferHandle,
        slots: &[AttachmentSlot],
    ) -> Result<()> {
        self.record(DeviceCall::SetDrawBuffers {
            framebuffer,
            slots: slots.to_vec(),
        });
        Ok(())
    }

    fn apply_blend(&self, state: &BlendState) {
        self.record(DeviceCall::ApplyBlend(*state));
    }

    fn apply_cull(&self, state: &CullState) {
        self.record(DeviceCall::ApplyCull(*state));
    }

    fn apply_depth(&self, state: &DepthState) {
        self.record(DeviceCall::ApplyDepth(*state));
    }

    fn apply_rasterizer(&self, state: &RasterizerState) {
        self.record(DeviceCall::ApplyRasterizer(*state));
    }

    fn apply_stencil(&self, state: &StencilState) {
        self.record(DeviceCall::ApplyStencil(*state));
    }

    fn set_viewport(&self, x: i32, y: i32, width: u32, height: u32) {
        self.record(DeviceCall::SetViewport {
            x,
            y,
            width,
            height,
        });
    }

    fn bind_framebuffer(&self, framebuffer: FramebufferHandle) {
        self.record(DeviceCall::BindFramebuffer(framebuffer));
    }

    fn use_program(&self, program: ProgramHandle) {
        self.record(DeviceCall::UseProgram(program));
    }

    fn set_uniform(
        &self,
        program: ProgramHandle,
        location: i32,
        value: &UniformValue,
    ) -> Result<()> {
        self.record(DeviceCall::SetUniform {
            program,
            location,
            value: *value,
        });
        Ok(())
    }

    fn bind_texture_unit(&self, unit: u32, texture: TextureHandle) {
        self.record(DeviceCall::BindTextureUnit { unit, texture });
    }

    fn bind_vertex_layout(&self, buffer: BufferHandle, layout: &VertexLayout) -> Result<()> {
        self.record(DeviceCall::BindVertexLayout {
            buffer,
            layout: layout.clone(),
        });
        Ok(())
    }

    fn draw_triangles(&self, vertex_count: u32) {
        self.record(DeviceCall::DrawTriangles { vertex_count });
    }

    fn draw_indexed_triangles(&self, index_buffer: BufferHandle, index_count: u32) {
        self.record(DeviceCall::DrawIndexedTriangles {
            index_buffer,
            index_count,
        });
    }

    fn clear(&self, color: Vec4, depth: f32, stencil: i32) {
        self.record(DeviceCall::Clear {
            color,
            depth,
            stencil,
        });
    }
}
