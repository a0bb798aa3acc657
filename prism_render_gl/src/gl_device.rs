//! OpenGL device
//!
//! [`GlDevice`] implements [`RenderDevice`] over a [`glow::Context`]. Opaque
//! core handles map to native GL objects through interior handle tables; the
//! device lives on the thread that owns the GL context and is shared there
//! via `Rc`.

use std::cell::{Cell, RefCell};

use glow::HasContext;
use rustc_hash::FxHashMap;

use prism_render::error::{Error, Result};
use prism_render::renderer::device::{
    BufferHandle, BufferKind, FramebufferHandle, FramebufferStatus, ProgramHandle,
    RenderBufferHandle, RenderDevice, TextureHandle,
};
use prism_render::renderer::geometry::VertexLayout;
use prism_render::renderer::render_target::AttachmentSlot;
use prism_render::renderer::shader::{ShaderStageSources, UniformDesc, UniformValue};
use prism_render::renderer::state::{
    BlendState, CullState, DepthState, FillMode, RasterizerState, StencilState,
};
use prism_render::renderer::texture::{
    ImageFormat, ImagePixelType, RenderBufferFormat, SamplerDesc, TextureFormat,
};
use prism_render::{render_bail, render_debug, render_error, render_info, render_trace};

use crate::translate;

const SOURCE: &str = "prism::gl::GlDevice";

struct ProgramEntry {
    program: glow::Program,
    /// Reflected slot index to native uniform location
    locations: FxHashMap<i32, glow::UniformLocation>,
}

/// [`RenderDevice`] implementation over an OpenGL 3.3+ core context
pub struct GlDevice {
    gl: glow::Context,
    vao: glow::VertexArray,
    next_id: Cell<u64>,
    buffers: RefCell<FxHashMap<u64, glow::Buffer>>,
    textures: RefCell<FxHashMap<u64, glow::Texture>>,
    render_buffers: RefCell<FxHashMap<u64, glow::Renderbuffer>>,
    programs: RefCell<FxHashMap<u64, ProgramEntry>>,
    framebuffers: RefCell<FxHashMap<u64, glow::Framebuffer>>,
}

impl GlDevice {
    /// Wrap an already-current GL context
    ///
    /// Creates and binds the single vertex array object a core profile
    /// requires for vertex specification.
    pub fn new(gl: glow::Context) -> Result<Self> {
        let vao = unsafe {
            let vao = match gl.create_vertex_array() {
                Ok(vao) => vao,
                Err(e) => {
                    render_bail!(SOURCE, InitializationFailed, "Failed to create VAO: {}", e);
                }
            };
            gl.bind_vertex_array(Some(vao));
            vao
        };

        render_info!(SOURCE, "Initialized OpenGL device");

        Ok(Self {
            gl,
            vao,
            next_id: Cell::new(1),
            buffers: RefCell::new(FxHashMap::default()),
            textures: RefCell::new(FxHashMap::default()),
            render_buffers: RefCell::new(FxHashMap::default()),
            programs: RefCell::new(FxHashMap::default()),
            framebuffers: RefCell::new(FxHashMap::default()),
        })
    }

    fn next_id(&self) -> u64 {
        let id = self.next_id.get();
        self.next_id.set(id + 1);
        id
    }

    fn buffer(&self, handle: BufferHandle) -> Result<glow::Buffer> {
        match self.buffers.borrow().get(&handle.0) {
            Some(&buffer) => Ok(buffer),
            None => render_bail!(SOURCE, InvalidResource, "Unknown buffer {:?}", handle),
        }
    }

    fn texture(&self, handle: TextureHandle) -> Result<glow::Texture> {
        match self.textures.borrow().get(&handle.0) {
            Some(&texture) => Ok(texture),
            None => render_bail!(SOURCE, InvalidResource, "Unknown texture {:?}", handle),
        }
    }

    fn framebuffer(&self, handle: FramebufferHandle) -> Result<Option<glow::Framebuffer>> {
        if handle.is_default() {
            return Ok(None);
        }
        match self.framebuffers.borrow().get(&handle.0) {
            Some(&framebuffer) => Ok(Some(framebuffer)),
            None => render_bail!(SOURCE, InvalidResource, "Unknown framebuffer {:?}", handle),
        }
    }

    fn buffer_target(kind: BufferKind) -> u32 {
        match kind {
            BufferKind::Vertex => glow::ARRAY_BUFFER,
            BufferKind::Index => glow::ELEMENT_ARRAY_BUFFER,
        }
    }

    fn compile_stage(&self, program: glow::Program, stage: u32, source: &str) -> Result<()> {
        unsafe {
            let shader = match self.gl.create_shader(stage) {
                Ok(shader) => shader,
                Err(e) => {
                    render_bail!(SOURCE, BackendError, "Failed to create shader object: {}", e);
                }
            };
            self.gl.shader_source(shader, source);
            self.gl.compile_shader(shader);

            let log = self.gl.get_shader_info_log(shader);
            if !self.gl.get_shader_compile_status(shader) {
                self.gl.delete_shader(shader);
                render_error!(SOURCE, "Stage 0x{:X} failed to compile: {}", stage, log);
                return Err(Error::ShaderCompilation(log));
            }
            if !log.is_empty() {
                render_debug!(SOURCE, "Stage 0x{:X} info log: {}", stage, log);
            }

            self.gl.attach_shader(program, shader);
            // flagged for deletion; freed with the program object
            self.gl.delete_shader(shader);
        }
        Ok(())
    }

    /// Enumerate active uniforms and cache their native locations
    fn reflect_program(&self, program: glow::Program) -> Result<(Vec<UniformDesc>, FxHashMap<i32, glow::UniformLocation>)> {
        let mut uniforms = Vec::new();
        let mut locations = FxHashMap::default();

        unsafe {
            let count = self.gl.get_active_uniforms(program);
            for i in 0..count {
                let Some(active) = self.gl.get_active_uniform(program, i) else {
                    continue;
                };
                let Some(ty) = translate::uniform_type(active.utype) else {
                    render_bail!(
                        SOURCE,
                        InvalidResource,
                        "Uniform '{}' has unsupported type 0x{:X}",
                        active.name,
                        active.utype
                    );
                };
                let Some(location) = self.gl.get_uniform_location(program, &active.name) else {
                    render_bail!(
                        SOURCE,
                        BackendError,
                        "No location for active uniform '{}'",
                        active.name
                    );
                };

                let slot = uniforms.len() as i32;
                locations.insert(slot, location);
                uniforms.push(UniformDesc {
                    name: active.name,
                    ty,
                    location: slot,
                });
            }
        }

        Ok((uniforms, locations))
    }
}

impl RenderDevice for GlDevice {
    // ----- Buffers -----

    fn create_buffer(&self, kind: BufferKind) -> Result<BufferHandle> {
        let buffer = unsafe {
            match self.gl.create_buffer() {
                Ok(buffer) => buffer,
                Err(e) => {
                    render_bail!(SOURCE, BackendError, "Failed to create buffer: {}", e);
                }
            }
        };

        let handle = BufferHandle(self.next_id());
        self.buffers.borrow_mut().insert(handle.0, buffer);
        render_trace!(SOURCE, "Created {:?} buffer {:?}", kind, handle);
        Ok(handle)
    }

    fn upload_buffer(&self, handle: BufferHandle, kind: BufferKind, data: &[u8]) -> Result<()> {
        let buffer = self.buffer(handle)?;
        let target = Self::buffer_target(kind);
        unsafe {
            self.gl.bind_buffer(target, Some(buffer));
            self.gl.buffer_data_u8_slice(target, data, glow::STATIC_DRAW);
            self.gl.bind_buffer(target, None);
        }
        Ok(())
    }

    fn delete_buffer(&self, handle: BufferHandle) {
        if let Some(buffer) = self.buffers.borrow_mut().remove(&handle.0) {
            unsafe { self.gl.delete_buffer(buffer) };
            render_trace!(SOURCE, "Destroyed buffer {:?}", handle);
        }
    }

    // ----- Textures and render buffers -----

    fn create_texture_2d(
        &self,
        width: u32,
        height: u32,
        format: TextureFormat,
        data: Option<&[u8]>,
        image_format: ImageFormat,
        pixel_type: ImagePixelType,
    ) -> Result<TextureHandle> {
        let texture = unsafe {
            let texture = match self.gl.create_texture() {
                Ok(texture) => texture,
                Err(e) => {
                    render_bail!(SOURCE, BackendError, "Failed to create texture: {}", e);
                }
            };
            self.gl.bind_texture(glow::TEXTURE_2D, Some(texture));
            self.gl.tex_image_2d(
                glow::TEXTURE_2D,
                0,
                translate::texture_internal_format(format),
                width as i32,
                height as i32,
                0,
                translate::image_format(image_format),
                translate::pixel_type(pixel_type),
                data,
            );
            self.gl
                .tex_parameter_i32(glow::TEXTURE_2D, glow::TEXTURE_MIN_FILTER, glow::NEAREST as i32);
            self.gl
                .tex_parameter_i32(glow::TEXTURE_2D, glow::TEXTURE_MAG_FILTER, glow::NEAREST as i32);
            self.gl.bind_texture(glow::TEXTURE_2D, None);
            texture
        };

        let handle = TextureHandle(self.next_id());
        self.textures.borrow_mut().insert(handle.0, texture);
        render_trace!(SOURCE, "Created {}x{} {:?} texture {:?}", width, height, format, handle);
        Ok(handle)
    }

    fn delete_texture(&self, handle: TextureHandle) {
        if let Some(texture) = self.textures.borrow_mut().remove(&handle.0) {
            unsafe { self.gl.delete_texture(texture) };
            render_trace!(SOURCE, "Destroyed texture {:?}", handle);
        }
    }

    fn apply_sampler(&self, handle: TextureHandle, sampler: &SamplerDesc) -> Result<()> {
        let texture = self.texture(handle)?;
        unsafe {
            self.gl.bind_texture(glow::TEXTURE_2D, Some(texture));
            self.gl.tex_parameter_i32(
                glow::TEXTURE_2D,
                glow::TEXTURE_WRAP_S,
                translate::wrap_mode(sampler.wrap_s),
            );
            self.gl.tex_parameter_i32(
                glow::TEXTURE_2D,
                glow::TEXTURE_WRAP_T,
                translate::wrap_mode(sampler.wrap_t),
            );
            self.gl.tex_parameter_i32(
                glow::TEXTURE_2D,
                glow::TEXTURE_MIN_FILTER,
                translate::filter_mode(sampler.min_filter),
            );
            self.gl.tex_parameter_i32(
                glow::TEXTURE_2D,
                glow::TEXTURE_MAG_FILTER,
                translate::filter_mode(sampler.mag_filter),
            );
        }
        Ok(())
    }

    fn create_render_buffer(
        &self,
        format: RenderBufferFormat,
        width: u32,
        height: u32,
    ) -> Result<RenderBufferHandle> {
        let render_buffer = unsafe {
            let rb = match self.gl.create_renderbuffer() {
                Ok(rb) => rb,
                Err(e) => {
                    render_bail!(SOURCE, BackendError, "Failed to create render buffer: {}", e);
                }
            };
            self.gl.bind_renderbuffer(glow::RENDERBUFFER, Some(rb));
            self.gl.renderbuffer_storage(
                glow::RENDERBUFFER,
                translate::render_buffer_format(format),
                width as i32,
                height as i32,
            );
            self.gl.bind_renderbuffer(glow::RENDERBUFFER, None);
            rb
        };

        let handle = RenderBufferHandle(self.next_id());
        self.render_buffers.borrow_mut().insert(handle.0, render_buffer);
        Ok(handle)
    }

    fn delete_render_buffer(&self, handle: RenderBufferHandle) {
        if let Some(rb) = self.render_buffers.borrow_mut().remove(&handle.0) {
            unsafe { self.gl.delete_renderbuffer(rb) };
        }
    }

    // ----- Shader programs -----

    fn create_program(
        &self,
        sources: &ShaderStageSources,
    ) -> Result<(ProgramHandle, Vec<UniformDesc>)> {
        let program = unsafe {
            match self.gl.create_program() {
                Ok(program) => program,
                Err(e) => {
                    render_bail!(SOURCE, BackendError, "Failed to create program: {}", e);
                }
            }
        };

        let build = (|| -> Result<(Vec<UniformDesc>, FxHashMap<i32, glow::UniformLocation>)> {
            self.compile_stage(program, glow::VERTEX_SHADER, &sources.vertex)?;
            if let Some(source) = &sources.tess_control {
                self.compile_stage(program, glow::TESS_CONTROL_SHADER, source)?;
            }
            if let Some(source) = &sources.tess_eval {
                self.compile_stage(program, glow::TESS_EVALUATION_SHADER, source)?;
            }
            if let Some(source) = &sources.geometry {
                self.compile_stage(program, glow::GEOMETRY_SHADER, source)?;
            }
            self.compile_stage(program, glow::FRAGMENT_SHADER, &sources.fragment)?;

            unsafe {
                self.gl.link_program(program);
                let log = self.gl.get_program_info_log(program);
                if !self.gl.get_program_link_status(program) {
                    render_error!(SOURCE, "Program link failed: {}", log);
                    return Err(Error::ShaderCompilation(log));
                }
                if !log.is_empty() {
                    render_debug!(SOURCE, "Program link log: {}", log);
                }
            }

            self.reflect_program(program)
        })();

        let (uniforms, locations) = match build {
            Ok(result) => result,
            Err(e) => {
                unsafe { self.gl.delete_program(program) };
                return Err(e);
            }
        };

        let handle = ProgramHandle(self.next_id());
        self.programs
            .borrow_mut()
            .insert(handle.0, ProgramEntry { program, locations });
        render_trace!(SOURCE, "Created program {:?} ({} uniforms)", handle, uniforms.len());
        Ok((handle, uniforms))
    }

    fn delete_program(&self, handle: ProgramHandle) {
        if let Some(entry) = self.programs.borrow_mut().remove(&handle.0) {
            unsafe { self.gl.delete_program(entry.program) };
            render_trace!(SOURCE, "Destroyed program {:?}", handle);
        }
    }

    // ----- Framebuffers -----

    fn create_framebuffer(&self) -> Result<FramebufferHandle> {
        let framebuffer = unsafe {
            match self.gl.create_framebuffer() {
                Ok(framebuffer) => framebuffer,
                Err(e) => {
                    render_bail!(SOURCE, BackendError, "Failed to create framebuffer: {}", e);
                }
            }
        };

        let handle = FramebufferHandle(self.next_id());
        self.framebuffers.borrow_mut().insert(handle.0, framebuffer);
        Ok(handle)
    }

    fn delete_framebuffer(&self, handle: FramebufferHandle) {
        if let Some(framebuffer) = self.framebuffers.borrow_mut().remove(&handle.0) {
            unsafe { self.gl.delete_framebuffer(framebuffer) };
        }
    }

    fn attach_texture(
        &self,
        framebuffer: FramebufferHandle,
        slot: AttachmentSlot,
        texture: TextureHandle,
    ) -> Result<()> {
        let fb = self.framebuffer(framebuffer)?;
        if fb.is_none() {
            render_bail!(SOURCE, InvalidResource, "Cannot attach to the default framebuffer");
        }
        let texture = self.texture(texture)?;

        unsafe {
            self.gl.bind_framebuffer(glow::FRAMEBUFFER, fb);
            self.gl.framebuffer_texture_2d(
                glow::FRAMEBUFFER,
                translate::attachment_point(slot),
                glow::TEXTURE_2D,
                Some(texture),
                0,
            );
        }
        Ok(())
    }

    fn attach_render_buffer(
        &self,
        framebuffer: FramebufferHandle,
        slot: AttachmentSlot,
        render_buffer: RenderBufferHandle,
    ) -> Result<()> {
        let fb = self.framebuffer(framebuffer)?;
        if fb.is_none() {
            render_bail!(SOURCE, InvalidResource, "Cannot attach to the default framebuffer");
        }
        let rb = match self.render_buffers.borrow().get(&render_buffer.0) {
            Some(&rb) => rb,
            None => {
                render_bail!(SOURCE, InvalidResource, "Unknown render buffer {:?}", render_buffer);
            }
        };

        unsafe {
            self.gl.bind_framebuffer(glow::FRAMEBUFFER, fb);
            self.gl.framebuffer_renderbuffer(
                glow::FRAMEBUFFER,
                translate::attachment_point(slot),
                glow::RENDERBUFFER,
                Some(rb),
            );
        }
        Ok(())
    }

    fn framebuffer_status(&self, framebuffer: FramebufferHandle) -> FramebufferStatus {
        let fb = match self.framebuffer(framebuffer) {
            Ok(fb) => fb,
            Err(_) => return FramebufferStatus::MissingAttachment,
        };
        unsafe {
            self.gl.bind_framebuffer(glow::FRAMEBUFFER, fb);
            translate::framebuffer_status(self.gl.check_framebuffer_status(glow::FRAMEBUFFER))
        }
    }

    fn set_draw_buffers(
        &self,
        framebuffer: FramebufferHandle,
        slots: &[AttachmentSlot],
    ) -> Result<()> {
        let fb = self.framebuffer(framebuffer)?;

        let mut buffers = Vec::with_capacity(slots.len());
        for slot in slots {
            if slot.color_index().is_none() {
                render_bail!(
                    SOURCE,
                    InvalidResource,
                    "Draw buffer list contains non-color slot {:?}",
                    slot
                );
            }
            buffers.push(translate::attachment_point(*slot));
        }

        unsafe {
            self.gl.bind_framebuffer(glow::FRAMEBUFFER, fb);
            self.gl.draw_buffers(&buffers);
        }
        Ok(())
    }

    // ----- Fixed-function state -----

    fn apply_blend(&self, state: &BlendState) {
        unsafe {
            if state.enabled {
                self.gl.enable(glow::BLEND);
                self.gl
                    .blend_equation(translate::blend_equation(state.equation));
                self.gl.blend_func(
                    translate::blend_factor(state.src_factor),
                    translate::blend_factor(state.dst_factor),
                );
            } else {
                self.gl.disable(glow::BLEND);
            }
        }
    }

    fn apply_cull(&self, state: &CullState) {
        unsafe {
            match translate::cull_mode(state.mode) {
                Some(mode) => {
                    self.gl.enable(glow::CULL_FACE);
                    self.gl.cull_face(mode);
                    self.gl.front_face(translate::front_face(state.front_face));
                }
                None => self.gl.disable(glow::CULL_FACE),
            }
        }
    }

    fn apply_depth(&self, state: &DepthState) {
        unsafe {
            if state.test_enabled {
                self.gl.enable(glow::DEPTH_TEST);
                self.gl.depth_func(translate::compare_func(state.func));
            } else {
                self.gl.disable(glow::DEPTH_TEST);
            }
            self.gl.depth_mask(state.write_enabled);
        }
    }

    fn apply_rasterizer(&self, state: &RasterizerState) {
        unsafe {
            self.gl
                .polygon_mode(glow::FRONT_AND_BACK, translate::fill_mode(state.fill_mode));
            if state.fill_mode == FillMode::Wireframe {
                self.gl.line_width(state.line_width);
            }
        }
    }

    fn apply_stencil(&self, state: &StencilState) {
        unsafe {
            if state.enabled {
                self.gl.enable(glow::STENCIL_TEST);
                self.gl.stencil_func(
                    translate::compare_func(state.func),
                    state.reference as i32,
                    state.read_mask,
                );
                self.gl.stencil_op(
                    translate::stencil_op(state.fail_op),
                    translate::stencil_op(state.depth_fail_op),
                    translate::stencil_op(state.pass_op),
                );
                self.gl.stencil_mask(state.write_mask);
            } else {
                self.gl.disable(glow::STENCIL_TEST);
            }
        }
    }

    fn set_viewport(&self, x: i32, y: i32, width: u32, height: u32) {
        unsafe {
            self.gl.viewport(x, y, width as i32, height as i32);
        }
    }

    // ----- Draw path -----

    fn bind_framebuffer(&self, framebuffer: FramebufferHandle) {
        match self.framebuffer(framebuffer) {
            Ok(fb) => unsafe { self.gl.bind_framebuffer(glow::FRAMEBUFFER, fb) },
            Err(_) => render_error!(SOURCE, "Cannot bind unknown framebuffer {:?}", framebuffer),
        }
    }

    fn use_program(&self, program: ProgramHandle) {
        match self.programs.borrow().get(&program.0) {
            Some(entry) => unsafe { self.gl.use_program(Some(entry.program)) },
            None => render_error!(SOURCE, "Cannot activate unknown program {:?}", program),
        }
    }

    fn set_uniform(
        &self,
        program: ProgramHandle,
        location: i32,
        value: &UniformValue,
    ) -> Result<()> {
        let programs = self.programs.borrow();
        let entry = match programs.get(&program.0) {
            Some(entry) => entry,
            None => render_bail!(SOURCE, InvalidResource, "Unknown program {:?}", program),
        };
        let Some(native) = entry.locations.get(&location) else {
            // inactive location, nothing to upload
            return Ok(());
        };
        let loc = Some(native);

        unsafe {
            match value {
                UniformValue::Int(v) => self.gl.uniform_1_i32(loc, *v),
                UniformValue::IVec2(v) => self.gl.uniform_2_i32(loc, v.x, v.y),
                UniformValue::IVec3(v) => self.gl.uniform_3_i32(loc, v.x, v.y, v.z),
                UniformValue::IVec4(v) => self.gl.uniform_4_i32(loc, v.x, v.y, v.z, v.w),
                UniformValue::Float(v) => self.gl.uniform_1_f32(loc, *v),
                UniformValue::Vec2(v) => self.gl.uniform_2_f32(loc, v.x, v.y),
                UniformValue::Vec3(v) => self.gl.uniform_3_f32(loc, v.x, v.y, v.z),
                UniformValue::Vec4(v) => self.gl.uniform_4_f32(loc, v.x, v.y, v.z, v.w),
                UniformValue::Mat4(v) => {
                    self.gl
                        .uniform_matrix_4_f32_slice(loc, false, &v.to_cols_array())
                }
                UniformValue::Sampler(_) => {
                    render_bail!(
                        SOURCE,
                        InvalidResource,
                        "Sampler values bind through texture units, not uniform upload"
                    );
                }
            }
        }
        Ok(())
    }

    fn bind_texture_unit(&self, unit: u32, texture: TextureHandle) {
        let native = self.textures.borrow().get(&texture.0).copied();
        unsafe {
            self.gl.active_texture(glow::TEXTURE0 + unit);
            self.gl.bind_texture(glow::TEXTURE_2D, native);
        }
    }

    fn bind_vertex_layout(&self, buffer: BufferHandle, layout: &VertexLayout) -> Result<()> {
        let native = self.buffer(buffer)?;
        unsafe {
            self.gl.bind_buffer(glow::ARRAY_BUFFER, Some(native));
            for (i, component) in layout.components.iter().enumerate() {
                let index = i as u32;
                self.gl.enable_vertex_attrib_array(index);
                if component.ty.is_integer() {
                    self.gl.vertex_attrib_pointer_i32(
                        index,
                        component.ty.arity() as i32,
                        translate::vertex_component_type(component.ty),
                        layout.stride as i32,
                        component.offset as i32,
                    );
                } else {
                    self.gl.vertex_attrib_pointer_f32(
                        index,
                        component.ty.arity() as i32,
                        translate::vertex_component_type(component.ty),
                        false,
                        layout.stride as i32,
                        component.offset as i32,
                    );
                }
            }
        }
        Ok(())
    }

    fn draw_triangles(&self, vertex_count: u32) {
        unsafe {
            self.gl.draw_arrays(glow::TRIANGLES, 0, vertex_count as i32);
        }
    }

    fn draw_indexed_triangles(&self, index_buffer: BufferHandle, index_count: u32) {
        let native = match self.buffer(index_buffer) {
            Ok(native) => native,
            Err(_) => return,
        };
        unsafe {
            self.gl
                .bind_buffer(glow::ELEMENT_ARRAY_BUFFER, Some(native));
            self.gl
                .draw_elements(glow::TRIANGLES, index_count as i32, glow::UNSIGNED_INT, 0);
        }
    }

    // ----- Clear -----

    fn clear(&self, color: glam::Vec4, depth: f32, stencil: i32) {
        unsafe {
            self.gl.clear_color(color.x, color.y, color.z, color.w);
            self.gl.clear_depth_f64(depth as f64);
            self.gl.clear_stencil(stencil);
            self.gl.clear(
                glow::COLOR_BUFFER_BIT | glow::DEPTH_BUFFER_BIT | glow::STENCIL_BUFFER_BIT,
            );
        }
    }
}

impl Drop for GlDevice {
    fn drop(&mut self) {
        unsafe {
            self.gl.delete_vertex_array(self.vao);
        }
        render_info!(SOURCE, "Destroyed OpenGL device");
    }
}
