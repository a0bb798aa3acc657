//! Renderer facade
//!
//! The [`Renderer`] is the single entry point of the crate: a resource
//! factory plus the `clear` and `draw` operations. `draw` translates one
//! (target, shader data, state set, geometry) tuple into the full backend
//! call sequence, in a fixed order, re-specifying every state group on every
//! invocation so nothing leaks from one draw to the next.

use std::rc::Rc;

use glam::Vec4;

use crate::error::Result;
use crate::render_info;
use crate::renderer::buffer::{IndexBuffer, VertexBuffer};
use crate::renderer::device::RenderDevice;
use crate::renderer::geometry::Geometry;
use crate::renderer::render_target::RenderTarget;
use crate::renderer::shader::{Shader, ShaderData, ShaderStageSources, UniformValue};
use crate::renderer::state::StateSet;
use crate::renderer::texture::{
    ImageFormat, ImagePixelType, RenderBuffer, RenderBufferFormat, Texture2D, TextureFormat,
};

const SOURCE: &str = "prism::Renderer";

/// Resource factory and draw dispatcher over a [`RenderDevice`]
///
/// Owns the default render target standing for the window back buffer. All
/// resources are created through the factory methods here and share the
/// renderer's device.
pub struct Renderer {
    device: Rc<dyn RenderDevice>,
    default_target: RenderTarget,
}

impl Renderer {
    /// Create a renderer over `device` with a back buffer of the given extent
    pub fn new(device: Rc<dyn RenderDevice>, width: u32, height: u32) -> Self {
        let default_target = RenderTarget::default_target(Rc::clone(&device), width, height);
        render_info!(SOURCE, "Initialized renderer ({}x{} back buffer)", width, height);
        Self {
            device,
            default_target,
        }
    }

    /// The backend device
    pub fn device(&self) -> &Rc<dyn RenderDevice> {
        &self.device
    }

    /// The target standing for the window back buffer
    pub fn default_target(&self) -> &RenderTarget {
        &self.default_target
    }

    /// Track a window resize in the default target's extent
    pub fn resize_default_target(&mut self, width: u32, height: u32) {
        self.default_target.set_extent(width, height);
    }

    // ===== RESOURCE FACTORY =====

    /// Create an empty vertex buffer
    pub fn create_vertex_buffer(&self) -> Result<VertexBuffer> {
        VertexBuffer::new(Rc::clone(&self.device))
    }

    /// Create an empty index buffer
    pub fn create_index_buffer(&self) -> Result<IndexBuffer> {
        IndexBuffer::new(Rc::clone(&self.device))
    }

    /// Create a 2D texture, optionally with initial pixel data
    pub fn create_texture_2d(
        &self,
        width: u32,
        height: u32,
        format: TextureFormat,
        data: Option<&[u8]>,
        image_format: ImageFormat,
        pixel_type: ImagePixelType,
    ) -> Result<Texture2D> {
        Texture2D::new(
            Rc::clone(&self.device),
            width,
            height,
            format,
            data,
            image_format,
            pixel_type,
        )
    }

    /// Create a render buffer
    pub fn create_render_buffer(
        &self,
        width: u32,
        height: u32,
        format: RenderBufferFormat,
    ) -> Result<RenderBuffer> {
        RenderBuffer::new(Rc::clone(&self.device), width, height, format)
    }

    /// Create an empty render target
    pub fn create_render_target(&self, width: u32, height: u32) -> Result<RenderTarget> {
        RenderTarget::new(Rc::clone(&self.device), width, height)
    }

    /// Compile and link a shader program
    ///
    /// Vertex and fragment sources are mandatory; tessellation and geometry
    /// stages participate only when supplied.
    pub fn create_shader(&self, sources: &ShaderStageSources) -> Result<Rc<Shader>> {
        Shader::new(Rc::clone(&self.device), sources)
    }

    // ===== OPERATIONS =====

    /// Clear a target's color, depth and stencil buffers
    ///
    /// Depth clears to 1.0 and stencil to 0.
    pub fn clear(&self, target: &RenderTarget, color: Vec4) -> Result<()> {
        self.clear_with(target, color, 1.0, 0)
    }

    /// Clear with explicit depth and stencil values
    pub fn clear_with(
        &self,
        target: &RenderTarget,
        color: Vec4,
        depth: f32,
        stencil: i32,
    ) -> Result<()> {
        self.device
            .set_viewport(0, 0, target.width(), target.height());
        target.activate()?;
        self.device.clear(color, depth, stencil);
        Ok(())
    }

    /// Draw one geometry into a target
    ///
    /// Applies, in order: blend, cull, depth, rasterizer and stencil state,
    /// the resolved viewport, target activation (with draw buffers), program
    /// activation, every uniform slot (samplers bound to sequential texture
    /// units starting at 0), the vertex layout, and finally the draw call.
    /// Triangle lists only.
    pub fn draw(
        &self,
        target: &RenderTarget,
        data: &ShaderData,
        states: &StateSet,
        geometry: &Geometry,
    ) -> Result<()> {
        self.device.apply_blend(&states.blend);
        self.device.apply_cull(&states.cull);
        self.device.apply_depth(&states.depth);
        self.device.apply_rasterizer(&states.rasterizer);
        self.device.apply_stencil(&states.stencil);

        let (x, y, width, height) = states.viewport.resolve(target.width(), target.height());
        self.device.set_viewport(x, y, width, height);

        target.activate()?;

        let program = data.shader().program();
        self.device.use_program(program);

        let mut texture_unit = 0u32;
        for (desc, value) in data.slots() {
            match value {
                UniformValue::Sampler(sampler) => {
                    self.device.bind_texture_unit(texture_unit, sampler.texture);
                    self.device.apply_sampler(sampler.texture, &sampler.desc)?;
                    self.device.set_uniform(
                        program,
                        desc.location,
                        &UniformValue::Int(texture_unit as i32),
                    )?;
                    texture_unit += 1;
                }
                _ => {
                    self.device.set_uniform(program, desc.location, value)?;
                }
            }
        }

        self.device
            .bind_vertex_layout(geometry.vertices.handle(), &geometry.layout)?;

        let count = geometry.num_primitives * 3;
        match geometry.indices {
            Some(indices) => self.device.draw_indexed_triangles(indices.handle(), count),
            None => self.device.draw_triangles(count),
        }

        Ok(())
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
#[path = "renderer_tests.rs"]
mod tests;
