//! Vertex and index buffers
//!
//! Thin uniquely-owned wrappers over backend buffer objects. Upload is a
//! full replace; there is no sub-range update. The device object is
//! destroyed when the wrapper is dropped.

use std::rc::Rc;

use bytemuck::Pod;

use crate::error::Result;
use crate::renderer::device::{BufferHandle, BufferKind, RenderDevice};

/// A vertex buffer owning its device object
///
/// Created through [`crate::renderer::Renderer::create_vertex_buffer`].
pub struct VertexBuffer {
    device: Rc<dyn RenderDevice>,
    handle: BufferHandle,
    size_bytes: usize,
}

impl VertexBuffer {
    pub(crate) fn new(device: Rc<dyn RenderDevice>) -> Result<Self> {
        let handle = device.create_buffer(BufferKind::Vertex)?;
        Ok(Self {
            device,
            handle,
            size_bytes: 0,
        })
    }

    /// Replace the full buffer contents with the given vertices
    pub fn upload<V: Pod>(&mut self, vertices: &[V]) -> Result<()> {
        let bytes: &[u8] = bytemuck::cast_slice(vertices);
        self.device
            .upload_buffer(self.handle, BufferKind::Vertex, bytes)?;
        self.size_bytes = bytes.len();
        Ok(())
    }

    /// Backend handle
    pub fn handle(&self) -> BufferHandle {
        self.handle
    }

    /// Size of the last upload in bytes
    pub fn size_bytes(&self) -> usize {
        self.size_bytes
    }
}

impl Drop for VertexBuffer {
    fn drop(&mut self) {
        self.device.delete_buffer(self.handle);
    }
}

/// An index buffer owning its device object
///
/// Indices are 32-bit. Created through
/// [`crate::renderer::Renderer::create_index_buffer`].
pub struct IndexBuffer {
    device: Rc<dyn RenderDevice>,
    handle: BufferHandle,
    index_count: usize,
}

impl IndexBuffer {
    pub(crate) fn new(device: Rc<dyn RenderDevice>) -> Result<Self> {
        let handle = device.create_buffer(BufferKind::Index)?;
        Ok(Self {
            device,
            handle,
            index_count: 0,
        })
    }

    /// Replace the full buffer contents with the given indices
    pub fn upload(&mut self, indices: &[u32]) -> Result<()> {
        self.device.upload_buffer(
            self.handle,
            BufferKind::Index,
            bytemuck::cast_slice(indices),
        )?;
        self.index_count = indices.len();
        Ok(())
    }

    /// Backend handle
    pub fn handle(&self) -> BufferHandle {
        self.handle
    }

    /// Number of indices in the last upload
    pub fn index_count(&self) -> usize {
        self.index_count
    }
}

impl Drop for IndexBuffer {
    fn drop(&mut self) {
        self.device.delete_buffer(self.handle);
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
#[path = "buffer_tests.rs"]
mod tests;
