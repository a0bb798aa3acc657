//! Geometry descriptors and vertex layouts
//!
//! A [`Geometry`] bundles everything one draw call consumes: a borrowed
//! vertex buffer, an optional borrowed index buffer, the vertex layout, and
//! the triangle count. It owns nothing; the caller keeps the buffers alive
//! for as long as the geometry is drawn.

use bytemuck::{Pod, Zeroable};

use crate::renderer::buffer::{IndexBuffer, VertexBuffer};

// ===== VERTEX LAYOUT =====

/// Data type of one vertex component
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VertexComponentType {
    Int,
    Int2,
    Int3,
    Int4,
    Float,
    Float2,
    Float3,
    Float4,
}

impl VertexComponentType {
    /// Number of elements in the component
    pub fn arity(&self) -> u32 {
        match self {
            VertexComponentType::Int | VertexComponentType::Float => 1,
            VertexComponentType::Int2 | VertexComponentType::Float2 => 2,
            VertexComponentType::Int3 | VertexComponentType::Float3 => 3,
            VertexComponentType::Int4 | VertexComponentType::Float4 => 4,
        }
    }

    /// True for integer components
    pub fn is_integer(&self) -> bool {
        matches!(
            self,
            VertexComponentType::Int
                | VertexComponentType::Int2
                | VertexComponentType::Int3
                | VertexComponentType::Int4
        )
    }

    /// Size in bytes of the full component
    pub fn size_bytes(&self) -> u32 {
        // both element types are 4 bytes wide
        self.arity() * 4
    }
}

/// One component within a vertex
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VertexComponent {
    /// Component data type
    pub ty: VertexComponentType,
    /// Offset in bytes from the start of the vertex
    pub offset: u32,
}

/// Layout of one interleaved vertex buffer
///
/// Components are listed in shader attribute-location order; the component
/// at index `i` feeds attribute location `i`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct VertexLayout {
    /// Vertex components in attribute order
    pub components: Vec<VertexComponent>,
    /// Stride in bytes between consecutive vertices
    pub stride: u32,
}

// ===== CONCRETE VERTEX TYPES =====

/// Position-only vertex
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct VertexPos3 {
    pub position: [f32; 3],
}

impl VertexPos3 {
    pub fn layout() -> VertexLayout {
        VertexLayout {
            components: vec![VertexComponent {
                ty: VertexComponentType::Float3,
                offset: 0,
            }],
            stride: 12,
        }
    }
}

/// Position + RGBA color vertex
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct VertexPos3Color4 {
    pub position: [f32; 3],
    pub color: [f32; 4],
}

impl VertexPos3Color4 {
    pub fn layout() -> VertexLayout {
        VertexLayout {
            components: vec![
                VertexComponent {
                    ty: VertexComponentType::Float3,
                    offset: 0,
                },
                VertexComponent {
                    ty: VertexComponentType::Float4,
                    offset: 12,
                },
            ],
            stride: 28,
        }
    }
}

/// Position + texture coordinate vertex
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct VertexPos3Tex2 {
    pub position: [f32; 3],
    pub tex_coord: [f32; 2],
}

impl VertexPos3Tex2 {
    pub fn layout() -> VertexLayout {
        VertexLayout {
            components: vec![
                VertexComponent {
                    ty: VertexComponentType::Float3,
                    offset: 0,
                },
                VertexComponent {
                    ty: VertexComponentType::Float2,
                    offset: 12,
                },
            ],
            stride: 20,
        }
    }
}

/// Position + normal vertex
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct VertexPos3Nrm3 {
    pub position: [f32; 3],
    pub normal: [f32; 3],
}

impl VertexPos3Nrm3 {
    pub fn layout() -> VertexLayout {
        VertexLayout {
            components: vec![
                VertexComponent {
                    ty: VertexComponentType::Float3,
                    offset: 0,
                },
                VertexComponent {
                    ty: VertexComponentType::Float3,
                    offset: 12,
                },
            ],
            stride: 24,
        }
    }
}

// ===== GEOMETRY =====

/// Everything one draw call consumes
///
/// Borrows its buffers; `num_primitives` counts triangles. Indexed geometry
/// draws `num_primitives * 3` indices, non-indexed geometry draws
/// `num_primitives * 3` consecutive vertices.
pub struct Geometry<'a> {
    /// Vertex data
    pub vertices: &'a VertexBuffer,
    /// Index data; `None` for non-indexed drawing
    pub indices: Option<&'a IndexBuffer>,
    /// Layout of the vertex data
    pub layout: VertexLayout,
    /// Number of triangles to draw
    pub num_primitives: u32,
}

impl Geometry<'_> {
    /// True when an index buffer is present
    pub fn is_indexed(&self) -> bool {
        self.indices.is_some()
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
#[path = "geometry_tests.rs"]
mod tests;
