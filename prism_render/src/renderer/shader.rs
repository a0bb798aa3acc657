//! Shader programs and uniform data
//!
//! A [`Shader`] is a linked program plus its reflected uniform interface.
//! [`ShaderData`] is a per-drawable binding context: one typed value slot per
//! reflected uniform, set by name, validated against the declared type.
//! Sampler slots hold a [`TextureSampler`] and are consumed by the draw
//! dispatcher for texture-unit binding; all other slots upload through
//! `set_uniform`.

use std::rc::Rc;

use glam::{IVec2, IVec3, IVec4, Mat4, Vec2, Vec3, Vec4};
use rustc_hash::FxHashMap;

use crate::error::{Error, Result};
use crate::renderer::device::{ProgramHandle, RenderDevice, TextureHandle};
use crate::renderer::texture::{SamplerDesc, TextureSampler};
use crate::{render_bail, render_error, render_trace, render_warn};

const SOURCE: &str = "prism::Shader";

// ===== UNIFORM TYPES AND VALUES =====

/// Declared type of a uniform slot
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UniformType {
    Int,
    IVec2,
    IVec3,
    IVec4,
    Float,
    Vec2,
    Vec3,
    Vec4,
    /// 4x4 float matrix, column-major
    Mat4,
    /// 2D texture sampler
    Sampler2D,
}

/// A typed uniform value
///
/// One variant per [`UniformType`]; a slot only ever holds the variant
/// matching its declared type.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum UniformValue {
    Int(i32),
    IVec2(IVec2),
    IVec3(IVec3),
    IVec4(IVec4),
    Float(f32),
    Vec2(Vec2),
    Vec3(Vec3),
    Vec4(Vec4),
    Mat4(Mat4),
    Sampler(TextureSampler),
}

impl UniformValue {
    /// The [`UniformType`] this value satisfies
    pub fn uniform_type(&self) -> UniformType {
        match self {
            UniformValue::Int(_) => UniformType::Int,
            UniformValue::IVec2(_) => UniformType::IVec2,
            UniformValue::IVec3(_) => UniformType::IVec3,
            UniformValue::IVec4(_) => UniformType::IVec4,
            UniformValue::Float(_) => UniformType::Float,
            UniformValue::Vec2(_) => UniformType::Vec2,
            UniformValue::Vec3(_) => UniformType::Vec3,
            UniformValue::Vec4(_) => UniformType::Vec4,
            UniformValue::Mat4(_) => UniformType::Mat4,
            UniformValue::Sampler(_) => UniformType::Sampler2D,
        }
    }

    /// True for sampler values
    pub fn is_sampler(&self) -> bool {
        matches!(self, UniformValue::Sampler(_))
    }

    /// The zero value of a uniform type (what unset slots hold)
    pub fn zero(ty: UniformType) -> Self {
        match ty {
            UniformType::Int => UniformValue::Int(0),
            UniformType::IVec2 => UniformValue::IVec2(IVec2::ZERO),
            UniformType::IVec3 => UniformValue::IVec3(IVec3::ZERO),
            UniformType::IVec4 => UniformValue::IVec4(IVec4::ZERO),
            UniformType::Float => UniformValue::Float(0.0),
            UniformType::Vec2 => UniformValue::Vec2(Vec2::ZERO),
            UniformType::Vec3 => UniformValue::Vec3(Vec3::ZERO),
            UniformType::Vec4 => UniformValue::Vec4(Vec4::ZERO),
            UniformType::Mat4 => UniformValue::Mat4(Mat4::ZERO),
            UniformType::Sampler2D => UniformValue::Sampler(TextureSampler {
                texture: TextureHandle(0),
                desc: SamplerDesc::default(),
            }),
        }
    }
}

/// One reflected uniform of a linked program
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UniformDesc {
    /// Uniform name as declared in the shader source
    pub name: String,
    /// Declared type
    pub ty: UniformType,
    /// Program location
    pub location: i32,
}

// ===== SHADER SOURCES =====

/// GLSL source for each program stage
///
/// Vertex and fragment are mandatory; the other stages participate only
/// when supplied.
#[derive(Debug, Clone, Default)]
pub struct ShaderStageSources {
    pub vertex: String,
    pub tess_control: Option<String>,
    pub tess_eval: Option<String>,
    pub geometry: Option<String>,
    pub fragment: String,
}

impl ShaderStageSources {
    /// A vertex + fragment program, the common case
    pub fn vertex_fragment(vertex: &str, fragment: &str) -> Self {
        Self {
            vertex: vertex.to_string(),
            fragment: fragment.to_string(),
            ..Self::default()
        }
    }
}

// ===== SHADER =====

/// A linked shader program and its reflected uniform interface
///
/// Created through [`crate::renderer::Renderer::create_shader`], which
/// returns `Rc<Shader>` so several [`ShaderData`] instances can share one
/// program. The device object is destroyed when the last reference drops.
pub struct Shader {
    device: Rc<dyn RenderDevice>,
    program: ProgramHandle,
    uniforms: Vec<UniformDesc>,
}

impl Shader {
    pub(crate) fn new(
        device: Rc<dyn RenderDevice>,
        sources: &ShaderStageSources,
    ) -> Result<Rc<Self>> {
        if sources.vertex.is_empty() {
            render_bail!(SOURCE, InvalidResource, "Vertex shader source is empty");
        }
        if sources.fragment.is_empty() {
            render_bail!(SOURCE, InvalidResource, "Fragment shader source is empty");
        }

        let (program, uniforms) = device.create_program(sources)?;
        render_trace!(SOURCE, "Created shader with {} uniforms", uniforms.len());

        Ok(Rc::new(Self {
            device,
            program,
            uniforms,
        }))
    }

    /// Backend program handle
    pub fn program(&self) -> ProgramHandle {
        self.program
    }

    /// Reflected uniforms in declaration order
    pub fn uniforms(&self) -> &[UniformDesc] {
        &self.uniforms
    }

    /// Look up a reflected uniform by name
    pub fn uniform_by_name(&self, name: &str) -> Option<&UniformDesc> {
        self.uniforms.iter().find(|u| u.name == name)
    }
}

impl Drop for Shader {
    fn drop(&mut self) {
        self.device.delete_program(self.program);
        render_trace!(SOURCE, "Destroyed shader");
    }
}

// ===== SHADER DATA =====

/// Per-drawable uniform values for one shader
///
/// Holds one slot per reflected uniform. Unset slots keep the zero value of
/// their type. Values are set by name; a wrong-typed assignment fails with
/// [`Error::UniformTypeMismatch`] and leaves the slot unchanged.
pub struct ShaderData {
    shader: Rc<Shader>,
    values: Vec<UniformValue>,
    name_index: FxHashMap<String, usize>,
}

impl ShaderData {
    /// Allocate a zero-initialized slot per reflected uniform of `shader`
    pub fn new(shader: Rc<Shader>) -> Self {
        let mut values = Vec::with_capacity(shader.uniforms().len());
        let mut name_index = FxHashMap::default();

        for (i, desc) in shader.uniforms().iter().enumerate() {
            values.push(UniformValue::zero(desc.ty));
            if name_index.insert(desc.name.clone(), i).is_some() {
                render_warn!(SOURCE, "Duplicate uniform name '{}'", desc.name);
            }
        }

        Self {
            shader,
            values,
            name_index,
        }
    }

    /// The shader this data binds to
    pub fn shader(&self) -> &Rc<Shader> {
        &self.shader
    }

    /// Current value of a slot, if the name exists
    pub fn value(&self, name: &str) -> Option<&UniformValue> {
        self.name_index.get(name).map(|&i| &self.values[i])
    }

    /// Slots in reflected order, paired with their descriptors
    pub fn slots(&self) -> impl Iterator<Item = (&UniformDesc, &UniformValue)> {
        self.shader.uniforms().iter().zip(self.values.iter())
    }

    /// Assign a value to the named slot
    ///
    /// Fails with [`Error::UniformNotFound`] for unknown names and
    /// [`Error::UniformTypeMismatch`] when the value's type differs from the
    /// slot's declared type.
    pub fn set(&mut self, name: &str, value: UniformValue) -> Result<()> {
        let index = match self.name_index.get(name) {
            Some(&i) => i,
            None => {
                render_error!(SOURCE, "Uniform '{}' not found", name);
                return Err(Error::UniformNotFound(name.to_string()));
            }
        };

        let expected = self.shader.uniforms()[index].ty;
        let provided = value.uniform_type();
        if expected != provided {
            render_error!(
                SOURCE,
                "Uniform '{}' expects {:?}, got {:?}",
                name,
                expected,
                provided
            );
            return Err(Error::UniformTypeMismatch {
                name: name.to_string(),
                expected,
                provided,
            });
        }

        self.values[index] = value;
        Ok(())
    }

    // ----- Typed setters -----

    pub fn set_int(&mut self, name: &str, value: i32) -> Result<()> {
        self.set(name, UniformValue::Int(value))
    }

    pub fn set_ivec2(&mut self, name: &str, value: IVec2) -> Result<()> {
        self.set(name, UniformValue::IVec2(value))
    }

    pub fn set_ivec3(&mut self, name: &str, value: IVec3) -> Result<()> {
        self.set(name, UniformValue::IVec3(value))
    }

    pub fn set_ivec4(&mut self, name: &str, value: IVec4) -> Result<()> {
        self.set(name, UniformValue::IVec4(value))
    }

    pub fn set_float(&mut self, name: &str, value: f32) -> Result<()> {
        self.set(name, UniformValue::Float(value))
    }

    pub fn set_vec2(&mut self, name: &str, value: Vec2) -> Result<()> {
        self.set(name, UniformValue::Vec2(value))
    }

    pub fn set_vec3(&mut self, name: &str, value: Vec3) -> Result<()> {
        self.set(name, UniformValue::Vec3(value))
    }

    pub fn set_vec4(&mut self, name: &str, value: Vec4) -> Result<()> {
        self.set(name, UniformValue::Vec4(value))
    }

    pub fn set_mat4(&mut self, name: &str, value: Mat4) -> Result<()> {
        self.set(name, UniformValue::Mat4(value))
    }

    pub fn set_sampler(&mut self, name: &str, sampler: TextureSampler) -> Result<()> {
        self.set(name, UniformValue::Sampler(sampler))
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
#[path = "shader_tests.rs"]
mod tests;
