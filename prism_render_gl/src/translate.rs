//! Enum to GL constant translation
//!
//! Pure lookup tables from the core crate's closed enumerations to glow
//! constants. Every match is exhaustive, so an unmapped value cannot exist
//! at runtime.

use prism_render::renderer::device::FramebufferStatus;
use prism_render::renderer::geometry::VertexComponentType;
use prism_render::renderer::render_target::AttachmentSlot;
use prism_render::renderer::shader::UniformType;
use prism_render::renderer::state::{
    BlendEquation, BlendFactor, CompareFunc, CullMode, FillMode, FrontFace, StencilOp,
};
use prism_render::renderer::texture::{
    FilterMode, ImageFormat, ImagePixelType, RenderBufferFormat, TextureFormat, WrapMode,
};

pub fn blend_equation(equation: BlendEquation) -> u32 {
    match equation {
        BlendEquation::Add => glow::FUNC_ADD,
        BlendEquation::Subtract => glow::FUNC_SUBTRACT,
        BlendEquation::ReverseSubtract => glow::FUNC_REVERSE_SUBTRACT,
        BlendEquation::Min => glow::MIN,
        BlendEquation::Max => glow::MAX,
    }
}

pub fn blend_factor(factor: BlendFactor) -> u32 {
    match factor {
        BlendFactor::Zero => glow::ZERO,
        BlendFactor::One => glow::ONE,
        BlendFactor::SrcColor => glow::SRC_COLOR,
        BlendFactor::OneMinusSrcColor => glow::ONE_MINUS_SRC_COLOR,
        BlendFactor::DstColor => glow::DST_COLOR,
        BlendFactor::OneMinusDstColor => glow::ONE_MINUS_DST_COLOR,
        BlendFactor::SrcAlpha => glow::SRC_ALPHA,
        BlendFactor::OneMinusSrcAlpha => glow::ONE_MINUS_SRC_ALPHA,
        BlendFactor::DstAlpha => glow::DST_ALPHA,
        BlendFactor::OneMinusDstAlpha => glow::ONE_MINUS_DST_ALPHA,
    }
}

/// `None` means culling is disabled
pub fn cull_mode(mode: CullMode) -> Option<u32> {
    match mode {
        CullMode::None => None,
        CullMode::Front => Some(glow::FRONT),
        CullMode::Back => Some(glow::BACK),
        CullMode::FrontAndBack => Some(glow::FRONT_AND_BACK),
    }
}

pub fn front_face(winding: FrontFace) -> u32 {
    match winding {
        FrontFace::CounterClockwise => glow::CCW,
        FrontFace::Clockwise => glow::CW,
    }
}

pub fn compare_func(func: CompareFunc) -> u32 {
    match func {
        CompareFunc::Never => glow::NEVER,
        CompareFunc::Less => glow::LESS,
        CompareFunc::Equal => glow::EQUAL,
        CompareFunc::LessOrEqual => glow::LEQUAL,
        CompareFunc::Greater => glow::GREATER,
        CompareFunc::NotEqual => glow::NOTEQUAL,
        CompareFunc::GreaterOrEqual => glow::GEQUAL,
        CompareFunc::Always => glow::ALWAYS,
    }
}

pub fn stencil_op(op: StencilOp) -> u32 {
    match op {
        StencilOp::Keep => glow::KEEP,
        StencilOp::Zero => glow::ZERO,
        StencilOp::Replace => glow::REPLACE,
        StencilOp::Increment => glow::INCR,
        StencilOp::IncrementWrap => glow::INCR_WRAP,
        StencilOp::Decrement => glow::DECR,
        StencilOp::DecrementWrap => glow::DECR_WRAP,
        StencilOp::Invert => glow::INVERT,
    }
}

pub fn fill_mode(mode: FillMode) -> u32 {
    match mode {
        FillMode::Solid => glow::FILL,
        FillMode::Wireframe => glow::LINE,
    }
}

pub fn wrap_mode(mode: WrapMode) -> i32 {
    (match mode {
        WrapMode::Clamp => glow::CLAMP_TO_EDGE,
        WrapMode::Repeat => glow::REPEAT,
        WrapMode::Mirror => glow::MIRRORED_REPEAT,
        WrapMode::Border => glow::CLAMP_TO_BORDER,
    }) as i32
}

pub fn filter_mode(mode: FilterMode) -> i32 {
    (match mode {
        FilterMode::Nearest => glow::NEAREST,
        FilterMode::Linear => glow::LINEAR,
    }) as i32
}

pub fn texture_internal_format(format: TextureFormat) -> i32 {
    (match format {
        TextureFormat::RGB => glow::RGB,
        TextureFormat::RGBA => glow::RGBA,
        TextureFormat::RGB_16F => glow::RGB16F,
        TextureFormat::RGBA_16F => glow::RGBA16F,
        TextureFormat::RGB_32F => glow::RGB32F,
        TextureFormat::RGBA_32F => glow::RGBA32F,
        TextureFormat::DEPTH_24_STENCIL_8 => glow::DEPTH24_STENCIL8,
    }) as i32
}

pub fn image_format(format: ImageFormat) -> u32 {
    match format {
        ImageFormat::RGB => glow::RGB,
        ImageFormat::RGBA => glow::RGBA,
        ImageFormat::DEPTH_24_STENCIL_8 => glow::DEPTH_STENCIL,
    }
}

pub fn pixel_type(ty: ImagePixelType) -> u32 {
    match ty {
        ImagePixelType::BYTE => glow::BYTE,
        ImagePixelType::UBYTE => glow::UNSIGNED_BYTE,
        ImagePixelType::SHORT => glow::SHORT,
        ImagePixelType::USHORT => glow::UNSIGNED_SHORT,
        ImagePixelType::INT => glow::INT,
        ImagePixelType::UINT => glow::UNSIGNED_INT,
        ImagePixelType::FLOAT => glow::FLOAT,
        ImagePixelType::UINT_24_8 => glow::UNSIGNED_INT_24_8,
    }
}

pub fn render_buffer_format(format: RenderBufferFormat) -> u32 {
    match format {
        RenderBufferFormat::DEPTH_16 => glow::DEPTH_COMPONENT16,
        RenderBufferFormat::DEPTH_24 => glow::DEPTH_COMPONENT24,
        RenderBufferFormat::STENCIL_8 => glow::STENCIL_INDEX8,
        RenderBufferFormat::DEPTH_24_STENCIL_8 => glow::DEPTH24_STENCIL8,
        RenderBufferFormat::COLOR_RGBA8888 => glow::RGBA8,
    }
}

pub fn attachment_point(slot: AttachmentSlot) -> u32 {
    match slot {
        AttachmentSlot::Color0 => glow::COLOR_ATTACHMENT0,
        AttachmentSlot::Color1 => glow::COLOR_ATTACHMENT1,
        AttachmentSlot::Color2 => glow::COLOR_ATTACHMENT2,
        AttachmentSlot::Color3 => glow::COLOR_ATTACHMENT3,
        AttachmentSlot::Depth => glow::DEPTH_ATTACHMENT,
        AttachmentSlot::Stencil => glow::STENCIL_ATTACHMENT,
        AttachmentSlot::DepthStencil => glow::DEPTH_STENCIL_ATTACHMENT,
    }
}

pub fn framebuffer_status(code: u32) -> FramebufferStatus {
    match code {
        glow::FRAMEBUFFER_COMPLETE => FramebufferStatus::Complete,
        glow::FRAMEBUFFER_INCOMPLETE_ATTACHMENT => FramebufferStatus::IncompleteAttachment,
        glow::FRAMEBUFFER_INCOMPLETE_MISSING_ATTACHMENT => FramebufferStatus::MissingAttachment,
        glow::FRAMEBUFFER_UNSUPPORTED => FramebufferStatus::Unsupported,
        other => FramebufferStatus::Other(other),
    }
}

/// Reflected GL uniform type to core type; `None` for unsupported types
pub fn uniform_type(gl_type: u32) -> Option<UniformType> {
    match gl_type {
        glow::INT => Some(UniformType::Int),
        glow::INT_VEC2 => Some(UniformType::IVec2),
        glow::INT_VEC3 => Some(UniformType::IVec3),
        glow::INT_VEC4 => Some(UniformType::IVec4),
        glow::FLOAT => Some(UniformType::Float),
        glow::FLOAT_VEC2 => Some(UniformType::Vec2),
        glow::FLOAT_VEC3 => Some(UniformType::Vec3),
        glow::FLOAT_VEC4 => Some(UniformType::Vec4),
        glow::FLOAT_MAT4 => Some(UniformType::Mat4),
        glow::SAMPLER_2D => Some(UniformType::Sampler2D),
        _ => None,
    }
}

pub fn vertex_component_type(ty: VertexComponentType) -> u32 {
    if ty.is_integer() {
        glow::UNSIGNED_INT
    } else {
        glow::FLOAT
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
#[path = "translate_tests.rs"]
mod tests;
