//! 2D textures, render buffers and sampler configuration
//!
//! All formats come from closed enumerations; texture creation validates the
//! format / source-pixel pairing up front so the backend never sees an
//! unsupported combination.

use std::rc::Rc;

use crate::error::Result;
use crate::render_bail;
use crate::renderer::device::{RenderBufferHandle, RenderDevice, TextureHandle};

const SOURCE: &str = "prism::Texture";

// ===== FORMAT ENUMS =====

/// Internal storage format of a 2D texture
#[allow(non_camel_case_types)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextureFormat {
    /// 8-bit RGB
    RGB,
    /// 8-bit RGBA
    RGBA,
    /// 16-bit float RGB
    RGB_16F,
    /// 16-bit float RGBA
    RGBA_16F,
    /// 32-bit float RGB
    RGB_32F,
    /// 32-bit float RGBA
    RGBA_32F,
    /// Packed 24-bit depth + 8-bit stencil
    DEPTH_24_STENCIL_8,
}

impl TextureFormat {
    /// True for the depth/stencil format
    pub fn is_depth_stencil(&self) -> bool {
        matches!(self, TextureFormat::DEPTH_24_STENCIL_8)
    }
}

/// Component layout of source pixel data
#[allow(non_camel_case_types)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageFormat {
    /// Three color components per pixel
    RGB,
    /// Four color components per pixel
    RGBA,
    /// Packed depth + stencil per pixel
    DEPTH_24_STENCIL_8,
}

/// Element type of source pixel data
#[allow(non_camel_case_types)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImagePixelType {
    BYTE,
    UBYTE,
    SHORT,
    USHORT,
    INT,
    UINT,
    FLOAT,
    /// Packed 24-bit depth + 8-bit stencil element
    UINT_24_8,
}

/// Internal storage format of a render buffer
#[allow(non_camel_case_types)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderBufferFormat {
    DEPTH_16,
    DEPTH_24,
    STENCIL_8,
    DEPTH_24_STENCIL_8,
    COLOR_RGBA8888,
}

impl RenderBufferFormat {
    /// True for formats attachable to a color slot
    pub fn is_color(&self) -> bool {
        matches!(self, RenderBufferFormat::COLOR_RGBA8888)
    }
}

/// Size in bytes of one source pixel
pub fn source_bytes_per_pixel(image_format: ImageFormat, pixel_type: ImagePixelType) -> usize {
    let components = match image_format {
        ImageFormat::RGB => 3,
        ImageFormat::RGBA => 4,
        // one packed element per pixel
        ImageFormat::DEPTH_24_STENCIL_8 => 1,
    };
    let element = match pixel_type {
        ImagePixelType::BYTE | ImagePixelType::UBYTE => 1,
        ImagePixelType::SHORT | ImagePixelType::USHORT => 2,
        ImagePixelType::INT
        | ImagePixelType::UINT
        | ImagePixelType::FLOAT
        | ImagePixelType::UINT_24_8 => 4,
    };
    components * element
}

/// Check that a texture format accepts the given source pixel description
///
/// The depth/stencil texture format pairs only with the packed
/// `DEPTH_24_STENCIL_8` / `UINT_24_8` source; color formats pair with any
/// RGB/RGBA source of a non-packed element type.
pub fn formats_compatible(
    format: TextureFormat,
    image_format: ImageFormat,
    pixel_type: ImagePixelType,
) -> bool {
    if format.is_depth_stencil() {
        return image_format == ImageFormat::DEPTH_24_STENCIL_8
            && pixel_type == ImagePixelType::UINT_24_8;
    }
    let color_source = matches!(image_format, ImageFormat::RGB | ImageFormat::RGBA);
    color_source && pixel_type != ImagePixelType::UINT_24_8
}

// ===== SAMPLER CONFIGURATION =====

/// Texture coordinate wrap mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WrapMode {
    /// Clamp to the edge texel
    Clamp,
    /// Repeat the texture
    Repeat,
    /// Repeat with mirroring
    Mirror,
    /// Clamp to the border color
    Border,
}

/// Texture filter mode (minification and magnification)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterMode {
    Nearest,
    Linear,
}

/// Wrap and filter parameters applied when sampling a texture
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SamplerDesc {
    /// Wrap mode along S (horizontal)
    pub wrap_s: WrapMode,
    /// Wrap mode along T (vertical)
    pub wrap_t: WrapMode,
    /// Filter when the texture is minified
    pub min_filter: FilterMode,
    /// Filter when the texture is magnified
    pub mag_filter: FilterMode,
}

impl Default for SamplerDesc {
    fn default() -> Self {
        Self {
            wrap_s: WrapMode::Clamp,
            wrap_t: WrapMode::Clamp,
            min_filter: FilterMode::Nearest,
            mag_filter: FilterMode::Nearest,
        }
    }
}

/// A texture reference plus the sampler parameters to use with it
///
/// This is what a sampler uniform slot holds; the draw dispatcher binds the
/// texture to a texture unit and applies the parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TextureSampler {
    /// Texture to sample
    pub texture: TextureHandle,
    /// Wrap and filter parameters
    pub desc: SamplerDesc,
}

impl TextureSampler {
    /// Sample `texture` with default (clamp / nearest) parameters
    pub fn new(texture: &Texture2D) -> Self {
        Self {
            texture: texture.handle(),
            desc: SamplerDesc::default(),
        }
    }

    /// Sample `texture` with explicit parameters
    pub fn with_desc(texture: &Texture2D, desc: SamplerDesc) -> Self {
        Self {
            texture: texture.handle(),
            desc,
        }
    }
}

// ===== TEXTURE 2D =====

/// A 2D texture owning its device object
///
/// Created through [`crate::renderer::Renderer::create_texture_2d`]. The
/// device object is destroyed when the value is dropped.
pub struct Texture2D {
    device: Rc<dyn RenderDevice>,
    handle: TextureHandle,
    width: u32,
    height: u32,
    format: TextureFormat,
}

impl Texture2D {
    pub(crate) fn new(
        device: Rc<dyn RenderDevice>,
        width: u32,
        height: u32,
        format: TextureFormat,
        data: Option<&[u8]>,
        image_format: ImageFormat,
        pixel_type: ImagePixelType,
    ) -> Result<Self> {
        if width == 0 || height == 0 {
            render_bail!(
                SOURCE,
                InvalidResource,
                "Texture dimensions must be non-zero (got {}x{})",
                width,
                height
            );
        }
        if !formats_compatible(format, image_format, pixel_type) {
            render_bail!(
                SOURCE,
                InvalidResource,
                "Texture format {:?} is incompatible with source {:?}/{:?}",
                format,
                image_format,
                pixel_type
            );
        }
        if let Some(data) = data {
            let expected =
                width as usize * height as usize * source_bytes_per_pixel(image_format, pixel_type);
            if data.len() != expected {
                render_bail!(
                    SOURCE,
                    InvalidResource,
                    "Pixel buffer holds {} bytes, {}x{} {:?}/{:?} needs {}",
                    data.len(),
                    width,
                    height,
                    image_format,
                    pixel_type,
                    expected
                );
            }
        }

        let handle =
            device.create_texture_2d(width, height, format, data, image_format, pixel_type)?;

        Ok(Self {
            device,
            handle,
            width,
            height,
            format,
        })
    }

    /// Backend handle
    pub fn handle(&self) -> TextureHandle {
        self.handle
    }

    /// Width in pixels
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Height in pixels
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Internal storage format
    pub fn format(&self) -> TextureFormat {
        self.format
    }
}

impl Drop for Texture2D {
    fn drop(&mut self) {
        self.device.delete_texture(self.handle);
    }
}

// ===== RENDER BUFFER =====

/// A write-only attachment buffer owning its device object
///
/// Render buffers back framebuffer attachments that are never sampled,
/// typically depth or stencil.
pub struct RenderBuffer {
    device: Rc<dyn RenderDevice>,
    handle: RenderBufferHandle,
    width: u32,
    height: u32,
    format: RenderBufferFormat,
}

impl RenderBuffer {
    pub(crate) fn new(
        device: Rc<dyn RenderDevice>,
        width: u32,
        height: u32,
        format: RenderBufferFormat,
    ) -> Result<Self> {
        if width == 0 || height == 0 {
            render_bail!(
                SOURCE,
                InvalidResource,
                "Render buffer dimensions must be non-zero (got {}x{})",
                width,
                height
            );
        }

        let handle = device.create_render_buffer(format, width, height)?;

        Ok(Self {
            device,
            handle,
            width,
            height,
            format,
        })
    }

    /// Backend handle
    pub fn handle(&self) -> RenderBufferHandle {
        self.handle
    }

    /// Width in pixels
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Height in pixels
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Internal storage format
    pub fn format(&self) -> RenderBufferFormat {
        self.format
    }
}

impl Drop for RenderBuffer {
    fn drop(&mut self) {
        self.device.delete_render_buffer(self.handle);
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
#[path = "texture_tests.rs"]
mod tests;
