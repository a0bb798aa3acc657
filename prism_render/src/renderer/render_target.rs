//! Render targets
//!
//! A [`RenderTarget`] owns a framebuffer with seven fixed attachment slots.
//! Attaching verifies completeness immediately; an attach that leaves the
//! framebuffer incomplete is rolled back and reported as an error instead of
//! taking effect. The default target stands for the window back buffer; it
//! owns no framebuffer object and accepts no attachments.

use std::rc::Rc;

use crate::error::{Error, Result};
use crate::render_bail;
use crate::renderer::device::{
    FramebufferHandle, FramebufferStatus, RenderBufferHandle, RenderDevice, TextureHandle,
};
use crate::renderer::texture::{RenderBuffer, Texture2D};
use crate::{render_debug, render_error};

const SOURCE: &str = "prism::RenderTarget";

// ===== ATTACHMENT SLOTS =====

/// The seven fixed attachment slots of a render target
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AttachmentSlot {
    Color0,
    Color1,
    Color2,
    Color3,
    Depth,
    Stencil,
    DepthStencil,
}

impl AttachmentSlot {
    /// Number of slots
    pub const COUNT: usize = 7;

    /// All slots in fixed order (color slots first, ascending)
    pub const ALL: [AttachmentSlot; Self::COUNT] = [
        AttachmentSlot::Color0,
        AttachmentSlot::Color1,
        AttachmentSlot::Color2,
        AttachmentSlot::Color3,
        AttachmentSlot::Depth,
        AttachmentSlot::Stencil,
        AttachmentSlot::DepthStencil,
    ];

    /// Index into per-slot storage
    pub fn index(&self) -> usize {
        match self {
            AttachmentSlot::Color0 => 0,
            AttachmentSlot::Color1 => 1,
            AttachmentSlot::Color2 => 2,
            AttachmentSlot::Color3 => 3,
            AttachmentSlot::Depth => 4,
            AttachmentSlot::Stencil => 5,
            AttachmentSlot::DepthStencil => 6,
        }
    }

    /// True for the four color slots
    pub fn is_color(&self) -> bool {
        self.index() < 4
    }

    /// Color slot index (0..=3), `None` for non-color slots
    pub fn color_index(&self) -> Option<u32> {
        if self.is_color() {
            Some(self.index() as u32)
        } else {
            None
        }
    }
}

/// What is attached to a slot
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Attachment {
    Texture(TextureHandle),
    RenderBuffer(RenderBufferHandle),
}

// ===== RENDER TARGET =====

/// A framebuffer with fixed attachment slots
///
/// Created through [`crate::renderer::Renderer::create_render_target`]. All
/// attachments must match the target's extent, which is fixed at
/// construction. The framebuffer object is destroyed on drop; the default
/// target owns none.
pub struct RenderTarget {
    device: Rc<dyn RenderDevice>,
    framebuffer: FramebufferHandle,
    width: u32,
    height: u32,
    attachments: [Option<Attachment>; AttachmentSlot::COUNT],
}

impl RenderTarget {
    pub(crate) fn new(device: Rc<dyn RenderDevice>, width: u32, height: u32) -> Result<Self> {
        if width == 0 || height == 0 {
            render_bail!(
                SOURCE,
                InvalidResource,
                "Render target dimensions must be non-zero (got {}x{})",
                width,
                height
            );
        }

        let framebuffer = device.create_framebuffer()?;

        Ok(Self {
            device,
            framebuffer,
            width,
            height,
            attachments: [None; AttachmentSlot::COUNT],
        })
    }

    /// The target standing for the window back buffer
    pub(crate) fn default_target(device: Rc<dyn RenderDevice>, width: u32, height: u32) -> Self {
        Self {
            device,
            framebuffer: FramebufferHandle::DEFAULT,
            width,
            height,
            attachments: [None; AttachmentSlot::COUNT],
        }
    }

    /// Backend framebuffer handle
    pub fn framebuffer(&self) -> FramebufferHandle {
        self.framebuffer
    }

    /// True for the back-buffer target
    pub fn is_default(&self) -> bool {
        self.framebuffer.is_default()
    }

    /// Width in pixels
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Height in pixels
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Back-buffer extent tracking for window resizes
    pub(crate) fn set_extent(&mut self, width: u32, height: u32) {
        self.width = width;
        self.height = height;
    }

    /// True when a resource is attached to `slot`
    pub fn is_populated(&self, slot: AttachmentSlot) -> bool {
        self.attachments[slot.index()].is_some()
    }

    /// Populated color slots in ascending slot order
    pub fn populated_color_slots(&self) -> Vec<AttachmentSlot> {
        AttachmentSlot::ALL
            .iter()
            .copied()
            .filter(|s| s.is_color() && self.is_populated(*s))
            .collect()
    }

    /// Attach a texture image to `slot`, overwriting any prior attachment
    ///
    /// The texture must match the target's extent and its format must fit
    /// the slot. Completeness is verified immediately; on failure the prior
    /// attachment is restored and the error returned.
    pub fn attach_texture(&mut self, slot: AttachmentSlot, texture: &Texture2D) -> Result<()> {
        self.check_attach(slot, texture.width(), texture.height())?;

        let color_format = !texture.format().is_depth_stencil();
        if slot.is_color() != color_format {
            render_bail!(
                SOURCE,
                InvalidResource,
                "Texture format {:?} does not fit attachment slot {:?}",
                texture.format(),
                slot
            );
        }

        self.device
            .attach_texture(self.framebuffer, slot, texture.handle())?;
        self.commit_attach(slot, Attachment::Texture(texture.handle()))?;

        render_debug!(SOURCE, "Attached texture to {:?}", slot);
        Ok(())
    }

    /// Attach a render buffer to `slot`, overwriting any prior attachment
    pub fn attach_render_buffer(
        &mut self,
        slot: AttachmentSlot,
        render_buffer: &RenderBuffer,
    ) -> Result<()> {
        self.check_attach(slot, render_buffer.width(), render_buffer.height())?;

        if slot.is_color() != render_buffer.format().is_color() {
            render_bail!(
                SOURCE,
                InvalidResource,
                "Render buffer format {:?} does not fit attachment slot {:?}",
                render_buffer.format(),
                slot
            );
        }

        self.device.attach_render_buffer(
            self.framebuffer,
            slot,
            render_buffer.handle(),
        )?;
        self.commit_attach(slot, Attachment::RenderBuffer(render_buffer.handle()))?;

        render_debug!(SOURCE, "Attached render buffer to {:?}", slot);
        Ok(())
    }

    /// Bind this target for drawing
    ///
    /// For non-default targets with populated color slots, also issues the
    /// draw-buffer list: exactly the populated color slots in ascending
    /// order.
    pub fn activate(&self) -> Result<()> {
        self.device.bind_framebuffer(self.framebuffer);

        if !self.is_default() {
            let colors = self.populated_color_slots();
            if !colors.is_empty() {
                self.device.set_draw_buffers(self.framebuffer, &colors)?;
            }
        }
        Ok(())
    }

    fn check_attach(&self, slot: AttachmentSlot, width: u32, height: u32) -> Result<()> {
        if self.is_default() {
            render_bail!(
                SOURCE,
                InvalidResource,
                "The default render target accepts no attachments"
            );
        }
        if width != self.width || height != self.height {
            render_bail!(
                SOURCE,
                InvalidResource,
                "Attachment extent {}x{} does not match target extent {}x{} ({:?})",
                width,
                height,
                self.width,
                self.height,
                slot
            );
        }
        Ok(())
    }

    /// Verify completeness after a backend attach; roll back on failure
    fn commit_attach(&mut self, slot: AttachmentSlot, attachment: Attachment) -> Result<()> {
        let status = self.device.framebuffer_status(self.framebuffer);
        if status == FramebufferStatus::Complete {
            self.attachments[slot.index()] = Some(attachment);
            return Ok(());
        }

        // Put the prior attachment back so the recorded state stays truthful
        if let Some(prior) = self.attachments[slot.index()] {
            let _ = match prior {
                Attachment::Texture(handle) => {
                    self.device.attach_texture(self.framebuffer, slot, handle)
                }
                Attachment::RenderBuffer(handle) => {
                    self.device
                        .attach_render_buffer(self.framebuffer, slot, handle)
                }
            };
        }

        let message = format!("Attachment to {:?} left framebuffer {}", slot, status.describe());
        render_error!(SOURCE, "{}", message);
        Err(Error::FramebufferIncomplete(message))
    }
}

impl Drop for RenderTarget {
    fn drop(&mut self) {
        if !self.is_default() {
            self.device.delete_framebuffer(self.framebuffer);
        }
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
#[path = "render_target_tests.rs"]
mod tests;
