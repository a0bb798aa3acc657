//! Tests for render targets and the attachment model

use std::rc::Rc;

use super::*;
use crate::error::Error;
use crate::renderer::device::{FramebufferHandle, FramebufferStatus};
use crate::renderer::mock_device::{DeviceCall, MockDevice};
use crate::renderer::texture::{
    ImageFormat, ImagePixelType, RenderBuffer, RenderBufferFormat, Texture2D, TextureFormat,
};

fn make_texture(device: Rc<MockDevice>, format: TextureFormat, w: u32, h: u32) -> Texture2D {
    let (image_format, pixel_type) = if format.is_depth_stencil() {
        (ImageFormat::DEPTH_24_STENCIL_8, ImagePixelType::UINT_24_8)
    } else {
        (ImageFormat::RGB, ImagePixelType::UBYTE)
    };
    Texture2D::new(device, w, h, format, None, image_format, pixel_type).unwrap()
}

#[test]
fn test_slot_classification() {
    assert!(AttachmentSlot::Color0.is_color());
    assert!(AttachmentSlot::Color3.is_color());
    assert!(!AttachmentSlot::Depth.is_color());
    assert!(!AttachmentSlot::DepthStencil.is_color());
    assert_eq!(AttachmentSlot::Color2.color_index(), Some(2));
    assert_eq!(AttachmentSlot::Stencil.color_index(), None);
}

#[test]
fn test_attach_records_population() {
    let device = MockDevice::new();
    let mut target = RenderTarget::new(device.clone(), 64, 64).unwrap();
    let texture = make_texture(device.clone(), TextureFormat::RGB, 64, 64);

    assert!(!target.is_populated(AttachmentSlot::Color0));
    target.attach_texture(AttachmentSlot::Color0, &texture).unwrap();
    assert!(target.is_populated(AttachmentSlot::Color0));

    assert!(device.calls().contains(&DeviceCall::AttachTexture {
        framebuffer: target.framebuffer(),
        slot: AttachmentSlot::Color0,
        texture: texture.handle(),
    }));
}

#[test]
fn test_attach_rejects_extent_mismatch() {
    let device = MockDevice::new();
    let mut target = RenderTarget::new(device.clone(), 64, 64).unwrap();
    let texture = make_texture(device, TextureFormat::RGB, 32, 64);

    let result = target.attach_texture(AttachmentSlot::Color0, &texture);
    assert!(matches!(result, Err(Error::InvalidResource(_))));
    assert!(!target.is_populated(AttachmentSlot::Color0));
}

#[test]
fn test_attach_rejects_format_slot_mismatch() {
    let device = MockDevice::new();
    let mut target = RenderTarget::new(device.clone(), 64, 64).unwrap();

    let color = make_texture(device.clone(), TextureFormat::RGB, 64, 64);
    let depth = make_texture(device.clone(), TextureFormat::DEPTH_24_STENCIL_8, 64, 64);

    let result = target.attach_texture(AttachmentSlot::Depth, &color);
    assert!(matches!(result, Err(Error::InvalidResource(_))));

    let result = target.attach_texture(AttachmentSlot::Color1, &depth);
    assert!(matches!(result, Err(Error::InvalidResource(_))));

    target
        .attach_texture(AttachmentSlot::DepthStencil, &depth)
        .unwrap();
}

#[test]
fn test_incomplete_framebuffer_fails_attach() {
    let device = MockDevice::new();
    let mut target = RenderTarget::new(device.clone(), 64, 64).unwrap();
    let texture = make_texture(device.clone(), TextureFormat::RGB, 64, 64);

    device.set_framebuffer_status(FramebufferStatus::IncompleteAttachment);
    let result = target.attach_texture(AttachmentSlot::Color0, &texture);

    assert!(matches!(result, Err(Error::FramebufferIncomplete(_))));
    assert!(!target.is_populated(AttachmentSlot::Color0));
}

#[test]
fn test_failed_attach_restores_prior_attachment() {
    let device = MockDevice::new();
    let mut target = RenderTarget::new(device.clone(), 64, 64).unwrap();
    let first = make_texture(device.clone(), TextureFormat::RGB, 64, 64);
    let second = make_texture(device.clone(), TextureFormat::RGBA, 64, 64);

    target.attach_texture(AttachmentSlot::Color0, &first).unwrap();

    device.set_framebuffer_status(FramebufferStatus::Unsupported);
    let result = target.attach_texture(AttachmentSlot::Color0, &second);
    assert!(matches!(result, Err(Error::FramebufferIncomplete(_))));

    // the prior texture was re-attached and the slot stays populated
    assert!(target.is_populated(AttachmentSlot::Color0));
    let last_attach = device
        .calls()
        .into_iter()
        .rev()
        .find(|c| matches!(c, DeviceCall::AttachTexture { .. }))
        .unwrap();
    assert_eq!(
        last_attach,
        DeviceCall::AttachTexture {
            framebuffer: target.framebuffer(),
            slot: AttachmentSlot::Color0,
            texture: first.handle(),
        }
    );
}

#[test]
fn test_overwriting_a_slot_is_silent() {
    let device = MockDevice::new();
    let mut target = RenderTarget::new(device.clone(), 64, 64).unwrap();
    let first = make_texture(device.clone(), TextureFormat::RGB, 64, 64);
    let second = make_texture(device.clone(), TextureFormat::RGBA, 64, 64);

    target.attach_texture(AttachmentSlot::Color0, &first).unwrap();
    target.attach_texture(AttachmentSlot::Color0, &second).unwrap();
    assert!(target.is_populated(AttachmentSlot::Color0));
}

#[test]
fn test_render_buffer_attachment() {
    let device = MockDevice::new();
    let mut target = RenderTarget::new(device.clone(), 32, 32).unwrap();
    let rb = RenderBuffer::new(device.clone(), 32, 32, RenderBufferFormat::DEPTH_24_STENCIL_8)
        .unwrap();

    target
        .attach_render_buffer(AttachmentSlot::DepthStencil, &rb)
        .unwrap();
    assert!(target.is_populated(AttachmentSlot::DepthStencil));

    // a depth render buffer does not fit a color slot
    let depth = RenderBuffer::new(device.clone(), 32, 32, RenderBufferFormat::DEPTH_16).unwrap();
    let result = target.attach_render_buffer(AttachmentSlot::Color0, &depth);
    assert!(matches!(result, Err(Error::InvalidResource(_))));
}

#[test]
fn test_activate_issues_populated_color_slots_ascending() {
    let device = MockDevice::new();
    let mut target = RenderTarget::new(device.clone(), 64, 64).unwrap();

    let c0 = make_texture(device.clone(), TextureFormat::RGB, 64, 64);
    let c2 = make_texture(device.clone(), TextureFormat::RGB_32F, 64, 64);
    let c3 = make_texture(device.clone(), TextureFormat::RGBA, 64, 64);
    let depth = make_texture(device.clone(), TextureFormat::DEPTH_24_STENCIL_8, 64, 64);

    // attach out of order; the list must come out ascending
    target.attach_texture(AttachmentSlot::Color3, &c3).unwrap();
    target.attach_texture(AttachmentSlot::Color0, &c0).unwrap();
    target.attach_texture(AttachmentSlot::Color2, &c2).unwrap();
    target.attach_texture(AttachmentSlot::DepthStencil, &depth).unwrap();

    device.clear_calls();
    target.activate().unwrap();

    assert_eq!(
        device.calls(),
        vec![
            DeviceCall::BindFramebuffer(target.framebuffer()),
            DeviceCall::SetDrawBuffers {
                framebuffer: target.framebuffer(),
                slots: vec![
                    AttachmentSlot::Color0,
                    AttachmentSlot::Color2,
                    AttachmentSlot::Color3,
                ],
            },
        ]
    );
}

#[test]
fn test_default_target_activates_without_draw_buffers() {
    let device = MockDevice::new();
    let target = RenderTarget::default_target(device.clone(), 800, 600);

    assert!(target.is_default());
    assert_eq!(target.width(), 800);

    target.activate().unwrap();
    assert_eq!(
        device.calls(),
        vec![DeviceCall::BindFramebuffer(FramebufferHandle::DEFAULT)]
    );
}

#[test]
fn test_default_target_rejects_attachments() {
    let device = MockDevice::new();
    let mut target = RenderTarget::default_target(device.clone(), 800, 600);
    let texture = make_texture(device, TextureFormat::RGB, 800, 600);

    let result = target.attach_texture(AttachmentSlot::Color0, &texture);
    assert!(matches!(result, Err(Error::InvalidResource(_))));
}

#[test]
fn test_target_deletes_framebuffer_on_drop_but_not_default() {
    let device = MockDevice::new();

    let framebuffer = {
        let target = RenderTarget::new(device.clone(), 16, 16).unwrap();
        target.framebuffer()
    };
    assert!(device
        .calls()
        .contains(&DeviceCall::DeleteFramebuffer(framebuffer)));

    device.clear_calls();
    drop(RenderTarget::default_target(device.clone(), 16, 16));
    assert!(device.calls().is_empty());
}
