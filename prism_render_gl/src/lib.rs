/*!
# Prism Render - OpenGL Backend

OpenGL implementation of the `prism_render` device trait.

This crate provides [`GlDevice`], a [`prism_render::renderer::RenderDevice`]
over a [`glow`] context (OpenGL 3.3+ core profile). The caller owns context
creation and current-making; the device only issues commands into it.

```no_run
# fn get_gl_context() -> glow::Context { unimplemented!() }
use std::rc::Rc;

use prism_render::prism::render::{RenderDevice, Renderer};
use prism_render_gl::GlDevice;

let gl = get_gl_context();
let device = Rc::new(GlDevice::new(gl)?) as Rc<dyn RenderDevice>;
let renderer = Renderer::new(device, 1280, 720);
# Ok::<(), prism_render::prism::Error>(())
```
*/

pub mod gl_device;
pub mod translate;

pub use gl_device::GlDevice;
