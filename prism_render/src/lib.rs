/*!
# Prism Render

Backend-agnostic render command abstraction.

This crate turns small declarative descriptions — what to draw, with which
shader inputs, under which pipeline state, into which target — into the
ordered, imperative call sequence a stateful graphics API requires. Backend
crates (such as `prism_render_gl`) implement the [`renderer::RenderDevice`]
trait; everything above that trait is backend-agnostic.

## Architecture

- **Renderer**: resource factory and draw dispatcher
- **ShaderData**: typed, reflected uniform slots set by name
- **StateSet**: declarative blend/cull/depth/rasterizer/stencil/viewport
  state, fully re-specified per draw so nothing leaks between calls
- **RenderTarget**: framebuffer with fixed attachment slots and eager
  completeness checking
- **Geometry**: a vertex buffer, optional index buffer and layout,
  describing one drawable unit

## Example

```no_run
# fn demo(device: std::rc::Rc<dyn prism_render::renderer::RenderDevice>) -> prism_render::error::Result<()> {
use prism_render::prism::render::*;
use glam::Vec4;

let renderer = Renderer::new(device, 800, 600);

let shader = renderer.create_shader(&ShaderStageSources::vertex_fragment(
    "uniform mat4 uMvp; void main() {}",
    "void main() {}",
))?;
let mut data = ShaderData::new(shader);
data.set_mat4("uMvp", glam::Mat4::IDENTITY)?;

let mut vertices = renderer.create_vertex_buffer()?;
vertices.upload(&[VertexPos3 { position: [0.0, 0.0, 0.0] }])?;
let geometry = Geometry {
    vertices: &vertices,
    indices: None,
    layout: VertexPos3::layout(),
    num_primitives: 1,
};

renderer.clear(renderer.default_target(), Vec4::ZERO)?;
renderer.draw(renderer.default_target(), &data, &StateSet::default(), &geometry)?;
# Ok(())
# }
```
*/

pub mod error;
pub mod log;
pub mod renderer;

pub use glam;

// Main prism namespace module
pub mod prism {
    // Error types
    pub use crate::error::{Error, Result};

    // Logging sub-module (types only, NOT macros)
    pub mod log {
        pub use crate::log::{DefaultLogger, LogEntry, LogSeverity, Logger};
    }

    // Render sub-module with all rendering types
    pub mod render {
        pub use crate::renderer::*;
    }
}
