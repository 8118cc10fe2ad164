//! GPU rendering subsystem.
//!
//! Two renderers live here:
//! - `ModelRenderer` draws a 2D vertex list through a 4x4 model matrix. It
//!   talks to the GPU only through the `RenderBackend` trait; `WgpuBackend`
//!   is the production implementation.
//! - `shapes::rect::RectRenderer` fills solid rectangles and
//!   `shapes::text::TextRenderer` draws glyphs, both given in logical pixels
//!   (top-left origin, +Y down) and converted to NDC on the CPU.

mod backend;
mod ctx;
mod model;
pub mod reflect;
pub mod shapes;
mod wgpu_backend;

pub use backend::{
    AttribLocation, BackendError, BufferHandle, RenderBackend, ShaderProgram,
    UniformSlot, VertexLayout,
};
pub use ctx::{clear_target, RenderCtx, RenderTarget};
pub use model::{
    DrawError, DrawReport, Drawable, ModelRenderer, SetupError, MODEL_MATRIX_UNIFORM,
    MODEL_SHADER, POSITION_ATTRIBUTE,
};
pub use wgpu_backend::WgpuBackend;
