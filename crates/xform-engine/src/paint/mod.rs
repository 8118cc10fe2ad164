//! Paint model shared by the renderers.
//!
//! Only solid colors exist here; the model renderer computes its gradient in
//! the fragment shader.

mod color;

pub use color::Color;
