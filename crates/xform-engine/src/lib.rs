//! xform engine crate.
//!
//! Owns the platform window, the GPU device and the renderers the transform
//! demo draws with. Higher layers talk to it through `core::App`.

pub mod device;
pub mod window;
pub mod input;
pub mod core;

pub mod logging;
pub mod coords;
pub mod render;
pub mod paint;
pub mod text;
