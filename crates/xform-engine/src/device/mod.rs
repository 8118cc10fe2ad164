//! GPU device and window surface.
//!
//! Acquires the adapter, device and queue for one window, keeps the surface
//! configured across resizes, and hands out frames to render into.

mod context;
mod init;
mod surface;

pub use context::{Gpu, GpuFrame};
pub use init::GpuInit;
pub use surface::SurfaceErrorAction;
