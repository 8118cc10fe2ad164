//! Core engine-facing contracts.
//!
//! Defines the interface between the window runtime and the application:
//! a one-time setup callback once the GPU is ready, input callbacks, and a
//! per-frame callback that is only invoked when a redraw was requested.

mod app;
mod ctx;

pub use app::{App, AppControl};
pub use ctx::{FrameCtx, InputCtx, SetupCtx, WindowCtx};
