use super::ctx::{FrameCtx, InputCtx, SetupCtx};
use crate::input::InputEvent;

/// Control directive returned by app callbacks.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum AppControl {
    Continue,
    Exit,
}

/// Application contract implemented by higher layers.
pub trait App {
    /// Called once, after the window and its GPU context exist and before
    /// the first frame.
    fn on_gpu_ready(&mut self, ctx: &mut SetupCtx<'_, '_>) -> AppControl;

    /// Called for every translated input event.
    fn on_input(&mut self, ctx: &mut InputCtx<'_>, event: &InputEvent) -> AppControl {
        let _ = (ctx, event);
        AppControl::Continue
    }

    /// Called for each frame the runtime renders.
    fn on_frame(&mut self, ctx: &mut FrameCtx<'_, '_>) -> AppControl;
}
