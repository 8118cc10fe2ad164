use xform_engine::coords::Vec2;
use xform_engine::core::{App, AppControl, FrameCtx, InputCtx, SetupCtx};
use xform_engine::input::{InputEvent, Key, KeyState, MouseButton, MouseButtonState};
use xform_engine::paint::Color;
use xform_engine::render::shapes::rect::RectRenderer;
use xform_engine::render::shapes::text::TextRenderer;
use xform_engine::render::{clear_target, ModelRenderer, WgpuBackend};
use xform_engine::text::{FontId, FontSystem};

use crate::labels;
use crate::matrix_text::MatrixText;
use crate::panel;
use crate::preset::Preset;
use crate::session::Session;

enum Model {
    /// GPU not ready yet.
    Pending,
    Ready(ModelRenderer<WgpuBackend>),
    /// Setup failed; the model is never drawn.
    Failed,
}

/// The transform demo: triangle, preset panel and matrix text.
pub struct DemoApp {
    title: String,
    session: Session,
    model: Model,
    panel: RectRenderer,
    glyphs: TextRenderer,
    fonts: FontSystem,
    // `None` when no font could be loaded; text then only goes to stdout.
    font: Option<FontId>,
    matrix_text: MatrixText,
    hovered: Option<Preset>,
}

impl DemoApp {
    pub fn new(title: impl Into<String>, initial: Preset, font: Option<Vec<u8>>) -> Self {
        let mut fonts = FontSystem::new();
        let font = match font {
            Some(bytes) => fonts
                .load_font(&bytes)
                .inspect_err(|err| log::warn!("{err}; drawing without labels"))
                .ok(),
            None => {
                log::warn!("no font found; drawing without labels");
                None
            }
        };

        Self {
            title: title.into(),
            session: Session::new(initial),
            model: Model::Pending,
            panel: RectRenderer::new(),
            glyphs: TextRenderer::new(),
            fonts,
            font,
            matrix_text: MatrixText::new(),
            hovered: None,
        }
    }

    fn window_title(&self) -> String {
        format!("{} ({})", self.title, self.session.active())
    }

    fn press(&mut self, ctx: &mut InputCtx<'_>, preset: Preset) {
        if self.session.press(preset) {
            ctx.runtime.set_title(self.window_title());
            ctx.runtime.request_redraw();
        }
    }

    fn hover(&mut self, ctx: &mut InputCtx<'_>, pos: Option<Vec2>) {
        let hovered = pos.and_then(|p| panel::hit_test(ctx.window.viewport(), p));
        if hovered != self.hovered {
            self.hovered = hovered;
            ctx.runtime.request_redraw();
        }
    }
}

impl App for DemoApp {
    fn on_gpu_ready(&mut self, ctx: &mut SetupCtx<'_, '_>) -> AppControl {
        let backend = WgpuBackend::new(ctx.gpu.device(), ctx.gpu.queue(), ctx.gpu.surface_format());

        self.model = match ModelRenderer::initialize(backend) {
            Ok(mut renderer) => {
                let n = renderer.upload_vertices(self.session.shape());
                log::info!("uploaded {n} vertices");
                Model::Ready(renderer)
            }
            Err(err) => {
                log::error!("{err}");
                Model::Failed
            }
        };

        ctx.runtime.set_title(self.window_title());
        AppControl::Continue
    }

    fn on_input(&mut self, ctx: &mut InputCtx<'_>, event: &InputEvent) -> AppControl {
        match *event {
            InputEvent::PointerMoved { x, y } => self.hover(ctx, Some(Vec2::new(x, y))),
            InputEvent::PointerLeft => self.hover(ctx, None),

            InputEvent::PointerButton(ev)
                if ev.button == MouseButton::Left && ev.state == MouseButtonState::Pressed =>
            {
                if let Some(preset) = panel::hit_test(ctx.window.viewport(), Vec2::new(ev.x, ev.y)) {
                    self.press(ctx, preset);
                }
            }

            InputEvent::Key { key, state: KeyState::Pressed, repeat: false } => {
                if key == Key::Escape {
                    return AppControl::Exit;
                }
                if let Some(preset) = Preset::from_key(key) {
                    log::debug!("key {key}: {preset}");
                    self.press(ctx, preset);
                }
            }

            _ => {}
        }
        AppControl::Continue
    }

    fn on_frame(&mut self, ctx: &mut FrameCtx<'_, '_>) -> AppControl {
        let Self {
            session,
            model,
            panel: rects,
            glyphs,
            fonts,
            font,
            matrix_text,
            hovered,
            ..
        } = self;

        ctx.render(|rctx, target| {
            let drawn = match model {
                Model::Ready(renderer) => match renderer.draw(session.shape()) {
                    Ok(report) => {
                        matrix_text.update(&report);
                        renderer.backend_mut().encode(target);
                        true
                    }
                    Err(err) => {
                        log::error!("{err}");
                        false
                    }
                },
                Model::Pending | Model::Failed => false,
            };

            if !drawn {
                clear_target(target, Color::BLACK);
            }

            let fills = panel::fills(rctx.viewport, session.buttons(), *hovered);
            rects.render(rctx, target, &fills);

            if let Some(font) = *font {
                let mut items = labels::button_labels(rctx.viewport, fonts, font, session.buttons());
                items.extend(labels::matrix_readout(font, matrix_text.text()));
                glyphs.render(rctx, target, fonts, &items);
            }
        })
    }
}
