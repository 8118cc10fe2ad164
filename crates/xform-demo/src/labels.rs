//! In-window text: button labels and the matrix readout.

use std::path::Path;

use xform_engine::coords::{Rect, Vec2, Viewport};
use xform_engine::paint::Color;
use xform_engine::render::shapes::text::TextItem;
use xform_engine::text::{FontId, FontSystem};

use crate::panel;
use crate::preset::Preset;
use crate::selector::ButtonStates;

const LABEL_SIZE: f32 = 16.0;
const READOUT_SIZE: f32 = 18.0;
const READOUT_ORIGIN: Vec2 = Vec2::new(12.0, 12.0);

const DISABLED_DIM: f32 = 0.45;

/// Fonts tried when none is given on the command line.
const SYSTEM_FONTS: [&str; 5] = [
    "/usr/share/fonts/TTF/DejaVuSans.ttf",
    "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/noto/NotoSans-Regular.ttf",
    "/usr/share/fonts/truetype/noto/NotoSans-Regular.ttf",
];

/// Reads the font at `path`, or the first system font found.
pub fn load_font(path: Option<&Path>) -> Option<Vec<u8>> {
    match path {
        Some(path) => std::fs::read(path)
            .inspect_err(|err| log::warn!("cannot read font {}: {err}", path.display()))
            .ok(),
        None => SYSTEM_FONTS.iter().find_map(|p| std::fs::read(p).ok()),
    }
}

/// Top-left origin that centers a box of `size` inside `rect`.
pub fn centered(rect: Rect, size: Vec2) -> Vec2 {
    Vec2::new(
        rect.origin.x + (rect.size.x - size.x) * 0.5,
        rect.origin.y + (rect.size.y - size.y) * 0.5,
    )
}

fn label_color(enabled: bool) -> Color {
    let white = Color::from_srgb_u8(245, 245, 245, 255);
    if enabled { white } else { white.scaled(DISABLED_DIM) }
}

/// One label per visible button, centered; disabled buttons get dim text.
pub fn button_labels(viewport: Viewport, fonts: &FontSystem, font: FontId, buttons: ButtonStates) -> Vec<TextItem> {
    panel::layout(viewport)
        .into_iter()
        .zip(Preset::ALL)
        .filter(|(rect, _)| !rect.is_empty())
        .map(|(rect, preset)| {
            let text = preset.label();
            let size = fonts.measure_text(text, font, LABEL_SIZE);
            TextItem {
                text: text.to_owned(),
                font,
                origin: centered(rect, size),
                size: LABEL_SIZE,
                color: label_color(buttons.is_enabled(preset)),
            }
        })
        .collect()
}

/// The matrix text in the top-left corner; `None` until something was drawn.
pub fn matrix_readout(font: FontId, text: &str) -> Option<TextItem> {
    let text = text.trim_end();
    (!text.is_empty()).then(|| TextItem {
        text: text.to_owned(),
        font,
        origin: READOUT_ORIGIN,
        size: READOUT_SIZE,
        color: Color::from_srgb_u8(230, 230, 230, 255),
    })
}
