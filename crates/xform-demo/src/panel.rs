//! Preset buttons along the bottom edge of the window.
//!
//! All geometry is in logical pixels, top-left origin.

use xform_engine::coords::{Rect, Vec2, Viewport};
use xform_engine::paint::Color;
use xform_engine::render::shapes::rect::FilledRect;

use crate::preset::Preset;
use crate::selector::ButtonStates;

const MARGIN: f32 = 12.0;
const GAP: f32 = 8.0;
const BUTTON_HEIGHT: f32 = 36.0;

const DISABLED_DIM: f32 = 0.35;
const HOVER_BOOST: f32 = 1.3;

/// Button rectangles in [`Preset::ALL`] order: equal width, left to right.
///
/// Buttons shrink to zero width on viewports too narrow to hold them.
pub fn layout(viewport: Viewport) -> [Rect; 4] {
    let strip = Rect::new(
        MARGIN,
        viewport.height - MARGIN - BUTTON_HEIGHT,
        viewport.width - 2.0 * MARGIN,
        BUTTON_HEIGHT,
    );
    strip.columns(GAP)
}

/// Button under `pos`, enabled or not.
pub fn hit_test(viewport: Viewport, pos: Vec2) -> Option<Preset> {
    layout(viewport)
        .into_iter()
        .zip(Preset::ALL)
        .find_map(|(rect, preset)| rect.contains(pos).then_some(preset))
}

fn accent(preset: Preset) -> Color {
    match preset {
        Preset::Reset => Color::from_srgb_u8(110, 110, 120, 255),
        Preset::KeySolution => Color::from_srgb_u8(60, 140, 220, 255),
        Preset::MySolution => Color::from_srgb_u8(90, 180, 110, 255),
        Preset::CenterScale => Color::from_srgb_u8(210, 150, 60, 255),
    }
}

/// Fill color of one button.
pub fn fill_color(preset: Preset, enabled: bool, hovered: bool) -> Color {
    let base = accent(preset);
    match (enabled, hovered) {
        (false, _) => base.scaled(DISABLED_DIM),
        (true, true) => base.scaled(HOVER_BOOST),
        (true, false) => base,
    }
}

/// Rectangles to draw for the panel in its current state.
pub fn fills(viewport: Viewport, buttons: ButtonStates, hovered: Option<Preset>) -> Vec<FilledRect> {
    layout(viewport)
        .into_iter()
        .zip(Preset::ALL)
        .map(|(rect, preset)| FilledRect {
            rect,
            color: fill_color(preset, buttons.is_enabled(preset), hovered == Some(preset)),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const VP: Viewport = Viewport::new(800.0, 600.0);

    fn center(r: Rect) -> Vec2 {
        r.origin + r.size * 0.5
    }

    #[test]
    fn buttons_fit_without_overlap() {
        let rects = layout(VP);
        let bounds = VP.bounds();

        for (i, a) in rects.iter().enumerate() {
            assert!(!a.is_empty());
            assert!(bounds.contains(a.origin));
            let max = a.max();
            assert!(max.x <= VP.width && max.y <= VP.height);

            for b in &rects[i + 1..] {
                assert!(!a.overlaps(*b));
            }
        }
    }

    #[test]
    fn buttons_share_a_row_and_width() {
        let rects = layout(VP);
        for r in &rects[1..] {
            assert_eq!(r.origin.y, rects[0].origin.y);
            assert_eq!(r.size, rects[0].size);
        }
        assert!(rects.windows(2).all(|w| w[0].origin.x < w[1].origin.x));
    }

    #[test]
    fn hit_test_finds_each_button() {
        for (rect, preset) in layout(VP).into_iter().zip(Preset::ALL) {
            assert_eq!(hit_test(VP, center(rect)), Some(preset));
        }
        assert_eq!(hit_test(VP, Vec2::new(400.0, 100.0)), None);
        assert_eq!(hit_test(VP, Vec2::new(f32::NAN, f32::NAN)), None);
    }

    #[test]
    fn gaps_hit_nothing() {
        let rects = layout(VP);
        let between = Vec2::new(rects[0].max().x + GAP / 2.0, center(rects[0]).y);
        assert_eq!(hit_test(VP, between), None);
    }

    #[test]
    fn narrow_viewport_collapses_buttons() {
        let rects = layout(Viewport::new(20.0, 600.0));
        assert!(rects.iter().all(|r| r.is_empty()));
        assert_eq!(hit_test(Viewport::new(20.0, 600.0), Vec2::new(12.0, 560.0)), None);
    }

    #[test]
    fn disabled_button_is_dimmed_and_never_highlighted() {
        let buttons = ButtonStates::after(Preset::KeySolution);
        let rects = fills(VP, buttons, Some(Preset::KeySolution));

        let key = rects[Preset::KeySolution.index()].color;
        assert_eq!(key, fill_color(Preset::KeySolution, false, false));
        assert!(key.b < accent(Preset::KeySolution).b);

        let reset = rects[Preset::Reset.index()].color;
        assert_eq!(reset, accent(Preset::Reset));
    }

    #[test]
    fn hovered_enabled_button_is_brighter() {
        let rects = fills(VP, ButtonStates::after(Preset::Reset), Some(Preset::MySolution));
        let hovered = rects[Preset::MySolution.index()].color;
        assert!(hovered.g > accent(Preset::MySolution).g);
    }
}
