use crate::preset::Preset;
use crate::selector::{ButtonStates, PresetSelector};
use crate::shape::{depth_color, Shape};

/// Everything the demo mutates: the triangle and the preset selector.
#[derive(Debug, Clone)]
pub struct Session {
    shape: Shape,
    selector: PresetSelector,
}

impl Session {
    /// Starts with `initial` applied to the triangle.
    pub fn new(initial: Preset) -> Self {
        let mut session = Self {
            shape: Shape::triangle(),
            selector: PresetSelector::new(),
        };
        session.selector.apply(initial, &mut session.shape);
        session.log_vertices();
        session
    }

    /// Handles a button press or shortcut. Returns whether the matrix was
    /// (re)written and a redraw is needed.
    pub fn press(&mut self, preset: Preset) -> bool {
        if !self.selector.press(preset, &mut self.shape) {
            return false;
        }
        log::info!("applied preset: {preset}");
        self.log_vertices();
        true
    }

    pub fn shape(&self) -> &Shape {
        &self.shape
    }

    pub fn active(&self) -> Preset {
        self.selector.active()
    }

    pub fn buttons(&self) -> ButtonStates {
        self.selector.buttons()
    }

    fn log_vertices(&self) {
        if !log::log_enabled!(log::Level::Debug) {
            return;
        }
        for (i, v) in self.shape.transformed_vertices().iter().enumerate() {
            let [r, g, b] = depth_color(v.z);
            log::debug!(
                "vertex {i}: clip ({:.4}, {:.4}, {:.4}, {:.4}) color ({r:.3}, {g:.3}, {b:.3})",
                v.x,
                v.y,
                v.z,
                v.w
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn initial_preset_is_applied() {
        let s = Session::new(Preset::CenterScale);
        assert_eq!(s.active(), Preset::CenterScale);
        assert_eq!(s.shape().elements(), Preset::CenterScale.matrix());
        assert!(!s.buttons().is_enabled(Preset::CenterScale));
        assert!(s.buttons().is_enabled(Preset::Reset));
    }

    #[test]
    fn press_follows_button_state() {
        let mut s = Session::new(Preset::Reset);
        assert!(!s.press(Preset::Reset));

        assert!(s.press(Preset::MySolution));
        assert_eq!(s.shape().elements(), Preset::MySolution.matrix());

        assert!(s.press(Preset::KeySolution));
        assert!(!s.press(Preset::KeySolution));
        assert_eq!(s.active(), Preset::KeySolution);
    }

    #[test]
    fn any_preset_can_follow_any_other() {
        for first in Preset::ALL {
            for second in Preset::ALL.into_iter().filter(|p| *p != first) {
                let mut s = Session::new(first);
                assert!(s.press(second), "{first} -> {second}");
                assert_eq!(s.shape().elements(), second.matrix());
                assert_eq!(s.buttons().disabled_count(), 1);
            }
        }
    }
}
