use crate::preset::Preset;
use crate::shape::Shape;

/// Enabled flags of the four preset buttons, in [`Preset::ALL`] order.
///
/// Derived entirely from the last applied preset: its button is disabled,
/// the other three are enabled.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct ButtonStates {
    enabled: [bool; 4],
}

impl ButtonStates {
    pub fn after(preset: Preset) -> Self {
        let mut enabled = [true; 4];
        enabled[preset.index()] = false;
        Self { enabled }
    }

    pub fn is_enabled(&self, preset: Preset) -> bool {
        self.enabled[preset.index()]
    }

    pub fn disabled_count(&self) -> usize {
        self.enabled.iter().filter(|e| !**e).count()
    }
}

/// Applies presets to a shape and tracks which one is active.
#[derive(Debug, Clone)]
pub struct PresetSelector {
    active: Preset,
    buttons: ButtonStates,
}

impl Default for PresetSelector {
    /// Startup state: identity matrix, same buttons as right after reset.
    fn default() -> Self {
        Self {
            active: Preset::Reset,
            buttons: ButtonStates::after(Preset::Reset),
        }
    }
}

impl PresetSelector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Overwrites the shape's matrix with `preset`, whatever was active before.
    pub fn apply(&mut self, preset: Preset, shape: &mut Shape) {
        shape.set_elements(preset.matrix());
        self.active = preset;
        self.buttons = ButtonStates::after(preset);
    }

    /// A button press: ignored when the preset's button is disabled.
    ///
    /// Returns whether the preset was applied.
    pub fn press(&mut self, preset: Preset, shape: &mut Shape) -> bool {
        if !self.buttons.is_enabled(preset) {
            log::debug!("{preset} button is disabled; ignoring press");
            return false;
        }
        self.apply(preset, shape);
        true
    }

    pub fn active(&self) -> Preset {
        self.active
    }

    pub fn buttons(&self) -> ButtonStates {
        self.buttons
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn startup_matches_reset() {
        let s = PresetSelector::new();
        assert_eq!(s.active(), Preset::Reset);
        assert!(!s.buttons().is_enabled(Preset::Reset));
        assert!(s.buttons().is_enabled(Preset::KeySolution));
        assert!(s.buttons().is_enabled(Preset::MySolution));
        assert!(s.buttons().is_enabled(Preset::CenterScale));
    }

    #[test]
    fn each_preset_writes_its_literal_matrix() {
        let expected: [(Preset, [f32; 16]); 4] = [
            (Preset::Reset, [1., 0., 0., 0., 0., 1., 0., 0., 0., 0., 1., 0., 0., 0., 0., 1.]),
            (Preset::KeySolution, [2., 0., 0., 0., 0., 3., 0., 8., 0., 0., 5., 4., 0., 0., 0., 1.]),
            (Preset::MySolution, [2., 0., 0., 0., 0., 3., 0., -8., 0., 0., 5., -4., 0., 0., 0., 1.]),
            (Preset::CenterScale, [2., 0., 0., 0., 0., 3., 0., 0., 0., 0., 5., 0., 0., 0., 0., 1.]),
        ];

        for (preset, matrix) in expected {
            let mut shape = Shape::triangle();
            let mut s = PresetSelector::new();
            s.apply(preset, &mut shape);
            assert_eq!(shape.elements(), matrix, "{preset}");
        }
    }

    #[test]
    fn exactly_one_button_disabled_across_all_transitions() {
        for first in Preset::ALL {
            for second in Preset::ALL {
                let mut shape = Shape::triangle();
                let mut s = PresetSelector::new();
                s.apply(first, &mut shape);
                s.apply(second, &mut shape);

                let buttons = s.buttons();
                assert_eq!(buttons.disabled_count(), 1, "{first} -> {second}");
                assert!(!buttons.is_enabled(second));
                assert_eq!(shape.elements(), second.matrix());
            }
        }
    }

    #[test]
    fn reapplying_is_idempotent() {
        for preset in Preset::ALL {
            let mut shape = Shape::triangle();
            let mut s = PresetSelector::new();

            s.apply(preset, &mut shape);
            let (m1, b1) = (shape.elements(), s.buttons());
            s.apply(preset, &mut shape);

            assert_eq!(shape.elements(), m1);
            assert_eq!(s.buttons(), b1);
        }
    }

    #[test]
    fn pressing_a_disabled_button_changes_nothing() {
        let mut shape = Shape::triangle();
        let mut s = PresetSelector::new();
        s.apply(Preset::KeySolution, &mut shape);

        assert!(!s.press(Preset::KeySolution, &mut shape));
        assert_eq!(s.active(), Preset::KeySolution);
        assert_eq!(shape.elements(), Preset::KeySolution.matrix());

        assert!(s.press(Preset::Reset, &mut shape));
        assert_eq!(shape.elements(), Preset::Reset.matrix());
        assert!(!s.buttons().is_enabled(Preset::Reset));
    }
}
