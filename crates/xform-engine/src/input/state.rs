use super::types::{InputEvent, PointerButtonEvent};

/// Input state the runtime carries between events.
///
/// winit reports clicks without a position, so the last pointer position is
/// kept here and stamped onto each button event.
#[derive(Debug, Default)]
pub struct InputState {
    /// Pointer position in logical pixels; `None` while outside the window.
    pub pointer_pos: Option<(f32, f32)>,
}

impl InputState {
    /// Applies a platform-agnostic input event to the current state.
    pub fn apply_event(&mut self, ev: &InputEvent) {
        match ev {
            InputEvent::PointerMoved { x, y }
            | InputEvent::PointerButton(PointerButtonEvent { x, y, .. }) => {
                self.pointer_pos = Some((*x, *y));
            }

            InputEvent::PointerLeft => {
                self.pointer_pos = None;
            }

            InputEvent::Key { .. } => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::{Key, KeyState, MouseButton, MouseButtonState};

    #[test]
    fn button_press_records_position() {
        let mut s = InputState::default();
        s.apply_event(&InputEvent::PointerButton(PointerButtonEvent {
            button: MouseButton::Left,
            state: MouseButtonState::Pressed,
            x: 4.0,
            y: 8.0,
        }));
        assert_eq!(s.pointer_pos, Some((4.0, 8.0)));
    }

    #[test]
    fn pointer_left_forgets_position() {
        let mut s = InputState::default();
        s.apply_event(&InputEvent::PointerMoved { x: 1.0, y: 2.0 });
        s.apply_event(&InputEvent::Key {
            key: Key::Escape,
            state: KeyState::Pressed,
            repeat: false,
        });
        assert_eq!(s.pointer_pos, Some((1.0, 2.0)));

        s.apply_event(&InputEvent::PointerLeft);
        assert_eq!(s.pointer_pos, None);
    }
}
