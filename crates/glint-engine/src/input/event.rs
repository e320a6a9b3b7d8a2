use crate::coords::{CoordinateMapper, Position};

use super::types::{Key, KeyState, Modifiers, MouseButton, MouseButtonState};

/// Identifier as reported by the window system: either a keyboard key or a
/// mouse button.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum RawKey {
    Keyboard(Key),
    Mouse(MouseButton),
}

/// Unclassified key or button input.
///
/// `cursor` is the pointer position in window pixels at the time of the
/// event. It is only meaningful for mouse buttons.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct RawInput {
    pub key: RawKey,
    pub state: KeyState,
    pub modifiers: Modifiers,
    pub cursor: (f64, f64),
}

/// Classified input.
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum InputEvent {
    Keyboard {
        key: Key,
        state: KeyState,
        modifiers: Modifiers,
    },
    MouseButton {
        button: MouseButton,
        state: MouseButtonState,
        position: Position,
    },
}

impl InputEvent {
    /// Resolves the overloaded identifier in `raw`.
    ///
    /// Mouse buttons get their cursor mapped to logical space; keyboard keys
    /// keep their modifiers and ignore the cursor.
    pub fn classify(raw: RawInput, mapper: &CoordinateMapper) -> Self {
        match raw.key {
            RawKey::Mouse(button) => InputEvent::MouseButton {
                button,
                state: raw.state.into(),
                position: mapper.map(raw.cursor.0, raw.cursor.1),
            },
            RawKey::Keyboard(key) => InputEvent::Keyboard {
                key,
                state: raw.state,
                modifiers: raw.modifiers,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coords::PixelSize;

    fn mapper() -> CoordinateMapper {
        CoordinateMapper::new(PixelSize::new(800, 600))
    }

    #[test]
    fn mouse_keys_become_button_events() {
        let raw = RawInput {
            key: RawKey::Mouse(MouseButton::Right),
            state: KeyState::Released,
            modifiers: Modifiers::NONE,
            cursor: (0.0, 600.0),
        };
        assert_eq!(
            InputEvent::classify(raw, &mapper()),
            InputEvent::MouseButton {
                button: MouseButton::Right,
                state: MouseButtonState::Released,
                position: Position::new(0.0, 0.0),
            }
        );
    }

    #[test]
    fn keyboard_keys_keep_modifiers() {
        let mods = Modifiers { shift: true, ..Modifiers::NONE };
        let raw = RawInput {
            key: RawKey::Keyboard(Key::Char('A')),
            state: KeyState::Pressed,
            modifiers: mods,
            cursor: (10.0, 10.0),
        };
        assert_eq!(
            InputEvent::classify(raw, &mapper()),
            InputEvent::Keyboard { key: Key::Char('A'), state: KeyState::Pressed, modifiers: mods }
        );
    }
}
