use winit::event::{ElementState, MouseButton as WinitMouseButton, WindowEvent};
use winit::keyboard::{Key as LogicalKey, ModifiersState, NamedKey, PhysicalKey};

use crate::input::{Key, KeyState, Modifiers, MouseButton, RawInput, RawKey};

/// Output of [`PlatformInput::translate`].
#[derive(Debug, Copy, Clone, PartialEq)]
pub(crate) enum Translated {
    Input(RawInput),
    /// Pointer moved to the given window-pixel position.
    Motion((f64, f64)),
}

/// Window-system state the engine events need but winit does not carry on
/// every event.
///
/// winit 0.30 reports modifiers and cursor position as separate events, so
/// both are tracked here and attached to key and button input.
#[derive(Debug, Default)]
pub(crate) struct PlatformInput {
    modifiers: Modifiers,
    cursor: (f64, f64),
}

impl PlatformInput {
    #[cfg(test)]
    pub(crate) fn modifiers(&self) -> Modifiers {
        self.modifiers
    }

    /// Translates a winit event. Returns `None` for events the input
    /// subsystem does not represent; those may still update tracked state.
    pub(crate) fn translate(&mut self, event: &WindowEvent) -> Option<Translated> {
        match event {
            WindowEvent::ModifiersChanged(m) => {
                self.modifiers = map_modifiers(m.state());
                None
            }

            WindowEvent::Focused(false) => {
                // Modifier releases are not delivered while unfocused.
                self.modifiers = Modifiers::NONE;
                None
            }

            WindowEvent::CursorMoved { position, .. } => {
                self.cursor = (position.x, position.y);
                Some(Translated::Motion(self.cursor))
            }

            WindowEvent::MouseInput { state, button, .. } => Some(Translated::Input(RawInput {
                key: RawKey::Mouse(map_mouse_button(*button)),
                state: map_state(*state),
                modifiers: self.modifiers,
                cursor: self.cursor,
            })),

            WindowEvent::KeyboardInput { event, .. } => Some(Translated::Input(RawInput {
                key: RawKey::Keyboard(map_key(&event.logical_key, event.physical_key)),
                state: map_state(event.state),
                modifiers: self.modifiers,
                cursor: self.cursor,
            })),

            _ => None,
        }
    }
}

fn map_state(s: ElementState) -> KeyState {
    match s {
        ElementState::Pressed => KeyState::Pressed,
        ElementState::Released => KeyState::Released,
    }
}

fn map_modifiers(m: ModifiersState) -> Modifiers {
    Modifiers {
        shift: m.shift_key(),
        ctrl: m.control_key(),
        alt: m.alt_key(),
        meta: m.super_key(),
    }
}

fn map_mouse_button(b: WinitMouseButton) -> MouseButton {
    match b {
        WinitMouseButton::Left => MouseButton::Left,
        WinitMouseButton::Right => MouseButton::Right,
        WinitMouseButton::Middle => MouseButton::Middle,
        WinitMouseButton::Back => MouseButton::Back,
        WinitMouseButton::Forward => MouseButton::Forward,
        WinitMouseButton::Other(v) => MouseButton::Other(v),
    }
}

/// Prefers the layout-aware logical key; falls back to the physical code.
fn map_key(logical: &LogicalKey, physical: PhysicalKey) -> Key {
    match logical {
        LogicalKey::Character(s) => match s.chars().next() {
            Some(c) => Key::Char(c),
            None => unknown(physical),
        },
        LogicalKey::Named(named) => map_named(*named).unwrap_or_else(|| unknown(physical)),
        _ => unknown(physical),
    }
}

fn map_named(named: NamedKey) -> Option<Key> {
    let key = match named {
        NamedKey::Space => Key::Char(' '),
        NamedKey::Escape => Key::Escape,
        NamedKey::Enter => Key::Enter,
        NamedKey::Tab => Key::Tab,
        NamedKey::Backspace => Key::Backspace,
        NamedKey::Delete => Key::Delete,
        NamedKey::Insert => Key::Insert,
        NamedKey::Home => Key::Home,
        NamedKey::End => Key::End,
        NamedKey::PageUp => Key::PageUp,
        NamedKey::PageDown => Key::PageDown,

        NamedKey::ArrowUp => Key::ArrowUp,
        NamedKey::ArrowDown => Key::ArrowDown,
        NamedKey::ArrowLeft => Key::ArrowLeft,
        NamedKey::ArrowRight => Key::ArrowRight,

        NamedKey::Shift => Key::Shift,
        NamedKey::Control => Key::Control,
        NamedKey::Alt => Key::Alt,
        NamedKey::Super | NamedKey::Meta => Key::Meta,

        NamedKey::F1 => Key::F(1),
        NamedKey::F2 => Key::F(2),
        NamedKey::F3 => Key::F(3),
        NamedKey::F4 => Key::F(4),
        NamedKey::F5 => Key::F(5),
        NamedKey::F6 => Key::F(6),
        NamedKey::F7 => Key::F(7),
        NamedKey::F8 => Key::F(8),
        NamedKey::F9 => Key::F(9),
        NamedKey::F10 => Key::F(10),
        NamedKey::F11 => Key::F(11),
        NamedKey::F12 => Key::F(12),

        _ => return None,
    };
    Some(key)
}

fn unknown(physical: PhysicalKey) -> Key {
    match physical {
        PhysicalKey::Code(code) => Key::Unknown(code as u32),
        // NativeKeyCode has no stable numeric form.
        PhysicalKey::Unidentified(_) => Key::Unknown(0),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use winit::keyboard::KeyCode;

    #[test]
    fn characters_map_to_char_keys() {
        let k = map_key(&LogicalKey::Character("q".into()), PhysicalKey::Code(KeyCode::KeyQ));
        assert_eq!(k, Key::Char('q'));
    }

    #[test]
    fn space_is_a_character() {
        let k = map_key(&LogicalKey::Named(NamedKey::Space), PhysicalKey::Code(KeyCode::Space));
        assert_eq!(k, Key::Char(' '));
    }

    #[test]
    fn named_keys_map() {
        let esc = map_key(&LogicalKey::Named(NamedKey::Escape), PhysicalKey::Code(KeyCode::Escape));
        let f11 = map_key(&LogicalKey::Named(NamedKey::F11), PhysicalKey::Code(KeyCode::F11));
        assert_eq!(esc, Key::Escape);
        assert_eq!(f11, Key::F(11));
    }

    #[test]
    fn unnamed_keys_fall_back_to_physical_code() {
        let k = map_key(&LogicalKey::Named(NamedKey::AudioVolumeUp), PhysicalKey::Code(KeyCode::AudioVolumeUp));
        assert_eq!(k, Key::Unknown(KeyCode::AudioVolumeUp as u32));
    }

    #[test]
    fn mouse_buttons_map() {
        assert_eq!(map_mouse_button(WinitMouseButton::Left), MouseButton::Left);
        assert_eq!(map_mouse_button(WinitMouseButton::Other(7)), MouseButton::Other(7));
    }

    #[test]
    fn modifiers_map() {
        let m = map_modifiers(ModifiersState::SHIFT | ModifiersState::SUPER);
        assert_eq!(m, Modifiers { shift: true, meta: true, ..Modifiers::NONE });
    }

    #[test]
    fn focus_loss_clears_modifiers() {
        let mut p = PlatformInput { modifiers: Modifiers { alt: true, ..Modifiers::NONE }, cursor: (0.0, 0.0) };
        assert_eq!(p.translate(&WindowEvent::Focused(false)), None);
        assert_eq!(p.modifiers(), Modifiers::NONE);
    }
}
