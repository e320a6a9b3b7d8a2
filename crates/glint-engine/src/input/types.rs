use std::fmt;

/// Keyboard key identifier.
///
/// Printable keys arrive as `Char` carrying the character the layout
/// produced; everything else is a named key. Keys the engine has no name for
/// are reported as `Unknown` with the platform key code.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum Key {
    Char(char),

    Escape,
    Enter,
    Tab,
    Backspace,
    Delete,
    Insert,
    Home,
    End,
    PageUp,
    PageDown,

    ArrowUp,
    ArrowDown,
    ArrowLeft,
    ArrowRight,

    Shift,
    Control,
    Alt,
    Meta,

    /// Function key `F1`..`F12`.
    F(u8),

    Unknown(u32),
}

#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum KeyState {
    Pressed,
    Released,
}

#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum MouseButton {
    Left,
    Right,
    Middle,
    Back,
    Forward,
    Other(u16),
}

#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum MouseButtonState {
    Pressed,
    Released,
}

impl From<KeyState> for MouseButtonState {
    fn from(s: KeyState) -> Self {
        match s {
            KeyState::Pressed => MouseButtonState::Pressed,
            KeyState::Released => MouseButtonState::Released,
        }
    }
}

/// Modifier keys held when an event was produced.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq, Hash)]
pub struct Modifiers {
    pub shift: bool,
    pub ctrl: bool,
    pub alt: bool,
    pub meta: bool,
}

impl Modifiers {
    pub const NONE: Modifiers = Modifiers { shift: false, ctrl: false, alt: false, meta: false };

    pub fn any(&self) -> bool {
        self.shift || self.ctrl || self.alt || self.meta
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Key::Char(c) => write!(f, "'{c}'"),
            Key::F(n) => write!(f, "F{n}"),
            Key::Unknown(code) => write!(f, "Unknown({code:#x})"),
            other => write!(f, "{other:?}"),
        }
    }
}
