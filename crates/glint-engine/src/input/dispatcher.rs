use std::fmt;

use crate::coords::{CoordinateMapper, Position};

use super::event::{InputEvent, RawInput};
use super::types::{Key, KeyState, Modifiers, MouseButton, MouseButtonState};

pub type KeyHandler = Box<dyn FnMut(Key, KeyState, Modifiers)>;
pub type MouseButtonHandler = Box<dyn FnMut(MouseButton, MouseButtonState, Position)>;
pub type MotionHandler = Box<dyn FnMut(Position)>;

/// Routes input to the optional user handlers.
///
/// Handlers run synchronously on the event loop thread. A slow handler
/// delays the next frame and every queued event.
#[derive(Default)]
pub struct EventDispatcher {
    key: Option<KeyHandler>,
    mouse_button: Option<MouseButtonHandler>,
    motion: Option<MotionHandler>,
}

impl EventDispatcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_key_handler<F>(&mut self, handler: F)
    where
        F: FnMut(Key, KeyState, Modifiers) + 'static,
    {
        self.key = Some(Box::new(handler));
    }

    pub fn set_mouse_button_handler<F>(&mut self, handler: F)
    where
        F: FnMut(MouseButton, MouseButtonState, Position) + 'static,
    {
        self.mouse_button = Some(Box::new(handler));
    }

    pub fn set_motion_handler<F>(&mut self, handler: F)
    where
        F: FnMut(Position) + 'static,
    {
        self.motion = Some(Box::new(handler));
    }

    pub fn has_key_handler(&self) -> bool {
        self.key.is_some()
    }

    pub fn has_mouse_button_handler(&self) -> bool {
        self.mouse_button.is_some()
    }

    pub fn has_motion_handler(&self) -> bool {
        self.motion.is_some()
    }

    /// Classifies `raw` and invokes the matching handler, if any.
    pub fn dispatch(&mut self, raw: RawInput, mapper: &CoordinateMapper) {
        match InputEvent::classify(raw, mapper) {
            InputEvent::Keyboard { key, state, modifiers } => {
                if let Some(handler) = self.key.as_mut() {
                    handler(key, state, modifiers);
                }
            }
            InputEvent::MouseButton { button, state, position } => {
                if let Some(handler) = self.mouse_button.as_mut() {
                    handler(button, state, position);
                }
            }
        }
    }

    /// Maps a raw cursor position and invokes the motion handler, if any.
    pub fn dispatch_motion(&mut self, cursor: (f64, f64), mapper: &CoordinateMapper) {
        if let Some(handler) = self.motion.as_mut() {
            handler(mapper.map(cursor.0, cursor.1));
        }
    }
}

impl fmt::Debug for EventDispatcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EventDispatcher")
            .field("key", &self.key.is_some())
            .field("mouse_button", &self.mouse_button.is_some())
            .field("motion", &self.motion.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use super::*;
    use crate::coords::PixelSize;
    use crate::input::RawKey;

    #[derive(Debug, Clone, PartialEq)]
    enum Call {
        Key(Key, KeyState, Modifiers),
        Button(MouseButton, MouseButtonState, Position),
        Motion(Position),
    }

    type Log = Rc<RefCell<Vec<Call>>>;

    fn recording_dispatcher(key: bool, button: bool, motion: bool) -> (EventDispatcher, Log) {
        let log: Log = Rc::default();
        let mut d = EventDispatcher::new();
        if key {
            let log = Rc::clone(&log);
            d.set_key_handler(move |k, s, m| log.borrow_mut().push(Call::Key(k, s, m)));
        }
        if button {
            let log = Rc::clone(&log);
            d.set_mouse_button_handler(move |b, s, p| log.borrow_mut().push(Call::Button(b, s, p)));
        }
        if motion {
            let log = Rc::clone(&log);
            d.set_motion_handler(move |p| log.borrow_mut().push(Call::Motion(p)));
        }
        (d, log)
    }

    fn mapper() -> CoordinateMapper {
        CoordinateMapper::new(PixelSize::new(640, 480))
    }

    fn mouse(button: MouseButton, cursor: (f64, f64)) -> RawInput {
        RawInput {
            key: RawKey::Mouse(button),
            state: KeyState::Pressed,
            modifiers: Modifiers::NONE,
            cursor,
        }
    }

    fn key(k: Key, state: KeyState) -> RawInput {
        RawInput {
            key: RawKey::Keyboard(k),
            state,
            modifiers: Modifiers { ctrl: true, ..Modifiers::NONE },
            cursor: (5.0, 5.0),
        }
    }

    #[test]
    fn mouse_button_reaches_mouse_handler_with_mapped_position() {
        let (mut d, log) = recording_dispatcher(true, true, true);
        let m = mapper();

        d.dispatch(mouse(MouseButton::Left, (320.0, 120.0)), &m);

        assert_eq!(
            *log.borrow(),
            vec![Call::Button(MouseButton::Left, MouseButtonState::Pressed, m.map(320.0, 120.0))]
        );
    }

    #[test]
    fn mouse_button_never_reaches_key_handler() {
        let (mut d, log) = recording_dispatcher(true, false, false);
        d.dispatch(mouse(MouseButton::Middle, (1.0, 1.0)), &mapper());
        assert!(log.borrow().is_empty());
    }

    #[test]
    fn keyboard_reaches_key_handler() {
        let (mut d, log) = recording_dispatcher(true, true, true);
        d.dispatch(key(Key::Char('x'), KeyState::Pressed), &mapper());
        d.dispatch(key(Key::Char('x'), KeyState::Released), &mapper());

        let ctrl = Modifiers { ctrl: true, ..Modifiers::NONE };
        assert_eq!(
            *log.borrow(),
            vec![
                Call::Key(Key::Char('x'), KeyState::Pressed, ctrl),
                Call::Key(Key::Char('x'), KeyState::Released, ctrl),
            ]
        );
    }

    #[test]
    fn motion_is_mapped() {
        let (mut d, log) = recording_dispatcher(false, false, true);
        let m = mapper();
        d.dispatch_motion((640.0, 0.0), &m);
        assert_eq!(*log.borrow(), vec![Call::Motion(m.map(640.0, 0.0))]);
    }

    #[test]
    fn missing_handlers_drop_events() {
        let (mut d, log) = recording_dispatcher(false, false, false);
        let m = mapper();
        d.dispatch(key(Key::Escape, KeyState::Pressed), &m);
        d.dispatch(mouse(MouseButton::Left, (0.0, 0.0)), &m);
        d.dispatch_motion((3.0, 4.0), &m);
        assert!(log.borrow().is_empty());
    }

    #[test]
    fn later_resize_affects_only_later_events() {
        let (mut d, log) = recording_dispatcher(false, true, false);
        let mut m = mapper();

        d.dispatch(mouse(MouseButton::Left, (320.0, 240.0)), &m);
        m.resize(PixelSize::new(1280, 960));
        d.dispatch(mouse(MouseButton::Left, (320.0, 240.0)), &m);

        let calls = log.borrow();
        let Call::Button(_, _, first) = calls[0] else { panic!("expected button call") };
        let Call::Button(_, _, second) = calls[1] else { panic!("expected button call") };
        approx::assert_relative_eq!(first.x, 0.65, epsilon = 1e-6);
        approx::assert_relative_eq!(first.y, 0.5, epsilon = 1e-6);
        assert!(second.x < first.x);
        assert!(second.y > first.y);
    }
}
