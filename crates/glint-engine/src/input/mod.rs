//! Input subsystem.
//!
//! The platform layer turns window-system events into [`RawInput`] (keyboard
//! keys and mouse buttons share one overloaded identifier, as most window
//! systems report them) or raw motion. [`EventDispatcher`] classifies raw
//! input once into an [`InputEvent`], maps positions through the
//! [`CoordinateMapper`](crate::coords::CoordinateMapper), and forwards to the
//! registered handler. Missing handlers drop their events silently.

mod dispatcher;
mod event;
mod types;

pub(crate) mod platform;

pub use dispatcher::{EventDispatcher, KeyHandler, MotionHandler, MouseButtonHandler};
pub use event::{InputEvent, RawInput, RawKey};
pub use types::{Key, KeyState, Modifiers, MouseButton, MouseButtonState};
