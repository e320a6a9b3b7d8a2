//! Window-system translation.

mod winit;

pub(crate) use self::winit::{PlatformInput, Translated};
