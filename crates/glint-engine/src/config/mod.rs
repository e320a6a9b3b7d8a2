//! Application configuration.
//!
//! `Config` is the whole configuration surface of the engine: the frame
//! handler, optional input handlers, window title and size, and the target
//! frame rate. It is built once by the caller and handed to
//! [`Runtime`](crate::window::Runtime), which validates it before the frame
//! loop starts.

mod builder;
mod error;

pub use builder::{Config, FrameHandler, DEFAULT_FPS, DEFAULT_SIZE, DEFAULT_TITLE};
pub use error::ConfigError;

pub(crate) use builder::ConfigParts;
