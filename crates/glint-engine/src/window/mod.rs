//! Window and event loop.
//!
//! Owns the `winit` event loop and window, wires them to the GPU layer, the
//! frame scheduler and the input dispatcher.

mod runtime;

pub use runtime::{DetachedRuntime, Runtime, RENDER_THREAD_NAME};
