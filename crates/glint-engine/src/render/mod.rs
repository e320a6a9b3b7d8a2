//! GPU rendering.
//!
//! A frame is painted in two phases. While the frame handler runs, a
//! [`FrameRecorder`] uploads textures and records draw commands. Afterwards
//! the [`FramePainter`] clears the surface and replays the commands in issue
//! order, batching consecutive images and consecutive text runs.
//!
//! Image geometry is in logical space (`[0, 1.3] x [0, 1]`, y up); glyph
//! geometry is in pixels (top-left origin, y down).

mod ctx;
mod painter;
mod recorder;
mod store;
pub mod shapes;

pub use ctx::RenderCtx;
pub use painter::FramePainter;
pub use recorder::FrameRecorder;
pub use store::TextureStore;
