//! Per-frame drawing surface.
//!
//! The frame handler receives a [`Canvas`]. Canvas operations are expressed
//! against the [`Graphics`] trait (texture upload, texture binding, quad and
//! text emission); the runtime implements it on top of wgpu, tests implement
//! it with a recorder.

mod color;
mod draw;
mod graphics;

pub use color::Color;
pub use draw::Canvas;
pub use graphics::{Graphics, TextFace, TextRun, TextureId, TexturedQuad};
