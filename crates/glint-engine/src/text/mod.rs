//! Text faces and text metrics.
//!
//! Two ways to draw text: [`Canvas::draw_text`] uses the runtime's fixed
//! face at a fixed pixel size; [`Canvas::draw_scaled_text`] uses a font the
//! caller opened with [`open_font`] at a fixed logical size.
//!
//! [`Canvas::draw_text`]: crate::canvas::Canvas::draw_text
//! [`Canvas::draw_scaled_text`]: crate::canvas::Canvas::draw_scaled_text

mod font;

pub use font::{open_font, FontError, FontHandle};

/// Pixel em height of the fixed text face.
pub const TEXT_FACE_PX: f32 = 18.0;

/// Pixel distance between consecutive `draw_text` baselines.
pub const TEXT_LINE_HEIGHT_PX: f32 = 24.0;

/// Face size fonts are opened at by [`open_font`].
pub const FONT_FACE_SIZE: f32 = 72.0;

/// Uniform scale applied by `draw_scaled_text`, logical units per face unit.
pub const SCALED_TEXT_FACTOR: f32 = 0.001;

/// Logical em height of scaled text.
pub const SCALED_TEXT_EM: f32 = FONT_FACE_SIZE * SCALED_TEXT_FACTOR;
