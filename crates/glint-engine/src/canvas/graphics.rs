use crate::coords::{Position, LOGICAL_HEIGHT, LOGICAL_WIDTH};
use crate::image::Bitmap;
use crate::text::FontHandle;

use super::Color;

/// Opaque handle to an uploaded GPU texture.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct TextureId(pub(crate) u32);

/// Quad in logical space with per-corner texture coordinates.
///
/// Corners run counter-clockwise from bottom-left.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct TexturedQuad {
    pub corners: [Position; 4],
    pub uvs: [[f32; 2]; 4],
}

impl TexturedQuad {
    /// Covers the whole logical plane with the whole texture.
    ///
    /// Texture row 0 is the top of the image, so the bottom-left corner
    /// samples `v = 1`.
    pub const fn full_plane() -> Self {
        Self {
            corners: [
                Position::new(0.0, 0.0),
                Position::new(LOGICAL_WIDTH, 0.0),
                Position::new(LOGICAL_WIDTH, LOGICAL_HEIGHT),
                Position::new(0.0, LOGICAL_HEIGHT),
            ],
            uvs: [[0.0, 1.0], [1.0, 1.0], [1.0, 0.0], [0.0, 0.0]],
        }
    }
}

/// Font a [`TextRun`] is drawn with.
#[derive(Debug, Clone, PartialEq)]
pub enum TextFace {
    /// The runtime's fixed text face.
    Fixed,
    Font(FontHandle),
}

/// One line of text.
#[derive(Debug, Clone, PartialEq)]
pub struct TextRun {
    pub text: String,
    pub face: TextFace,
    /// Em height in logical units.
    pub em: f32,
    /// Left end of the baseline in logical space.
    pub origin: Position,
    pub color: Color,
}

/// Graphics context operations the canvas relies on.
///
/// Implementations are confined to the thread that owns the graphics
/// context.
pub trait Graphics {
    /// Largest width or height [`upload_texture`](Self::upload_texture)
    /// accepts.
    fn max_texture_dimension(&self) -> u32;

    /// Uploads `bitmap` as a new texture. Both dimensions are within
    /// [`max_texture_dimension`](Self::max_texture_dimension).
    fn upload_texture(&mut self, bitmap: &Bitmap) -> TextureId;

    /// Texture quads are currently drawn with.
    fn bound_texture(&self) -> Option<TextureId>;

    fn bind_texture(&mut self, texture: Option<TextureId>);

    /// Emits `quad` using the bound texture.
    fn emit_quad(&mut self, quad: TexturedQuad);

    fn emit_text(&mut self, run: TextRun);
}
