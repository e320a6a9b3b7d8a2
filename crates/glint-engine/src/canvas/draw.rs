use crate::coords::{CoordinateMapper, PixelSize, Position};
use crate::image::{ImageDecoder, ImageError, ImageResource};
use crate::text::{FontHandle, SCALED_TEXT_EM, TEXT_FACE_PX, TEXT_LINE_HEIGHT_PX};

use super::{Color, Graphics, TextFace, TextRun, TextureId, TexturedQuad};

/// Drawing surface for one frame.
pub struct Canvas<'a> {
    gfx: &'a mut dyn Graphics,
    decoder: &'a dyn ImageDecoder,
    mapper: CoordinateMapper,
    text_color: Color,
}

impl<'a> Canvas<'a> {
    pub fn new(
        gfx: &'a mut dyn Graphics,
        decoder: &'a dyn ImageDecoder,
        mapper: CoordinateMapper,
    ) -> Self {
        Self {
            gfx,
            decoder,
            mapper,
            text_color: Color::WHITE,
        }
    }

    /// Window size in pixels for this frame.
    pub fn size(&self) -> PixelSize {
        self.mapper.size()
    }

    pub fn mapper(&self) -> &CoordinateMapper {
        &self.mapper
    }

    pub fn text_color(&self) -> Color {
        self.text_color
    }

    pub fn set_text_color(&mut self, color: Color) {
        self.text_color = color;
    }

    /// Draws `image` over the whole logical plane.
    ///
    /// The first draw of a resource decodes and uploads it. A decode failure,
    /// or an image over the texture size limit, is fatal: it is logged and the thread panics with the path and the
    /// decoder message. Use [`try_draw_image`](Self::try_draw_image) to
    /// handle it instead.
    pub fn draw_image(&mut self, image: &ImageResource) {
        if let Err(err) = self.try_draw_image(image) {
            log::error!("{err}");
            panic!("{err}");
        }
    }

    /// Like [`draw_image`](Self::draw_image) but returns decode and size
    /// failures.
    ///
    /// A failed resource stays unloaded, so a later draw retries the decode.
    pub fn try_draw_image(&mut self, image: &ImageResource) -> Result<(), ImageError> {
        let texture = image.texture_or_load(self.decoder, &mut *self.gfx)?;

        let mut binding = TextureBinding::bind(&mut *self.gfx, texture);
        binding.gfx.emit_quad(TexturedQuad::full_plane());
        Ok(())
    }

    /// Draws `lines` top to bottom with the fixed text face, the first
    /// baseline at `anchor`.
    ///
    /// Line spacing is a fixed pixel metric, so it shrinks in logical units
    /// as the window grows taller.
    pub fn draw_text<I, S>(&mut self, anchor: Position, lines: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let spacing = self.mapper.pixels_to_logical_height(TEXT_LINE_HEIGHT_PX);
        let em = self.mapper.pixels_to_logical_height(TEXT_FACE_PX);

        for (k, line) in lines.into_iter().enumerate() {
            self.gfx.emit_text(TextRun {
                text: line.as_ref().to_string(),
                face: TextFace::Fixed,
                em,
                origin: Position::new(anchor.x, anchor.y - k as f32 * spacing),
                color: self.text_color,
            });
        }
    }

    /// Draws `text` with `font`, scaled down to a fixed logical size.
    pub fn draw_scaled_text(&mut self, font: &FontHandle, text: &str, origin: Position) {
        self.gfx.emit_text(TextRun {
            text: text.to_string(),
            face: TextFace::Font(font.clone()),
            em: SCALED_TEXT_EM,
            origin,
            color: self.text_color,
        });
    }
}

/// Binds a texture and restores the previous binding on drop.
struct TextureBinding<'g, G: Graphics + ?Sized> {
    gfx: &'g mut G,
    previous: Option<TextureId>,
}

impl<'g, G: Graphics + ?Sized> TextureBinding<'g, G> {
    fn bind(gfx: &'g mut G, texture: TextureId) -> Self {
        let previous = gfx.bound_texture();
        gfx.bind_texture(Some(texture));
        Self { gfx, previous }
    }
}

impl<G: Graphics + ?Sized> Drop for TextureBinding<'_, G> {
    fn drop(&mut self) {
        self.gfx.bind_texture(self.previous);
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;
    use crate::image::load_image;
    use crate::testing::{CountingDecoder, RecordingGraphics};

    fn mapper() -> CoordinateMapper {
        CoordinateMapper::new(PixelSize::new(800, 600))
    }

    // ── images ────────────────────────────────────────────────────────────

    #[test]
    fn five_draws_decode_once_and_emit_five_quads() {
        let decoder = CountingDecoder::new();
        let mut gfx = RecordingGraphics::default();
        let image = load_image("a.png");
        assert_eq!(decoder.calls(), 0);

        {
            let mut canvas = Canvas::new(&mut gfx, &decoder, mapper());
            for _ in 0..5 {
                canvas.draw_image(&image);
            }
        }

        assert_eq!(decoder.calls(), 1);
        assert_eq!(gfx.uploads.len(), 1);
        assert_eq!(gfx.quads.len(), 5);
    }

    #[test]
    fn draws_across_frames_reuse_the_texture() {
        let decoder = CountingDecoder::new();
        let mut gfx = RecordingGraphics::default();
        let image = load_image("a.png");

        for _ in 0..3 {
            let mut canvas = Canvas::new(&mut gfx, &decoder, mapper());
            canvas.draw_image(&image);
        }

        assert_eq!(decoder.calls(), 1);
        let texture = image.texture();
        assert!(gfx.quads.iter().all(|(bound, _)| *bound == texture));
    }

    #[test]
    fn quad_covers_the_logical_plane() {
        let decoder = CountingDecoder::new();
        let mut gfx = RecordingGraphics::default();
        let image = load_image("a.png");

        Canvas::new(&mut gfx, &decoder, mapper()).draw_image(&image);

        let (_, quad) = gfx.quads[0];
        assert_eq!(quad, TexturedQuad::full_plane());
        assert_eq!(quad.corners[2], Position::new(1.3, 1.0));
    }

    #[test]
    fn draw_restores_previous_binding() {
        let decoder = CountingDecoder::new();
        let mut gfx = RecordingGraphics::default();
        let outer = TextureId(77);
        gfx.bind_texture(Some(outer));
        let image = load_image("a.png");

        Canvas::new(&mut gfx, &decoder, mapper()).draw_image(&image);

        assert_eq!(gfx.bound_texture(), Some(outer));
        assert_eq!(gfx.quads[0].0, image.texture());
        assert_ne!(image.texture(), Some(outer));
        assert_eq!(gfx.binds, vec![Some(outer), image.texture(), Some(outer)]);
    }

    #[test]
    fn draw_restores_empty_binding() {
        let decoder = CountingDecoder::new();
        let mut gfx = RecordingGraphics::default();
        let image = load_image("a.png");

        Canvas::new(&mut gfx, &decoder, mapper()).draw_image(&image);

        assert_eq!(gfx.bound_texture(), None);
    }

    #[test]
    #[should_panic(expected = "missing.png")]
    fn decode_failure_is_fatal() {
        let decoder = CountingDecoder::failing();
        let mut gfx = RecordingGraphics::default();
        let image = load_image("missing.png");

        Canvas::new(&mut gfx, &decoder, mapper()).draw_image(&image);
    }

    #[test]
    fn try_draw_image_reports_and_retries() {
        let decoder = CountingDecoder::failing();
        let mut gfx = RecordingGraphics::default();
        let image = load_image("missing.png");
        let mut canvas = Canvas::new(&mut gfx, &decoder, mapper());

        assert!(canvas.try_draw_image(&image).is_err());
        assert!(canvas.try_draw_image(&image).is_err());
        drop(canvas);

        assert_eq!(decoder.calls(), 2);
        assert!(gfx.quads.is_empty());
        assert_eq!(gfx.bound_texture(), None);
    }

    #[test]
    fn try_draw_image_rejects_oversized_image() {
        let decoder = CountingDecoder::sized(9000, 4);
        let mut gfx = RecordingGraphics::with_max_texture_dimension(8192);
        let image = load_image("huge.png");

        let err = Canvas::new(&mut gfx, &decoder, mapper())
            .try_draw_image(&image)
            .unwrap_err();

        assert!(matches!(err, ImageError::TooLarge { width: 9000, max: 8192, .. }));
        assert!(!image.is_loaded());
        assert!(gfx.uploads.is_empty());
        assert!(gfx.quads.is_empty());
    }

    // ── text ──────────────────────────────────────────────────────────────

    #[test]
    fn text_lines_step_down_by_fixed_metric() {
        let decoder = CountingDecoder::new();
        let mut gfx = RecordingGraphics::default();

        Canvas::new(&mut gfx, &decoder, mapper())
            .draw_text(Position::new(0.1, 0.9), ["one", "two", "three"]);

        let spacing = TEXT_LINE_HEIGHT_PX / 600.0;
        assert_eq!(gfx.texts.len(), 3);
        for (k, run) in gfx.texts.iter().enumerate() {
            assert_eq!(run.face, TextFace::Fixed);
            assert_relative_eq!(run.origin.x, 0.1, epsilon = 1e-6);
            assert_relative_eq!(run.origin.y, 0.9 - k as f32 * spacing, epsilon = 1e-6);
            assert_relative_eq!(run.em, TEXT_FACE_PX / 600.0, epsilon = 1e-6);
        }
        assert_eq!(gfx.texts[2].text, "three");
    }

    #[test]
    fn text_spacing_follows_window_height() {
        let decoder = CountingDecoder::new();
        let mut gfx = RecordingGraphics::default();
        let tall = CoordinateMapper::new(PixelSize::new(800, 1200));

        Canvas::new(&mut gfx, &decoder, tall).draw_text(Position::new(0.0, 1.0), ["a", "b"]);

        let step = gfx.texts[0].origin.y - gfx.texts[1].origin.y;
        assert_relative_eq!(step, TEXT_LINE_HEIGHT_PX / 1200.0, epsilon = 1e-6);
    }

    #[test]
    fn text_uses_current_color() {
        let decoder = CountingDecoder::new();
        let mut gfx = RecordingGraphics::default();
        let red = Color::rgba(1.0, 0.0, 0.0, 1.0);

        let mut canvas = Canvas::new(&mut gfx, &decoder, mapper());
        canvas.set_text_color(red);
        canvas.draw_text(Position::origin(), ["x"]);
        drop(canvas);

        assert_eq!(gfx.texts[0].color, red);
    }
}
