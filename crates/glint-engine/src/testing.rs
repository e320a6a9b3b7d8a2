//! Fakes for the graphics context, the image decoder and the clock.

use std::cell::Cell;
use std::path::Path;
use std::time::{Duration, Instant};

use crate::canvas::{Graphics, TextRun, TextureId, TexturedQuad};
use crate::image::{Bitmap, ImageDecoder, ImageError};
use crate::time::Clock;

/// Clock that only moves when told to.
pub(crate) struct ManualClock {
    now: Cell<Instant>,
}

impl ManualClock {
    pub(crate) fn new() -> Self {
        Self {
            now: Cell::new(Instant::now()),
        }
    }

    pub(crate) fn advance(&self, by: Duration) {
        self.now.set(self.now.get() + by);
    }

    pub(crate) fn set(&self, at: Instant) {
        self.now.set(at);
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Instant {
        self.now.get()
    }
}

/// Graphics context that records every call.
#[derive(Default)]
pub(crate) struct RecordingGraphics {
    pub uploads: Vec<(TextureId, u32, u32)>,
    pub bound: Option<TextureId>,
    pub binds: Vec<Option<TextureId>>,
    pub quads: Vec<(Option<TextureId>, TexturedQuad)>,
    pub texts: Vec<TextRun>,
    max_texture_dimension: Option<u32>,
    next_id: u32,
}

impl RecordingGraphics {
    pub(crate) fn with_max_texture_dimension(max: u32) -> Self {
        Self {
            max_texture_dimension: Some(max),
            ..Self::default()
        }
    }
}

impl Graphics for RecordingGraphics {
    fn max_texture_dimension(&self) -> u32 {
        self.max_texture_dimension.unwrap_or(u32::MAX)
    }

    fn upload_texture(&mut self, bitmap: &Bitmap) -> TextureId {
        let id = TextureId(self.next_id);
        self.next_id += 1;
        self.uploads.push((id, bitmap.width, bitmap.height));
        id
    }

    fn bound_texture(&self) -> Option<TextureId> {
        self.bound
    }

    fn bind_texture(&mut self, texture: Option<TextureId>) {
        self.bound = texture;
        self.binds.push(texture);
    }

    fn emit_quad(&mut self, quad: TexturedQuad) {
        self.quads.push((self.bound, quad));
    }

    fn emit_text(&mut self, run: TextRun) {
        self.texts.push(run);
    }
}

/// Decoder that counts calls and returns a solid bitmap (2x2 unless sized),
/// or fails.
pub(crate) struct CountingDecoder {
    calls: Cell<usize>,
    fail: bool,
    size: (u32, u32),
}

impl CountingDecoder {
    pub(crate) fn new() -> Self {
        Self::sized(2, 2)
    }

    pub(crate) fn sized(width: u32, height: u32) -> Self {
        Self {
            calls: Cell::new(0),
            fail: false,
            size: (width, height),
        }
    }

    pub(crate) fn failing() -> Self {
        Self {
            fail: true,
            ..Self::new()
        }
    }

    pub(crate) fn calls(&self) -> usize {
        self.calls.get()
    }
}

impl ImageDecoder for CountingDecoder {
    fn decode(&self, path: &Path) -> Result<Bitmap, ImageError> {
        self.calls.set(self.calls.get() + 1);
        if self.fail {
            return Err(ImageError::Decode {
                path: path.to_path_buf(),
                message: "unsupported format".to_string(),
            });
        }
        Ok(Bitmap::solid(self.size.0, self.size.1, [255, 0, 0, 255]))
    }
}
