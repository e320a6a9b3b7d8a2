use std::cell::OnceCell;
use std::path::{Path, PathBuf};

use crate::canvas::{Graphics, TextureId};

use super::{ImageDecoder, ImageError};

/// Path-addressed image with a lazily created GPU texture.
///
/// The texture cell is written at most once, by the first successful draw.
/// `OnceCell` is not `Sync`, so a resource cannot be shared across threads;
/// draws go through [`Canvas`](crate::canvas::Canvas), which only exists on
/// the render thread.
///
/// Dropping a resource does not release its texture. Textures belong to the
/// runtime and are released with it.
#[derive(Debug)]
pub struct ImageResource {
    path: PathBuf,
    texture: OnceCell<TextureId>,
}

/// Creates an unloaded resource for `path`. Performs no I/O.
pub fn load_image(path: impl Into<PathBuf>) -> ImageResource {
    ImageResource {
        path: path.into(),
        texture: OnceCell::new(),
    }
}

impl ImageResource {
    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn is_loaded(&self) -> bool {
        self.texture.get().is_some()
    }

    /// Cached texture, if the image has been drawn.
    pub fn texture(&self) -> Option<TextureId> {
        self.texture.get().copied()
    }

    /// Returns the cached texture, decoding and uploading on first use.
    ///
    /// A failed decode, or a bitmap over the graphics texture limit, leaves
    /// the cell empty.
    pub(crate) fn texture_or_load<D, G>(&self, decoder: &D, gfx: &mut G) -> Result<TextureId, ImageError>
    where
        D: ImageDecoder + ?Sized,
        G: Graphics + ?Sized,
    {
        if let Some(&texture) = self.texture.get() {
            return Ok(texture);
        }

        let bitmap = decoder.decode(&self.path)?;
        if bitmap.is_empty() {
            return Err(ImageError::Empty { path: self.path.clone() });
        }

        let max = gfx.max_texture_dimension();
        if bitmap.width > max || bitmap.height > max {
            return Err(ImageError::TooLarge {
                path: self.path.clone(),
                width: bitmap.width,
                height: bitmap.height,
                max,
            });
        }

        let texture = gfx.upload_texture(&bitmap);
        log::info!(
            "loaded image {} ({}x{}) as {texture:?}",
            self.path.display(),
            bitmap.width,
            bitmap.height,
        );

        Ok(*self.texture.get_or_init(|| texture))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{CountingDecoder, RecordingGraphics};

    #[test]
    fn load_image_performs_no_io() {
        let decoder = CountingDecoder::new();
        let image = load_image("a.png");
        assert_eq!(image.path(), Path::new("a.png"));
        assert!(!image.is_loaded());
        assert_eq!(decoder.calls(), 0);
    }

    #[test]
    fn first_use_decodes_and_uploads_once() {
        let decoder = CountingDecoder::new();
        let mut gfx = RecordingGraphics::default();
        let image = load_image("a.png");

        let first = image.texture_or_load(&decoder, &mut gfx).unwrap();
        let second = image.texture_or_load(&decoder, &mut gfx).unwrap();

        assert_eq!(first, second);
        assert_eq!(image.texture(), Some(first));
        assert_eq!(decoder.calls(), 1);
        assert_eq!(gfx.uploads.len(), 1);
    }

    #[test]
    fn failed_decode_leaves_resource_unloaded() {
        let decoder = CountingDecoder::failing();
        let mut gfx = RecordingGraphics::default();
        let image = load_image("broken.png");

        let err = image.texture_or_load(&decoder, &mut gfx).unwrap_err();

        assert_eq!(err.path(), Path::new("broken.png"));
        assert!(!image.is_loaded());
        assert!(gfx.uploads.is_empty());
    }

    #[test]
    fn oversized_bitmap_is_rejected_before_upload() {
        let decoder = CountingDecoder::sized(64, 16);
        let mut gfx = RecordingGraphics::with_max_texture_dimension(32);
        let image = load_image("wide.png");

        let err = image.texture_or_load(&decoder, &mut gfx).unwrap_err();

        assert_eq!(
            err,
            ImageError::TooLarge {
                path: PathBuf::from("wide.png"),
                width: 64,
                height: 16,
                max: 32,
            }
        );
        assert!(!image.is_loaded());
        assert!(gfx.uploads.is_empty());
    }

    #[test]
    fn bitmap_at_the_limit_uploads() {
        let decoder = CountingDecoder::sized(32, 32);
        let mut gfx = RecordingGraphics::with_max_texture_dimension(32);
        let image = load_image("square.png");

        assert!(image.texture_or_load(&decoder, &mut gfx).is_ok());
        assert_eq!(gfx.uploads[0].1, 32);
    }

    #[test]
    fn each_resource_has_its_own_cell() {
        let decoder = CountingDecoder::new();
        let mut gfx = RecordingGraphics::default();
        let a = load_image("a.png");
        let b = load_image("a.png");

        let ta = a.texture_or_load(&decoder, &mut gfx).unwrap();
        let tb = b.texture_or_load(&decoder, &mut gfx).unwrap();

        assert_ne!(ta, tb);
        assert_eq!(decoder.calls(), 2);
    }
}
