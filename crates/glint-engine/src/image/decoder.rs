use std::path::Path;

use super::{Bitmap, ImageError};

/// Decodes image files into RGBA bitmaps.
pub trait ImageDecoder {
    fn decode(&self, path: &Path) -> Result<Bitmap, ImageError>;
}

/// Decoder backed by the `image` crate. The format is guessed from the file
/// contents and extension.
#[derive(Debug, Copy, Clone, Default)]
pub struct FileDecoder;

impl ImageDecoder for FileDecoder {
    fn decode(&self, path: &Path) -> Result<Bitmap, ImageError> {
        log::debug!("decoding image {}", path.display());

        let img = image::open(path).map_err(|e| ImageError::Decode {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;

        let rgba = img.to_rgba8();
        let (width, height) = rgba.dimensions();
        if width == 0 || height == 0 {
            return Err(ImageError::Empty { path: path.to_path_buf() });
        }

        Ok(Bitmap {
            width,
            height,
            pixels: rgba.into_raw(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scratch_path(name: &str) -> std::path::PathBuf {
        std::env::temp_dir().join(format!("glint-{}-{name}", std::process::id()))
    }

    #[test]
    fn decodes_png_to_rgba() {
        let path = scratch_path("decode.png");
        let mut img = image::RgbaImage::new(3, 2);
        img.put_pixel(0, 0, image::Rgba([255, 0, 0, 255]));
        img.save(&path).unwrap();

        let bitmap = FileDecoder.decode(&path).unwrap();
        std::fs::remove_file(&path).ok();

        assert_eq!((bitmap.width, bitmap.height), (3, 2));
        assert_eq!(bitmap.pixels.len(), 3 * 2 * 4);
        assert_eq!(&bitmap.pixels[..4], &[255, 0, 0, 255]);
    }

    #[test]
    fn missing_file_names_the_path() {
        let path = scratch_path("does-not-exist.png");
        let err = FileDecoder.decode(&path).unwrap_err();
        assert_eq!(err.path(), path.as_path());
        assert!(err.to_string().contains("does-not-exist.png"));
    }

    #[test]
    fn garbage_is_a_decode_error() {
        let path = scratch_path("garbage.png");
        std::fs::write(&path, b"definitely not a png").unwrap();
        let err = FileDecoder.decode(&path).unwrap_err();
        std::fs::remove_file(&path).ok();
        assert!(matches!(err, ImageError::Decode { .. }));
    }
}
