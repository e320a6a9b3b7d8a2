use std::fmt;
use std::path::{Path, PathBuf};
use std::rc::Rc;

use super::FONT_FACE_SIZE;

#[derive(Debug, thiserror::Error)]
pub enum FontError {
    #[error("failed to read font {}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse font {}: {message}", .path.display())]
    Parse { path: PathBuf, message: String },
}

/// Scalable font opened by [`open_font`].
///
/// Cheap to clone; clones share the parsed font. Two handles are equal when
/// they share the same parsed font.
#[derive(Clone)]
pub struct FontHandle {
    font: Rc<fontdue::Font>,
    name: Rc<str>,
}

/// Reads and parses the font at `path`, rasterized at [`FONT_FACE_SIZE`].
pub fn open_font(path: impl AsRef<Path>) -> Result<FontHandle, FontError> {
    let path = path.as_ref();
    let bytes = std::fs::read(path).map_err(|source| FontError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let handle = FontHandle::from_bytes(&bytes, &path.display().to_string()).map_err(|message| {
        FontError::Parse {
            path: path.to_path_buf(),
            message,
        }
    })?;

    log::info!("opened font {} at {FONT_FACE_SIZE}px", path.display());
    Ok(handle)
}

impl FontHandle {
    pub(crate) fn from_bytes(bytes: &[u8], name: &str) -> Result<Self, String> {
        let settings = fontdue::FontSettings {
            scale: FONT_FACE_SIZE,
            ..fontdue::FontSettings::default()
        };
        let font = fontdue::Font::from_bytes(bytes, settings).map_err(|e| e.to_string())?;
        Ok(Self {
            font: Rc::new(font),
            name: Rc::from(name),
        })
    }

    /// Where the font was opened from.
    pub fn name(&self) -> &str {
        &self.name
    }

    pub(crate) fn font(&self) -> &fontdue::Font {
        &self.font
    }

    /// Advance width of `text` at em height `px`, in the same unit as `px`.
    pub fn measure(&self, text: &str, px: f32) -> f32 {
        text.chars()
            .map(|c| self.font.metrics(c, px).advance_width)
            .sum()
    }
}

impl PartialEq for FontHandle {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.font, &other.font)
    }
}

impl fmt::Debug for FontHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FontHandle").field("name", &self.name).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_is_io_error() {
        let path = std::env::temp_dir().join("glint-no-such-font.ttf");
        let err = open_font(&path).unwrap_err();
        assert!(matches!(err, FontError::Io { .. }));
        assert!(err.to_string().contains("glint-no-such-font.ttf"));
    }

    #[test]
    fn garbage_is_parse_error() {
        let path = std::env::temp_dir().join(format!("glint-garbage-{}.ttf", std::process::id()));
        std::fs::write(&path, b"definitely not a font").unwrap();

        let err = open_font(&path).unwrap_err();
        std::fs::remove_file(&path).ok();

        assert!(matches!(err, FontError::Parse { .. }));
    }

    #[test]
    fn scaled_em_is_face_size_times_factor() {
        approx::assert_relative_eq!(super::super::SCALED_TEXT_EM, 0.072, epsilon = 1e-6);
    }
}
