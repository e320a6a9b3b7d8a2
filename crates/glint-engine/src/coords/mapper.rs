use super::{PixelSize, Position};

/// Width of the logical drawing plane.
pub const LOGICAL_WIDTH: f32 = 1.3;

/// Height of the logical drawing plane.
pub const LOGICAL_HEIGHT: f32 = 1.0;

/// Converts raw pixel positions into logical positions.
///
/// For a window of `w x h` pixels, pixel `(i, j)` maps to
/// `x = (LOGICAL_WIDTH / w) * i` and `y = 1 - (1 / h) * j`. The y axis is
/// flipped (pixel origin top-left, logical origin bottom-left) and the x
/// axis is scaled independently of y.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct CoordinateMapper {
    size: PixelSize,
}

impl CoordinateMapper {
    /// Creates a mapper for a window of `size` pixels.
    ///
    /// `size` must be valid; see [`PixelSize::is_valid`].
    pub fn new(size: PixelSize) -> Self {
        debug_assert!(size.is_valid(), "CoordinateMapper requires a non-zero size");
        Self { size }
    }

    #[inline]
    pub fn size(&self) -> PixelSize {
        self.size
    }

    /// Updates the window size used for subsequent mappings.
    ///
    /// Zero-sized updates (minimized windows) are ignored so the mapping never
    /// divides by zero; the last valid size stays in effect.
    pub fn resize(&mut self, size: PixelSize) {
        if !size.is_valid() {
            log::debug!("ignoring zero window size {}x{}", size.width, size.height);
            return;
        }
        self.size = size;
    }

    /// Maps raw pixel position `(i, j)` to logical space.
    pub fn map(&self, i: f64, j: f64) -> Position {
        let w = f64::from(self.size.width);
        let h = f64::from(self.size.height);

        let x = (f64::from(LOGICAL_WIDTH) / w) * i;
        let y = f64::from(LOGICAL_HEIGHT) - (1.0 / h) * j;

        Position::new(x as f32, y as f32)
    }

    /// Inverse of [`map`](Self::map): logical position to pixel position.
    pub fn to_pixels(&self, p: Position) -> (f32, f32) {
        let w = self.size.width as f32;
        let h = self.size.height as f32;
        (p.x / LOGICAL_WIDTH * w, (LOGICAL_HEIGHT - p.y) * h)
    }

    /// Logical distance covered by `px` pixels vertically.
    #[inline]
    pub fn pixels_to_logical_height(&self, px: f32) -> f32 {
        px / self.size.height as f32 * LOGICAL_HEIGHT
    }

    /// Pixel distance covered by logical height `h`.
    #[inline]
    pub fn logical_height_to_pixels(&self, h: f32) -> f32 {
        h / LOGICAL_HEIGHT * self.size.height as f32
    }
}
