/// Decoded image: tightly packed RGBA8 rows, top row first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Bitmap {
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<u8>,
}

impl Bitmap {
    /// Wraps `pixels`, which must hold exactly `width * height * 4` bytes.
    pub fn from_rgba8(width: u32, height: u32, pixels: Vec<u8>) -> Option<Self> {
        let expected = (width as usize)
            .checked_mul(height as usize)?
            .checked_mul(4)?;
        (pixels.len() == expected).then_some(Self { width, height, pixels })
    }

    /// Single-colour bitmap.
    pub fn solid(width: u32, height: u32, rgba: [u8; 4]) -> Self {
        let count = width as usize * height as usize;
        Self {
            width,
            height,
            pixels: rgba.repeat(count),
        }
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Bytes per row.
    #[inline]
    pub fn stride(&self) -> u32 {
        self.width * 4
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_rgba8_checks_length() {
        assert!(Bitmap::from_rgba8(2, 2, vec![0; 16]).is_some());
        assert!(Bitmap::from_rgba8(2, 2, vec![0; 15]).is_none());
    }

    #[test]
    fn solid_fills_every_pixel() {
        let b = Bitmap::solid(3, 2, [1, 2, 3, 4]);
        assert_eq!(b.pixels.len(), 24);
        assert!(b.pixels.chunks(4).all(|p| p == [1, 2, 3, 4]));
        assert_eq!(b.stride(), 12);
    }
}
