/// Window size in physical pixels.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq, Hash)]
pub struct PixelSize {
    pub width: u32,
    pub height: u32,
}

impl PixelSize {
    #[inline]
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// True when both dimensions are non-zero.
    ///
    /// Minimized windows report `0 x 0` on several platforms.
    #[inline]
    pub fn is_valid(self) -> bool {
        self.width > 0 && self.height > 0
    }
}

impl From<winit::dpi::PhysicalSize<u32>> for PixelSize {
    fn from(s: winit::dpi::PhysicalSize<u32>) -> Self {
        Self::new(s.width, s.height)
    }
}

impl From<PixelSize> for winit::dpi::PhysicalSize<u32> {
    fn from(s: PixelSize) -> Self {
        winit::dpi::PhysicalSize::new(s.width, s.height)
    }
}
