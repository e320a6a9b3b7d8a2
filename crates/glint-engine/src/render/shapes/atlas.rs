//! Shelf packing for the glyph atlas.

/// Texture-space rectangle, normalized to the atlas size.
#[derive(Debug, Copy, Clone, PartialEq)]
pub(super) struct UvRect {
    pub min: [f32; 2],
    pub max: [f32; 2],
}

/// Packs rectangles left to right into rows ("shelves") of a square atlas.
///
/// Rows are as tall as their tallest entry. Space is never reclaimed; once a
/// rectangle does not fit below the last row the packer stays full.
#[derive(Debug)]
pub(super) struct ShelfPacker {
    size: u32,
    padding: u32,
    x: u32,
    y: u32,
    row_height: u32,
    full: bool,
}

impl ShelfPacker {
    pub(super) fn new(size: u32, padding: u32) -> Self {
        Self {
            size,
            padding,
            x: padding,
            y: padding,
            row_height: 0,
            full: false,
        }
    }

    pub(super) fn is_full(&self) -> bool {
        self.full
    }

    /// Reserves a `w` x `h` cell and returns its top-left pixel.
    pub(super) fn place(&mut self, w: u32, h: u32) -> Option<(u32, u32)> {
        if self.full || w + 2 * self.padding > self.size {
            return None;
        }

        if self.x + w + self.padding > self.size {
            self.y += self.row_height + self.padding;
            self.x = self.padding;
            self.row_height = 0;
        }

        if self.y + h + self.padding > self.size {
            self.full = true;
            return None;
        }

        let at = (self.x, self.y);
        self.x += w + self.padding;
        self.row_height = self.row_height.max(h);
        Some(at)
    }

    pub(super) fn uv_rect(&self, (x, y): (u32, u32), w: u32, h: u32) -> UvRect {
        let s = self.size as f32;
        UvRect {
            min: [x as f32 / s, y as f32 / s],
            max: [(x + w) as f32 / s, (y + h) as f32 / s],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cells_fill_a_row_then_wrap() {
        let mut p = ShelfPacker::new(16, 1);

        assert_eq!(p.place(4, 3), Some((1, 1)));
        assert_eq!(p.place(4, 5), Some((6, 1)));
        // 11 + 6 + 1 > 16: next row starts under the tallest cell.
        assert_eq!(p.place(6, 2), Some((1, 7)));
    }

    #[test]
    fn overflowing_the_bottom_marks_full() {
        let mut p = ShelfPacker::new(8, 1);

        assert_eq!(p.place(6, 4), Some((1, 1)));
        assert_eq!(p.place(6, 4), None);
        assert!(p.is_full());
        assert_eq!(p.place(1, 1), None);
    }

    #[test]
    fn cell_wider_than_atlas_is_refused_without_filling() {
        let mut p = ShelfPacker::new(8, 1);

        assert_eq!(p.place(7, 1), None);
        assert!(!p.is_full());
        assert_eq!(p.place(2, 2), Some((1, 1)));
    }

    #[test]
    fn uv_rect_is_normalized() {
        let p = ShelfPacker::new(16, 1);
        let uv = p.uv_rect((4, 8), 4, 8);
        assert_eq!(uv.min, [0.25, 0.5]);
        assert_eq!(uv.max, [0.5, 1.0]);
    }
}
