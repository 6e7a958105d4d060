//! Shelf packing for glyph bitmaps

/// Row-by-row rectangle packer
///
/// Rectangles are placed left to right on the current shelf; a rectangle that
/// does not fit horizontally opens a new shelf below the tallest one so far.
#[derive(Debug, Clone)]
pub struct ShelfPacker {
    size: u32,
    padding: u32,
    cursor_x: u32,
    shelf_y: u32,
    shelf_height: u32,
}

impl ShelfPacker {
    pub fn new(size: u32, padding: u32) -> Self {
        Self {
            size,
            padding,
            cursor_x: 0,
            shelf_y: 0,
            shelf_height: 0,
        }
    }

    pub fn size(&self) -> u32 {
        self.size
    }

    /// Reserve a `width x height` region, returning its top-left corner
    ///
    /// Returns `None` once the atlas has no vertical space left.
    pub fn allocate(&mut self, width: u32, height: u32) -> Option<(u32, u32)> {
        if width > self.size {
            return None;
        }

        if self.cursor_x + width + self.padding > self.size {
            self.cursor_x = 0;
            self.shelf_y += self.shelf_height + self.padding;
            self.shelf_height = 0;
        }

        if self.shelf_y + height > self.size {
            return None;
        }

        let origin = (self.cursor_x, self.shelf_y);
        self.cursor_x += width + self.padding;
        self.shelf_height = self.shelf_height.max(height);
        Some(origin)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fills_shelf_left_to_right() {
        let mut packer = ShelfPacker::new(64, 2);
        assert_eq!(packer.allocate(10, 12), Some((0, 0)));
        assert_eq!(packer.allocate(10, 8), Some((12, 0)));
        assert_eq!(packer.allocate(10, 16), Some((24, 0)));
    }

    #[test]
    fn test_wraps_below_tallest() {
        let mut packer = ShelfPacker::new(32, 1);
        assert_eq!(packer.allocate(20, 10), Some((0, 0)));
        assert_eq!(packer.allocate(8, 4), Some((21, 0)));
        // 30 + 8 + 1 > 32 opens a new shelf at 10 + 1
        assert_eq!(packer.allocate(8, 4), Some((0, 11)));
    }

    #[test]
    fn test_runs_out_of_space() {
        let mut packer = ShelfPacker::new(16, 0);
        assert_eq!(packer.allocate(16, 16), Some((0, 0)));
        assert_eq!(packer.allocate(1, 1), None);
        assert_eq!(ShelfPacker::new(16, 0).allocate(17, 1), None);
    }

    #[test]
    fn test_empty_glyphs_take_no_space() {
        let mut packer = ShelfPacker::new(16, 1);
        assert_eq!(packer.allocate(0, 0), Some((0, 0)));
        assert_eq!(packer.allocate(4, 4), Some((1, 0)));
    }
}
