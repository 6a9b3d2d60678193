//! Canvas and placement geometry.
//!
//! All values are integer pixels with the origin at the top-left
//! corner of the output canvas.

use serde::{Deserialize, Serialize};

/// Width and height of an output canvas in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Size {
    pub w: u32,
    pub h: u32,
}

impl Size {
    pub const fn new(w: u32, h: u32) -> Self {
        Self { w, h }
    }

    /// Width divided by height (0.0 for a degenerate canvas).
    pub fn aspect_ratio(&self) -> f64 {
        if self.h == 0 {
            return 0.0;
        }
        self.w as f64 / self.h as f64
    }

    /// The whole canvas as a single placement box.
    pub fn full_box(&self) -> LayoutBox {
        LayoutBox::new(0, 0, self.w, self.h)
    }
}

impl std::fmt::Display for Size {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}x{}", self.w, self.h)
    }
}

/// A placement rectangle assigned to one visible item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LayoutBox {
    /// Left edge.
    pub x: u32,
    /// Top edge.
    pub y: u32,
    /// Width.
    pub w: u32,
    /// Height.
    pub h: u32,
}

impl LayoutBox {
    pub const fn new(x: u32, y: u32, w: u32, h: u32) -> Self {
        Self { x, y, w, h }
    }

    /// Right edge (exclusive).
    pub fn right(&self) -> u32 {
        self.x + self.w
    }

    /// Bottom edge (exclusive).
    pub fn bottom(&self) -> u32 {
        self.y + self.h
    }

    /// Whether the two boxes share any pixel.
    pub fn overlaps(&self, other: &LayoutBox) -> bool {
        self.x < other.right()
            && other.x < self.right()
            && self.y < other.bottom()
            && other.y < self.bottom()
    }

    /// Whether this box lies entirely inside the canvas.
    pub fn fits_within(&self, canvas: Size) -> bool {
        self.right() <= canvas.w && self.bottom() <= canvas.h
    }

    pub fn size(&self) -> Size {
        Size::new(self.w, self.h)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_size_display_and_ratio() {
        let size = Size::new(1280, 720);
        assert_eq!(size.to_string(), "1280x720");
        assert!((size.aspect_ratio() - 16.0 / 9.0).abs() < 1e-9);
        assert_eq!(Size::new(10, 0).aspect_ratio(), 0.0);
    }

    #[test]
    fn test_full_box_fits() {
        let size = Size::new(640, 480);
        let full = size.full_box();
        assert!(full.fits_within(size));
        assert_eq!(full.size(), size);
    }

    #[test]
    fn test_overlap_is_exclusive_on_edges() {
        let a = LayoutBox::new(0, 0, 100, 100);
        let b = LayoutBox::new(100, 0, 100, 100);
        let c = LayoutBox::new(50, 50, 100, 100);
        assert!(!a.overlaps(&b));
        assert!(a.overlaps(&c));
        assert!(c.overlaps(&b));
    }

    #[test]
    fn test_box_outside_canvas() {
        let b = LayoutBox::new(600, 0, 100, 100);
        assert!(!b.fits_within(Size::new(640, 480)));
    }
}
