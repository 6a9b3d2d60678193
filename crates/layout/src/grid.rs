//! Near-square grid layout.
//!
//! `n` tiles use `ceil(sqrt(n))` columns and as many rows as needed.
//! Cells are equal; a partially filled last row is centered so a lone
//! participant on the bottom row does not hug the left edge.

use tessera_media_model::geometry::{LayoutBox, Size};

use crate::strategy::{split_axis, LayoutStrategy};

/// Grid layout with an optional gap between cells.
#[derive(Debug, Clone, Copy, Default)]
pub struct GridLayout {
    /// Pixels between neighbouring cells.
    pub gap: u32,
}

impl GridLayout {
    pub fn new(gap: u32) -> Self {
        Self { gap }
    }

    /// Columns and rows used for `count` tiles.
    pub fn dimensions(count: usize) -> (u32, u32) {
        if count == 0 {
            return (0, 0);
        }
        let mut cols = 1usize;
        while cols * cols < count {
            cols += 1;
        }
        let rows = count.div_ceil(cols);
        (cols as u32, rows as u32)
    }
}

impl LayoutStrategy for GridLayout {
    fn boxes(&self, count: usize, canvas: Size) -> Vec<LayoutBox> {
        let (cols, rows) = Self::dimensions(count);
        if count == 0 {
            return vec![];
        }

        let (cell_w, gap_x) = split_axis(canvas.w, cols, self.gap);
        let (cell_h, gap_y) = split_axis(canvas.h, rows, self.gap);
        let step_x = cell_w + gap_x;
        let step_y = cell_h + gap_y;

        let mut boxes = Vec::with_capacity(count);
        for index in 0..count as u32 {
            let row = index / cols;
            let col = index % cols;
            let in_row = (count as u32 - row * cols).min(cols);
            let offset_x = (cols - in_row) * step_x / 2;
            boxes.push(LayoutBox::new(
                offset_x + col * step_x,
                row * step_y,
                cell_w,
                cell_h,
            ));
        }

        tracing::trace!(count, cols, rows, cell_w, cell_h, "Grid layout computed");
        boxes
    }

    fn name(&self) -> &str {
        "grid"
    }
}
