//! Single row or single column of equal tiles.

use tessera_media_model::geometry::{LayoutBox, Size};

use crate::strategy::{split_axis, LayoutStrategy};

/// Direction tiles are stacked in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    Horizontal,
    Vertical,
}

/// Strip layout: every tile spans the full cross axis.
#[derive(Debug, Clone, Copy)]
pub struct StripLayout {
    pub axis: Axis,
    pub gap: u32,
}

impl StripLayout {
    pub fn new(axis: Axis, gap: u32) -> Self {
        Self { axis, gap }
    }
}

impl LayoutStrategy for StripLayout {
    fn boxes(&self, count: usize, canvas: Size) -> Vec<LayoutBox> {
        let parts = count as u32;
        match self.axis {
            Axis::Horizontal => {
                let (cell, gap) = split_axis(canvas.w, parts, self.gap);
                (0..parts)
                    .map(|i| LayoutBox::new(i * (cell + gap), 0, cell, canvas.h))
                    .collect()
            }
            Axis::Vertical => {
                let (cell, gap) = split_axis(canvas.h, parts, self.gap);
                (0..parts)
                    .map(|i| LayoutBox::new(0, i * (cell + gap), canvas.w, cell))
                    .collect()
            }
        }
    }

    fn name(&self) -> &str {
        match self.axis {
            Axis::Horizontal => "row",
            Axis::Vertical => "column",
        }
    }
}
