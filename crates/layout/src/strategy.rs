//! The layout strategy contract and strategy selection.

use std::str::FromStr;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tessera_common::error::TesseraError;
use tessera_media_model::geometry::{LayoutBox, Size};

use crate::grid::GridLayout;
use crate::strip::{Axis, StripLayout};

/// Places `count` tiles on a canvas.
///
/// Implementations must return exactly `count` boxes, every box inside
/// the canvas and no two boxes overlapping. Box `i` belongs to the
/// `i`-th visible item. Callers treat a wrong count as a fatal error.
pub trait LayoutStrategy: Send + Sync + std::fmt::Debug {
    /// Compute placement boxes for `count` tiles.
    fn boxes(&self, count: usize, canvas: Size) -> Vec<LayoutBox>;

    /// Strategy name, for logs.
    fn name(&self) -> &str;
}

/// Built-in strategies selectable from configuration or a manifest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LayoutKind {
    /// Near-square grid, last row centered.
    #[default]
    Grid,
    /// Single row of equal tiles.
    Row,
    /// Single column of equal tiles.
    Column,
}

impl LayoutKind {
    /// Instantiate the strategy with the given gap between tiles.
    pub fn strategy(self, gap: u32) -> Arc<dyn LayoutStrategy> {
        match self {
            LayoutKind::Grid => Arc::new(GridLayout::new(gap)),
            LayoutKind::Row => Arc::new(StripLayout::new(Axis::Horizontal, gap)),
            LayoutKind::Column => Arc::new(StripLayout::new(Axis::Vertical, gap)),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            LayoutKind::Grid => "grid",
            LayoutKind::Row => "row",
            LayoutKind::Column => "column",
        }
    }
}

impl FromStr for LayoutKind {
    type Err = TesseraError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "grid" => Ok(LayoutKind::Grid),
            "row" => Ok(LayoutKind::Row),
            "column" => Ok(LayoutKind::Column),
            other => Err(TesseraError::config(format!(
                "Unknown layout '{other}'. Use: grid, row, column"
            ))),
        }
    }
}

/// Split `total` pixels into `parts` equal cells separated by `gap`.
///
/// Returns `(cell, gap)`. The gap is dropped when it alone would eat
/// the whole axis; leftover pixels stay unused at the far end.
pub(crate) fn split_axis(total: u32, parts: u32, gap: u32) -> (u32, u32) {
    if parts == 0 {
        return (0, 0);
    }
    let gaps = gap.saturating_mul(parts - 1);
    let gap = if gaps >= total { 0 } else { gap };
    ((total - gap * (parts - 1)) / parts, gap)
}
