//! Tessera Layout
//!
//! Strategies that assign each visible participant a tile on the
//! output canvas:
//! - **Grid:** Near-square grid with a centered last row
//! - **Strip:** One row or one column of equal tiles
//!
//! This crate is pure computation with no I/O. Every strategy returns
//! exactly one box per requested tile, inside the canvas and disjoint.

pub mod grid;
pub mod strategy;
pub mod strip;

pub use grid::GridLayout;
pub use strategy::{LayoutKind, LayoutStrategy};
pub use strip::{Axis, StripLayout};
