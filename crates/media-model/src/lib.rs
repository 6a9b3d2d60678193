//! Tessera Media Model
//!
//! Defines the core data contracts for Tessera sessions:
//! - **Media:** Inputs with capability flags, owners, timing, and channel layout
//! - **Geometry:** Canvas sizes and placement boxes
//! - **Timeline:** Cutting a session into segment windows
//! - **Manifest:** Top-level session description loaded from JSON
//!
//! Times are absolute integer milliseconds; geometry is integer pixels.

pub mod geometry;
pub mod manifest;
pub mod media;
pub mod timeline;

pub use geometry::*;
pub use manifest::*;
pub use media::*;
pub use timeline::*;
