//! Tessera Filter Graph Planner
//!
//! Turns a time window over session media into a filter graph the
//! rendering engine executes. Planning is pure: no I/O, no engine
//! calls, and the same segment always yields the same graph.
//!
//! # Segment Pipeline
//!
//! ```text
//! color ─────────────────────────────────── <seg>_bg
//!                                              │
//! [id:v] ── trim ── scale ── label ── <seg>_<id>_v ── overlay (shortest)
//!                                                        │
//! [id:v] ── trim ── scale ── label ── <seg>_<id>_v ── overlay
//!                                                        │
//!                                                   <seg>_out_v
//!
//! [id:a] ── atrim ── <seg>_<id>_a ──┐
//!                                   ├── amerge ── pan ── <seg>_out_a
//! [id:a] ── atrim ── <seg>_<id>_a ──┘
//! ```
//!
//! Segments are joined by a [`SequencePlan`] into `[out_v][out_a]`.

pub mod expr;
pub mod filters;
pub mod graph;
pub mod mix;
pub mod segment;
pub mod sequence;
pub mod session;

pub use graph::{FilterGraph, Label, Pad, Statement, StreamKind};
pub use mix::StereoDownmix;
pub use segment::Segment;
pub use sequence::{EngineInput, PlannedSegment, SequencePlan};
pub use session::{engine_inputs, SessionPlanner};
