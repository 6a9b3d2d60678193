//! Tessera Common Utilities
//!
//! Shared infrastructure for all Tessera crates:
//! - Error types and result aliases
//! - Millisecond time helpers used when rendering trim windows
//! - Tracing/logging initialization
//! - Configuration loading

pub mod config;
pub mod error;
pub mod logging;
pub mod timing;

pub use config::*;
pub use error::*;
pub use timing::*;
