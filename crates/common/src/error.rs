//! Error types shared across Tessera crates.

use std::path::PathBuf;

/// Top-level error type for Tessera operations.
#[derive(Debug, thiserror::Error)]
pub enum TesseraError {
    #[error("Invalid window for segment {segment}: end {end_ms}ms is not after start {start_ms}ms")]
    InvalidWindow {
        segment: String,
        start_ms: i64,
        end_ms: i64,
    },

    #[error("Layout contract violated for segment {segment}: requested {expected} boxes, got {actual}")]
    LayoutContractViolation {
        segment: String,
        expected: usize,
        actual: usize,
    },

    #[error("Manifest error: {message}")]
    Manifest { message: String },

    #[error("Planning error: {message}")]
    Plan { message: String },

    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("File not found: {path}")]
    FileNotFound { path: PathBuf },

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Result type alias using TesseraError.
pub type TesseraResult<T> = Result<T, TesseraError>;

impl TesseraError {
    pub fn invalid_window(segment: impl Into<String>, start_ms: i64, end_ms: i64) -> Self {
        Self::InvalidWindow {
            segment: segment.into(),
            start_ms,
            end_ms,
        }
    }

    pub fn layout_contract(segment: impl Into<String>, expected: usize, actual: usize) -> Self {
        Self::LayoutContractViolation {
            segment: segment.into(),
            expected,
            actual,
        }
    }

    pub fn manifest(msg: impl Into<String>) -> Self {
        Self::Manifest {
            message: msg.into(),
        }
    }

    pub fn plan(msg: impl Into<String>) -> Self {
        Self::Plan {
            message: msg.into(),
        }
    }

    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config {
            message: msg.into(),
        }
    }
}
