//! Application configuration.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{TesseraError, TesseraResult};

/// Global application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Defaults applied when a manifest leaves canvas or layout unset.
    #[serde(default)]
    pub planner: PlannerDefaults,

    /// Visual styling of generated filter graphs.
    #[serde(default)]
    pub style: GraphStyle,

    /// Logging configuration.
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Default planning parameters.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PlannerDefaults {
    /// Output canvas width in pixels.
    pub canvas_width: u32,

    /// Output canvas height in pixels.
    pub canvas_height: u32,

    /// Layout strategy name (`grid`, `row`, `column`).
    pub layout: String,

    /// Gap between layout cells in pixels.
    pub layout_gap: u32,
}

/// Styling knobs for text and synthesized sources in the graph.
///
/// The defaults reproduce the exact filter text the rendering
/// engine has always been fed; change them only when the engine
/// side is changed as well.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GraphStyle {
    /// Fill color of the card shown for audio-only participants.
    pub placeholder_color: String,

    /// Font color of the name centered on placeholder cards.
    pub card_font_color: String,

    /// Font size of the name centered on placeholder cards.
    pub card_font_size: u32,

    /// Font color of the per-tile name label.
    pub label_font_color: String,

    /// Font size of the per-tile name label.
    pub label_font_size: u32,

    /// Box color behind the per-tile name label.
    pub label_box_color: String,

    /// Line spacing of the per-tile name label.
    pub label_line_spacing: u32,

    /// Distance of the label from the left and bottom tile edges.
    pub label_margin: u32,

    /// Sample rate of the synthesized silent track.
    pub silence_sample_rate: u32,
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level filter (e.g., "info", "debug", "tessera=debug,warn").
    pub level: String,

    /// Whether to output structured JSON logs.
    pub json: bool,

    /// Optional log file path.
    pub file: Option<PathBuf>,
}

impl Default for PlannerDefaults {
    fn default() -> Self {
        Self {
            canvas_width: 1280,
            canvas_height: 720,
            layout: "grid".to_string(),
            layout_gap: 0,
        }
    }
}

impl Default for GraphStyle {
    fn default() -> Self {
        Self {
            placeholder_color: "green@1.0".to_string(),
            card_font_color: "black".to_string(),
            card_font_size: 55,
            label_font_color: "white".to_string(),
            label_font_size: 20,
            label_box_color: "black".to_string(),
            label_line_spacing: 3,
            label_margin: 5,
            silence_sample_rate: 48_000,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json: false,
            file: None,
        }
    }
}

impl AppConfig {
    /// Load `$XDG_CONFIG_HOME/tessera/config.json`, or defaults when it
    /// is missing or unreadable.
    pub fn load() -> Self {
        Self::load_from(&config_file_path())
    }

    /// Load a config file, or defaults when it is missing or unreadable.
    pub fn load_from(path: &Path) -> Self {
        if !path.exists() {
            return Self::default();
        }
        match Self::read(path) {
            Ok(config) => config,
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "Ignoring config file");
                Self::default()
            }
        }
    }

    fn read(path: &Path) -> TesseraResult<Self> {
        let content = std::fs::read_to_string(path)?;
        serde_json::from_str(&content).map_err(|e| {
            TesseraError::config(format!("{}: {e}", path.display()))
        })
    }

    /// Write the config as pretty JSON, creating parent directories.
    pub fn save_to(&self, path: &Path) -> TesseraResult<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, serde_json::to_string_pretty(self)?)?;
        Ok(())
    }
}

/// `$XDG_CONFIG_HOME/tessera/config.json`, with `~/.config` as fallback.
pub fn config_file_path() -> PathBuf {
    std::env::var_os("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .or_else(|| std::env::var_os("HOME").map(|home| PathBuf::from(home).join(".config")))
        .unwrap_or_else(std::env::temp_dir)
        .join("tessera")
        .join("config.json")
}
