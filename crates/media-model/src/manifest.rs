//! Session manifest types.
//!
//! A manifest is the top-level description of one recorded session:
//! the media files, their timing and owners, the output canvas, and
//! optionally an explicit list of segments to render.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::geometry::Size;
use crate::media::{MediaId, MediaItem};
use crate::timeline::{overlapping_ids, split_windows, SegmentWindow};

/// File name of the manifest inside a session directory.
pub const MANIFEST_FILE: &str = "manifest.json";

/// Top-level session file (`manifest.json`).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionManifest {
    /// Schema version.
    pub version: String,

    /// Human-readable session name.
    pub name: String,

    /// Output canvas; the configured default applies when absent.
    #[serde(default)]
    pub canvas: Option<Size>,

    /// Layout strategy name; the configured default applies when absent.
    #[serde(default)]
    pub layout: Option<String>,

    /// Request a timestamp overlay (carried through to segments).
    #[serde(default)]
    pub show_timestamp: bool,

    /// Input media, one per engine input.
    #[serde(default)]
    pub media: Vec<MediaSource>,

    /// Explicit segments. When absent the session is split at every
    /// media boundary.
    #[serde(default)]
    pub segments: Option<Vec<SegmentSpec>>,
}

/// A media item together with the file it is read from.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MediaSource {
    /// Path relative to the manifest directory (or absolute).
    pub path: String,

    #[serde(flatten)]
    pub item: MediaItem,
}

/// An explicitly requested segment.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SegmentSpec {
    /// Segment id used as label prefix; defaults to `s<index>`.
    #[serde(default)]
    pub id: Option<String>,

    /// Absolute start (ms).
    pub start_ms: i64,

    /// Absolute end (ms).
    pub end_ms: i64,

    /// Items to include; defaults to every item overlapping the window.
    #[serde(default)]
    pub media: Option<Vec<MediaId>>,
}

/// A segment window with its final id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedSegment {
    pub id: String,
    pub window: SegmentWindow,
}

/// A manifest loaded from disk, remembering where it came from.
#[derive(Debug, Clone)]
pub struct LoadedManifest {
    /// Directory containing the manifest; relative media paths start here.
    pub root: PathBuf,

    /// Parsed manifest.
    pub manifest: SessionManifest,
}

impl SessionManifest {
    /// Create an empty manifest.
    pub fn new(name: impl Into<String>, canvas: Size) -> Self {
        Self {
            version: "1.0".to_string(),
            name: name.into(),
            canvas: Some(canvas),
            layout: None,
            show_timestamp: false,
            media: vec![],
            segments: None,
        }
    }

    /// All media items in manifest order.
    pub fn items(&self) -> Vec<MediaItem> {
        self.media.iter().map(|source| source.item.clone()).collect()
    }

    /// Look up a media source by id.
    pub fn source(&self, id: MediaId) -> Option<&MediaSource> {
        self.media.iter().find(|source| source.item.id == id)
    }

    /// Check the manifest for problems; an empty list means valid.
    pub fn validate(&self) -> Vec<String> {
        let mut errors = vec![];

        let mut seen = HashSet::new();
        for source in &self.media {
            let item = &source.item;
            if !seen.insert(item.id) {
                errors.push(format!("Duplicate media id {}", item.id));
            }
            if item.duration_ms < 0 {
                errors.push(format!(
                    "Media {} has negative duration {}ms",
                    item.id, item.duration_ms
                ));
            }
            if !item.has_video && !item.has_audio && !item.is_background {
                errors.push(format!("Media {} carries no usable stream", item.id));
            }
            if source.path.trim().is_empty() {
                errors.push(format!("Media {} has an empty path", item.id));
            }
        }

        // Ids address engine inputs, which are numbered from zero.
        let count = self.media.len() as u32;
        for source in &self.media {
            if source.item.id.0 >= count {
                errors.push(format!(
                    "Media id {} is not a valid input index (expected 0..{count})",
                    source.item.id
                ));
            }
        }

        if let Some(canvas) = self.canvas {
            if canvas.w == 0 || canvas.h == 0 {
                errors.push(format!("Canvas {canvas} has a zero dimension"));
            }
        }

        if let Some(segments) = &self.segments {
            let mut segment_ids = HashSet::new();
            for (index, spec) in segments.iter().enumerate() {
                let id = spec.id.clone().unwrap_or_else(|| default_segment_id(index));
                if !is_label_safe(&id) {
                    errors.push(format!(
                        "Segment id {id:?} may only contain ASCII letters, digits, '_' and '-'"
                    ));
                }
                if !segment_ids.insert(id.clone()) {
                    errors.push(format!("Duplicate segment id {id}"));
                }
                if spec.end_ms <= spec.start_ms {
                    errors.push(format!(
                        "Segment {id} ends at {}ms, not after its start {}ms",
                        spec.end_ms, spec.start_ms
                    ));
                }
                for media_id in spec.media.iter().flatten() {
                    if !seen.contains(media_id) {
                        errors.push(format!("Segment {id} references unknown media {media_id}"));
                    }
                }
            }
        }

        errors
    }

    /// The segments to render, in output order.
    pub fn segment_windows(&self) -> Vec<ResolvedSegment> {
        let items = self.items();
        match &self.segments {
            Some(specs) => specs
                .iter()
                .enumerate()
                .map(|(index, spec)| {
                    let media = match &spec.media {
                        Some(ids) => {
                            let mut ids = ids.clone();
                            ids.sort_unstable();
                            ids.dedup();
                            ids
                        }
                        None => overlapping_ids(&items, spec.start_ms, spec.end_ms),
                    };
                    ResolvedSegment {
                        id: spec.id.clone().unwrap_or_else(|| default_segment_id(index)),
                        window: SegmentWindow {
                            start_ms: spec.start_ms,
                            end_ms: spec.end_ms,
                            media,
                        },
                    }
                })
                .collect(),
            None => split_windows(&items)
                .into_iter()
                .enumerate()
                .map(|(index, window)| ResolvedSegment {
                    id: default_segment_id(index),
                    window,
                })
                .collect(),
        }
    }
}

fn default_segment_id(index: usize) -> String {
    format!("s{index}")
}

/// Segment ids prefix every graph label, so they must not contain
/// characters the filter parser treats as syntax.
fn is_label_safe(id: &str) -> bool {
    !id.is_empty()
        && id
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
}

impl LoadedManifest {
    /// Load a manifest from a file, or from `manifest.json` inside a directory.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ManifestError> {
        let path = path.as_ref();
        let manifest_path = if path.is_dir() {
            path.join(MANIFEST_FILE)
        } else {
            path.to_path_buf()
        };

        let json =
            std::fs::read_to_string(&manifest_path).map_err(|e| ManifestError::IoError {
                path: manifest_path.clone(),
                source: e,
            })?;
        let manifest = Self::parse(&json, &manifest_path)?;

        let root = manifest_path
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_default();

        Ok(Self { root, manifest })
    }

    /// Load a manifest and reject it if [`SessionManifest::validate`] finds problems.
    pub fn load_valid(path: impl AsRef<Path>) -> Result<Self, ManifestError> {
        let loaded = Self::load(path)?;
        let errors = loaded.manifest.validate();
        if !errors.is_empty() {
            return Err(ManifestError::ValidationError {
                message: errors.join("; "),
            });
        }
        Ok(loaded)
    }

    /// Parse manifest JSON; `origin` is only used in error messages.
    pub fn parse(json: &str, origin: &Path) -> Result<SessionManifest, ManifestError> {
        serde_json::from_str(json).map_err(|e| ManifestError::ParseError {
            path: origin.to_path_buf(),
            source: e,
        })
    }

    /// Save the manifest back to `root/manifest.json`.
    pub fn save(&self) -> Result<(), ManifestError> {
        std::fs::create_dir_all(&self.root).map_err(|e| ManifestError::IoError {
            path: self.root.clone(),
            source: e,
        })?;

        let manifest_path = self.root.join(MANIFEST_FILE);
        let json = serde_json::to_string_pretty(&self.manifest).map_err(|e| {
            ManifestError::ParseError {
                path: manifest_path.clone(),
                source: e,
            }
        })?;
        std::fs::write(&manifest_path, json).map_err(|e| ManifestError::IoError {
            path: manifest_path,
            source: e,
        })
    }

    /// Create a new session directory with an empty manifest.
    pub fn create(
        root: impl AsRef<Path>,
        name: impl Into<String>,
        canvas: Size,
    ) -> Result<Self, ManifestError> {
        let root = root.as_ref().to_path_buf();
        let sources = root.join("sources");
        std::fs::create_dir_all(&sources).map_err(|e| ManifestError::IoError {
            path: sources,
            source: e,
        })?;

        let loaded = Self {
            root,
            manifest: SessionManifest::new(name, canvas),
        };
        loaded.save()?;
        Ok(loaded)
    }

    /// Resolve a media source path against the manifest directory.
    pub fn resolve_path(&self, source: &MediaSource) -> PathBuf {
        let path = Path::new(&source.path);
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.root.join(path)
        }
    }

    /// Report media files that do not exist on disk.
    pub fn missing_sources(&self) -> Vec<String> {
        self.manifest
            .media
            .iter()
            .filter(|source| !self.resolve_path(source).exists())
            .map(|source| format!("Media {} source missing: {}", source.item.id, source.path))
            .collect()
    }
}

/// Errors that can occur when working with manifests.
#[derive(Debug, thiserror::Error)]
pub enum ManifestError {
    #[error("I/O error at {path}: {source}")]
    IoError {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Parse error in {path}: {source}")]
    ParseError {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("Invalid manifest: {message}")]
    ValidationError { message: String },
}
