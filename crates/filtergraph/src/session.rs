//! Building segments and engine inputs from a session manifest.

use std::str::FromStr;
use std::sync::Arc;

use tessera_common::config::{GraphStyle, PlannerDefaults};
use tessera_common::error::{TesseraError, TesseraResult};
use tessera_layout::{LayoutKind, LayoutStrategy};
use tessera_media_model::geometry::Size;
use tessera_media_model::manifest::{LoadedManifest, ResolvedSegment, SessionManifest};
use tessera_media_model::media::MediaItem;

use crate::segment::Segment;
use crate::sequence::EngineInput;

/// Settings shared by every segment of one session.
#[derive(Debug, Clone)]
pub struct SessionPlanner {
    pub canvas: Size,
    pub layout: Arc<dyn LayoutStrategy>,
    pub style: GraphStyle,
    pub show_timestamp: bool,
}

impl SessionPlanner {
    /// Resolve canvas and layout, preferring the manifest over `defaults`.
    pub fn from_manifest(
        manifest: &SessionManifest,
        defaults: &PlannerDefaults,
        style: GraphStyle,
    ) -> TesseraResult<Self> {
        let canvas = manifest
            .canvas
            .unwrap_or(Size::new(defaults.canvas_width, defaults.canvas_height));
        let kind = LayoutKind::from_str(manifest.layout.as_deref().unwrap_or(&defaults.layout))?;

        tracing::debug!(
            canvas = %canvas,
            layout = kind.as_str(),
            gap = defaults.layout_gap,
            "Session planner configured"
        );

        Ok(Self {
            canvas,
            layout: kind.strategy(defaults.layout_gap),
            style,
            show_timestamp: manifest.show_timestamp,
        })
    }

    /// One [`Segment`] per resolved window, in output order.
    pub fn segments(&self, manifest: &SessionManifest) -> TesseraResult<Vec<Segment>> {
        manifest
            .segment_windows()
            .into_iter()
            .map(|resolved| self.segment(manifest, resolved))
            .collect()
    }

    fn segment(&self, manifest: &SessionManifest, resolved: ResolvedSegment) -> TesseraResult<Segment> {
        let media = resolved
            .window
            .media
            .iter()
            .map(|id| {
                manifest
                    .source(*id)
                    .map(|source| source.item.clone())
                    .ok_or_else(|| {
                        TesseraError::manifest(format!(
                            "Segment {} references unknown media {id}",
                            resolved.id
                        ))
                    })
            })
            .collect::<TesseraResult<Vec<MediaItem>>>()?;

        Ok(Segment::new(
            resolved.id,
            media,
            resolved.window.start_ms,
            resolved.window.end_ms,
            self.canvas,
            Arc::clone(&self.layout),
        )?
        .with_style(self.style.clone())
        .with_timestamp(self.show_timestamp))
    }
}

/// Engine inputs for every media source, ordered by id.
///
/// Background cards are stills and are looped.
pub fn engine_inputs(loaded: &LoadedManifest) -> Vec<EngineInput> {
    let mut inputs: Vec<EngineInput> = loaded
        .manifest
        .media
        .iter()
        .map(|source| EngineInput {
            id: source.item.id,
            path: loaded.resolve_path(source),
            still: source.item.is_background,
        })
        .collect();
    inputs.sort_by_key(|input| input.id);
    inputs
}
