//! Joining planned segments into one program and engine invocation.

use std::path::{Path, PathBuf};

use tessera_common::error::{TesseraError, TesseraResult};
use tessera_media_model::media::MediaId;

use crate::filters;
use crate::graph::{FilterGraph, GraphBuilder, Label, Pad, Statement};

/// Final video pad of a sequence.
pub const SEQUENCE_VIDEO_OUT: &str = "out_v";
/// Final audio pad of a sequence.
pub const SEQUENCE_AUDIO_OUT: &str = "out_a";

/// A segment's generated graph, tagged with the segment id.
#[derive(Debug, Clone, PartialEq)]
pub struct PlannedSegment {
    pub id: String,
    pub graph: FilterGraph,
}

impl PlannedSegment {
    pub fn new(id: impl Into<String>, graph: FilterGraph) -> Self {
        Self {
            id: id.into(),
            graph,
        }
    }
}

/// One engine input. Its position in the argument list is its id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineInput {
    pub id: MediaId,
    pub path: PathBuf,
    /// Still image looped for the whole run.
    pub still: bool,
}

/// Ordered segments concatenated into a single output.
#[derive(Debug, Clone)]
pub struct SequencePlan {
    segments: Vec<PlannedSegment>,
}

impl SequencePlan {
    pub fn new(segments: Vec<PlannedSegment>) -> TesseraResult<Self> {
        if segments.is_empty() {
            return Err(TesseraError::plan("A sequence needs at least one segment"));
        }
        Ok(Self { segments })
    }

    pub fn segments(&self) -> &[PlannedSegment] {
        &self.segments
    }

    /// Every segment graph followed by the concat statement.
    pub fn graph(&self) -> FilterGraph {
        let mut builder = GraphBuilder::new();
        let mut concat = Statement::chain(vec![filters::concat(self.segments.len())]);
        for segment in &self.segments {
            builder.extend(segment.graph.clone());
            concat = concat
                .input(Label::video_out(&segment.id))
                .input(Label::audio_out(&segment.id));
        }
        builder.push(
            concat
                .output(Label::new(SEQUENCE_VIDEO_OUT))
                .output(Label::new(SEQUENCE_AUDIO_OUT)),
        );
        builder.finish()
    }

    pub fn filter_complex(&self) -> String {
        self.graph().to_string()
    }

    /// Highest engine input index any segment reads.
    pub fn max_input(&self) -> Option<MediaId> {
        self.segments
            .iter()
            .flat_map(|segment| segment.graph.statements())
            .flat_map(|statement| &statement.inputs)
            .filter_map(|pad| match pad {
                Pad::Stream { input, .. } => Some(*input),
                Pad::Label(_) => None,
            })
            .max()
    }

    /// Full engine argument list rendering the sequence to `output`.
    ///
    /// `inputs` must be ordered by id with ids `0..N`, since the graph
    /// addresses inputs by position.
    pub fn ffmpeg_args(&self, inputs: &[EngineInput], output: &Path) -> TesseraResult<Vec<String>> {
        for (position, input) in inputs.iter().enumerate() {
            if input.id.0 as usize != position {
                return Err(TesseraError::plan(format!(
                    "Input {} is at position {position}; inputs must be ordered 0..N",
                    input.id
                )));
            }
        }
        if let Some(max) = self.max_input() {
            if max.0 as usize >= inputs.len() {
                return Err(TesseraError::plan(format!(
                    "Graph reads input {max} but only {} inputs were given",
                    inputs.len()
                )));
            }
        }

        let mut args: Vec<String> = ["-y", "-hide_banner", "-loglevel", "error"]
            .into_iter()
            .map(String::from)
            .collect();
        for input in inputs {
            if input.still {
                args.extend(["-loop".to_string(), "1".to_string()]);
            }
            args.push("-i".to_string());
            args.push(input.path.to_string_lossy().to_string());
        }
        args.push("-filter_complex".to_string());
        args.push(self.filter_complex());
        for pad in [SEQUENCE_VIDEO_OUT, SEQUENCE_AUDIO_OUT] {
            args.push("-map".to_string());
            args.push(format!("[{pad}]"));
        }
        args.extend(
            ["-c:v", "libx264", "-pix_fmt", "yuv420p", "-c:a", "aac"]
                .into_iter()
                .map(String::from),
        );
        args.push(output.to_string_lossy().to_string());

        tracing::debug!(
            segments = self.segments.len(),
            inputs = inputs.len(),
            "Engine arguments built"
        );
        Ok(args)
    }
}
