//! Per-segment filter graph planning.
//!
//! A [`Segment`] is one fixed time window of the session. Its graph is
//! emitted in four phases that later phases depend on:
//!
//! 1. background canvas
//! 2. per-tile trim, scale and name label
//! 3. overlay chain onto the background
//! 4. audio trim and stereo mix

use std::sync::Arc;

use tessera_common::config::GraphStyle;
use tessera_common::error::{TesseraError, TesseraResult};
use tessera_layout::LayoutStrategy;
use tessera_media_model::geometry::{LayoutBox, Size};
use tessera_media_model::media::MediaItem;

use crate::filters;
use crate::graph::{FilterGraph, GraphBuilder, Label, Pad, Statement, StreamKind};
use crate::mix::StereoDownmix;
use crate::sequence::PlannedSegment;

/// One output segment: a time window over a fixed set of media.
#[derive(Debug, Clone)]
pub struct Segment {
    id: String,
    media: Arc<[MediaItem]>,
    start_ms: i64,
    end_ms: i64,
    canvas: Size,
    layout: Arc<dyn LayoutStrategy>,
    style: GraphStyle,
    show_timestamp: bool,
}

impl Segment {
    /// Create a segment covering `[start_ms, end_ms)`.
    ///
    /// `media` should be sorted by id; tiles are placed in list order.
    pub fn new(
        id: impl Into<String>,
        media: impl Into<Arc<[MediaItem]>>,
        start_ms: i64,
        end_ms: i64,
        canvas: Size,
        layout: Arc<dyn LayoutStrategy>,
    ) -> TesseraResult<Self> {
        let id = id.into();
        if end_ms <= start_ms {
            return Err(TesseraError::invalid_window(id, start_ms, end_ms));
        }
        Ok(Self {
            id,
            media: media.into(),
            start_ms,
            end_ms,
            canvas,
            layout,
            style: GraphStyle::default(),
            show_timestamp: false,
        })
    }

    pub fn with_style(mut self, style: GraphStyle) -> Self {
        self.style = style;
        self
    }

    /// Carried for the renderer; the graph does not draw timestamps.
    pub fn with_timestamp(mut self, show: bool) -> Self {
        self.show_timestamp = show;
        self
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn media(&self) -> &[MediaItem] {
        &self.media
    }

    pub fn start_ms(&self) -> i64 {
        self.start_ms
    }

    pub fn end_ms(&self) -> i64 {
        self.end_ms
    }

    pub fn duration_ms(&self) -> i64 {
        self.end_ms - self.start_ms
    }

    pub fn canvas(&self) -> Size {
        self.canvas
    }

    pub fn shows_timestamp(&self) -> bool {
        self.show_timestamp
    }

    /// Items that get a tile, in list order.
    ///
    /// Video and background items always do. An audio-only item gets a
    /// placeholder card unless its owner already has a video or
    /// background item in this segment.
    pub fn visible_items(&self) -> Vec<&MediaItem> {
        self.media
            .iter()
            .filter(|item| {
                item.is_visual()
                    || (item.has_audio
                        && !self
                            .media
                            .iter()
                            .any(|other| other.is_visual() && item.same_user(other)))
            })
            .collect()
    }

    /// Items contributing to the mix, in list order.
    pub fn audio_items(&self) -> Vec<&MediaItem> {
        self.media.iter().filter(|item| item.has_audio).collect()
    }

    /// Build the segment's filter graph.
    pub fn generate(&self) -> TesseraResult<FilterGraph> {
        let visible = self.visible_items();
        let boxes = self.layout.boxes(visible.len(), self.canvas);
        if boxes.len() != visible.len() {
            return Err(TesseraError::layout_contract(
                &self.id,
                visible.len(),
                boxes.len(),
            ));
        }

        let audio = self.audio_items();
        let mut graph = GraphBuilder::new();
        self.push_background(&mut graph, !visible.is_empty());
        for (item, target) in visible.iter().zip(&boxes) {
            graph.push(self.tile(item, &visible, target));
        }
        self.push_overlays(&mut graph, &visible, &boxes);
        for item in &audio {
            graph.push(self.audio_trim(item));
        }
        graph.push(self.audio_mix(&audio));

        let graph = graph.finish();
        tracing::debug!(
            segment = %self.id,
            layout = self.layout.name(),
            visible = visible.len(),
            audio = audio.len(),
            statements = graph.len(),
            "Segment graph generated"
        );
        Ok(graph)
    }

    /// The graph as engine text.
    pub fn generate_filter(&self) -> TesseraResult<String> {
        Ok(self.generate()?.to_string())
    }

    /// Generate and pair the graph with this segment's id.
    pub fn plan(&self) -> TesseraResult<PlannedSegment> {
        Ok(PlannedSegment::new(self.id.clone(), self.generate()?))
    }

    /// Window of `item`'s own timeline that falls into this segment.
    fn relative_window(&self, item: &MediaItem) -> (i64, i64) {
        let offset = self.start_ms - item.start_ms;
        (offset, offset + self.duration_ms())
    }

    fn push_background(&self, graph: &mut GraphBuilder, has_tiles: bool) {
        let output = if has_tiles {
            Label::background(&self.id)
        } else {
            Label::video_out(&self.id)
        };
        graph.push(
            Statement::chain(vec![
                filters::color(self.canvas, None),
                filters::trim(0, self.duration_ms()),
            ])
            .output(output),
        );
    }

    fn tile(&self, item: &MediaItem, visible: &[&MediaItem], target: &LayoutBox) -> Statement {
        let name = item.display_name();
        let has_video_source = item.has_video
            || visible
                .iter()
                .any(|other| other.has_video && other.same_user(item));

        let mut statement = if has_video_source {
            let (start, end) = self.relative_window(item);
            Statement::chain(vec![filters::trim(start, end), filters::setpts_start()])
                .input(Pad::video(item.id))
        } else if item.is_background {
            Statement::chain(vec![filters::trim(0, self.duration_ms())]).input(Pad::video(item.id))
        } else {
            Statement::chain(vec![
                filters::color(self.canvas, Some(self.style.placeholder_color.as_str())),
                filters::trim(0, self.duration_ms()),
            ])
        };

        if !has_video_source {
            if let Some(name) = name {
                statement
                    .filters
                    .push(filters::centered_name(name, &self.style));
            }
        }
        statement.filters.push(filters::scale_fit(target));
        if let Some(name) = name {
            statement.filters.push(filters::name_label(name, &self.style));
        }
        statement.output(Label::item(&self.id, item.id, StreamKind::Video))
    }

    fn push_overlays(&self, graph: &mut GraphBuilder, visible: &[&MediaItem], boxes: &[LayoutBox]) {
        let mut previous = None;
        for (index, (item, target)) in visible.iter().zip(boxes).enumerate() {
            let base = match previous {
                Some(prev) => Label::overlay(&self.id, prev),
                None => Label::background(&self.id),
            };
            let output = if index + 1 == visible.len() {
                Label::video_out(&self.id)
            } else {
                Label::overlay(&self.id, item.id)
            };
            graph.push(
                Statement::chain(vec![filters::overlay_centered(target, previous.is_none())])
                    .input(base)
                    .input(Label::item(&self.id, item.id, StreamKind::Video))
                    .output(output),
            );
            previous = Some(item.id);
        }
    }

    fn audio_trim(&self, item: &MediaItem) -> Statement {
        let (start, end) = self.relative_window(item);
        Statement::chain(vec![filters::atrim(start, end), filters::asetpts_start()])
            .input(Pad::audio(item.id))
            .output(Label::item(&self.id, item.id, StreamKind::Audio))
    }

    fn audio_mix(&self, audio: &[&MediaItem]) -> Statement {
        if audio.is_empty() {
            return Statement::chain(vec![
                filters::anullsrc(self.style.silence_sample_rate),
                filters::atrim(0, self.duration_ms()),
                filters::asetpts_start(),
            ])
            .output(Label::audio_out(&self.id));
        }

        let mix = StereoDownmix::for_items(audio.iter().copied());
        let mut statement = Statement::chain(vec![filters::amerge(audio.len()), filters::pan(&mix)]);
        for item in audio {
            statement = statement.input(Label::item(&self.id, item.id, StreamKind::Audio));
        }
        statement.output(Label::audio_out(&self.id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tessera_layout::GridLayout;
    use tessera_media_model::media::{ChannelLayout, MediaId, UserRef};

    fn alice() -> Option<UserRef> {
        Some(UserRef::new("u1", "Alice"))
    }

    fn bob() -> Option<UserRef> {
        Some(UserRef::new("u2", "Bob"))
    }

    fn grid() -> Arc<dyn LayoutStrategy> {
        Arc::new(GridLayout::default())
    }

    fn canvas() -> Size {
        Size::new(1280, 720)
    }

    fn session() -> Vec<MediaItem> {
        vec![
            MediaItem::camera(0, alice(), 0, 10_000),
            MediaItem::audio(1, alice(), 0, 10_000),
            MediaItem::audio(2, bob(), 2_000, 5_000),
        ]
    }

    fn statement_texts(graph: &FilterGraph) -> Vec<String> {
        graph.statements().iter().map(|s| s.to_string()).collect()
    }

    /// Returns one box fewer than requested.
    #[derive(Debug)]
    struct ShortLayout;

    impl LayoutStrategy for ShortLayout {
        fn boxes(&self, count: usize, canvas: Size) -> Vec<LayoutBox> {
            vec![canvas.full_box(); count.saturating_sub(1)]
        }

        fn name(&self) -> &str {
            "short"
        }
    }

    #[test]
    fn test_rejects_empty_window() {
        let err = Segment::new("s0", session(), 5_000, 5_000, canvas(), grid()).unwrap_err();
        assert!(matches!(err, TesseraError::InvalidWindow { .. }));
        assert!(Segment::new("s0", session(), 5_000, 4_000, canvas(), grid()).is_err());
    }

    #[test]
    fn test_full_graph_text() {
        let segment = Segment::new("s0", session(), 1_000, 4_000, canvas(), grid()).unwrap();
        let graph = segment.generate().unwrap();
        let scale = "scale=w='if(gt(iw/ih,640/(720)),640,-2)':h='if(gt(iw/ih,640/(720)),-2,720)':eval=init";
        let label = |name: &str| {
            format!(
                "drawtext=text='{name}':x=5:y=h-th-5:fontcolor=white:fontsize=20:box=1:boxcolor=black:line_spacing=3"
            )
        };

        assert_eq!(
            statement_texts(&graph),
            vec![
                "color=s=1280x720,trim=0:3[s0_bg];".to_string(),
                format!("[0:v]trim=1:4,setpts=PTS-STARTPTS,{scale},{}[s0_0_v];", label("Alice")),
                format!(
                    "color=s=1280x720:c=green@1.0,trim=0:3,drawtext=text='Bob':x=(w-tw)/2:y=((h-th)/2):fontcolor=black:fontsize=55,{scale},{}[s0_2_v];",
                    label("Bob")
                ),
                "[s0_bg][s0_0_v]overlay=x='(640-w)/2+0':y='(720-h)/2+0':eval=init:shortest=1[s0_overlay_0];".to_string(),
                "[s0_overlay_0][s0_2_v]overlay=x='(640-w)/2+640':y='(720-h)/2+0':eval=init[s0_out_v];".to_string(),
                "[0:a]atrim=1:4,asetpts=PTS-STARTPTS[s0_0_a];".to_string(),
                "[1:a]atrim=1:4,asetpts=PTS-STARTPTS[s0_1_a];".to_string(),
                "[2:a]atrim=-1:2,asetpts=PTS-STARTPTS[s0_2_a];".to_string(),
                "[s0_0_a][s0_1_a][s0_2_a]amerge=inputs=3,pan='stereo|c0<c0+c2+c4|c1<c1+c3+c5'[s0_out_a];".to_string(),
            ]
        );
    }

    #[test]
    fn test_generate_is_deterministic() {
        let segment = Segment::new("s0", session(), 1_000, 4_000, canvas(), grid()).unwrap();
        assert_eq!(
            segment.generate_filter().unwrap(),
            segment.generate_filter().unwrap()
        );
    }

    #[test]
    fn test_empty_media() {
        let segment = Segment::new("s3", Vec::new(), 0, 2_500, canvas(), grid()).unwrap();
        let graph = segment.generate().unwrap();
        assert_eq!(
            graph.to_string(),
            "color=s=1280x720,trim=0:2.5[s3_out_v];\
             anullsrc=r=48000:cl=stereo,atrim=0:2.5,asetpts=PTS-STARTPTS[s3_out_a];"
        );
        assert_eq!(graph.with_filter("overlay").count(), 0);
    }

    #[test]
    fn test_visible_items_skip_covered_audio() {
        let segment = Segment::new("s0", session(), 0, 1_000, canvas(), grid()).unwrap();
        let ids: Vec<MediaId> = segment.visible_items().iter().map(|m| m.id).collect();
        assert_eq!(ids, vec![MediaId(0), MediaId(2)]);
    }

    #[test]
    fn test_background_covers_owner_audio() {
        let media = vec![
            MediaItem::background(0, alice(), 0, 10_000),
            MediaItem::audio(1, alice(), 0, 10_000),
        ];
        let segment = Segment::new("s0", media, 0, 1_000, canvas(), grid()).unwrap();
        let graph = segment.generate().unwrap();
        assert_eq!(segment.visible_items().len(), 1);
        assert_eq!(
            graph.statements()[1].to_string(),
            "[0:v]trim=0:1,drawtext=text='Alice':x=(w-tw)/2:y=((h-th)/2):fontcolor=black:fontsize=55,\
             scale=w='if(gt(iw/ih,1280/(720)),1280,-2)':h='if(gt(iw/ih,1280/(720)),-2,720)':eval=init,\
             drawtext=text='Alice':x=5:y=h-th-5:fontcolor=white:fontsize=20:box=1:boxcolor=black:line_spacing=3[s0_0_v];"
        );
    }

    #[test]
    fn test_background_with_camera_peer_is_trimmed_like_video() {
        let media = vec![
            MediaItem::camera(0, alice(), 0, 10_000),
            MediaItem::background(1, alice(), 500, 10_000),
        ];
        let segment = Segment::new("s0", media, 1_000, 2_000, canvas(), grid()).unwrap();
        let graph = segment.generate().unwrap();
        let tile = graph
            .producer(&Label::item("s0", MediaId(1), StreamKind::Video))
            .unwrap();
        assert!(tile.to_string().starts_with("[1:v]trim=0.5:1.5,setpts=PTS-STARTPTS,scale="));
    }

    #[test]
    fn test_ownerless_audio_card_has_no_names() {
        let media = vec![MediaItem::audio(0, None, 0, 1_000)];
        let segment = Segment::new("s0", media, 0, 1_000, canvas(), grid()).unwrap();
        let graph = segment.generate().unwrap();
        let tile = &graph.statements()[1];
        assert!(!tile.has_filter("drawtext"));
        assert!(tile.to_string().starts_with("color=s=1280x720:c=green@1.0,trim=0:1,scale="));
    }

    #[test]
    fn test_short_layout_is_contract_violation() {
        let segment = Segment::new("s0", session(), 0, 1_000, canvas(), Arc::new(ShortLayout)).unwrap();
        match segment.generate() {
            Err(TesseraError::LayoutContractViolation {
                expected, actual, ..
            }) => {
                assert_eq!(expected, 2);
                assert_eq!(actual, 1);
            }
            other => panic!("expected contract violation, got {other:?}"),
        }
    }

    #[test]
    fn test_overlay_chain() {
        let media: Vec<MediaItem> = (0..4)
            .map(|id| MediaItem::camera(id, None, 0, 5_000).muted())
            .collect();
        let segment = Segment::new("s1", media, 0, 5_000, canvas(), grid()).unwrap();
        let graph = segment.generate().unwrap();
        let overlays: Vec<&Statement> = graph.with_filter("overlay").collect();

        assert_eq!(overlays.len(), 4);
        assert!(overlays[0].reads(&Label::background("s1")));
        assert!(overlays[0].filter("overlay").unwrap().get("shortest").is_some());
        for pair in overlays.windows(2) {
            let produced = &pair[0].outputs[0];
            assert!(pair[1].reads(produced));
            assert!(pair[1].filter("overlay").unwrap().get("shortest").is_none());
        }
        assert_eq!(overlays[2].outputs, vec![Label::overlay("s1", MediaId(2))]);
        assert_eq!(overlays[3].outputs, vec![Label::video_out("s1")]);
    }

    #[test]
    fn test_surround_mix() {
        let media = vec![
            MediaItem::audio(0, None, 0, 1_000).with_channels(ChannelLayout::Surround51),
        ];
        let segment = Segment::new("s0", media, 0, 1_000, canvas(), grid()).unwrap();
        let graph = segment.generate().unwrap();
        let mix = graph.producer(&Label::audio_out("s0")).unwrap();
        assert_eq!(
            mix.to_string(),
            "[s0_0_a]amerge=inputs=1,pan='stereo|c0<0.4*c0+0.6*c2|c1<0.4*c1+0.6*c2'[s0_out_a];"
        );
    }

    #[test]
    fn test_trim_offsets_for_early_item() {
        let media = vec![MediaItem::camera(0, None, 10_000, 60_000)];
        let segment = Segment::new("s0", media, 12_500, 20_000, canvas(), grid()).unwrap();
        let graph = segment.generate().unwrap();
        let video = graph.statements()[1].filter("trim").unwrap().to_string();
        let audio = graph
            .producer(&Label::item("s0", MediaId(0), StreamKind::Audio))
            .unwrap()
            .filter("atrim")
            .unwrap()
            .to_string();
        assert_eq!(video, "trim=2.5:10");
        assert_eq!(audio, "atrim=2.5:10");
    }

    #[test]
    fn test_custom_style_is_applied() {
        let style = GraphStyle {
            placeholder_color: "navy".to_string(),
            silence_sample_rate: 44_100,
            ..GraphStyle::default()
        };
        let media = vec![MediaItem::audio(0, bob(), 0, 1_000).muted()];
        let segment = Segment::new("s0", media, 0, 1_000, canvas(), grid())
            .unwrap()
            .with_style(style);
        let text = segment.generate_filter().unwrap();
        assert!(!text.contains("navy"));
        assert!(text.contains("anullsrc=r=44100:cl=stereo"));

        let media = vec![MediaItem::audio(0, bob(), 0, 1_000)];
        let segment = Segment::new("s0", media, 0, 1_000, canvas(), grid())
            .unwrap()
            .with_style(GraphStyle {
                placeholder_color: "navy".to_string(),
                ..GraphStyle::default()
            });
        assert!(segment.generate_filter().unwrap().contains("c=navy"));
    }

    #[test]
    fn test_segments_plan_concurrently() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Segment>();

        let segment = Segment::new("s0", session(), 1_000, 4_000, canvas(), grid()).unwrap();
        let expected = segment.generate_filter().unwrap();
        std::thread::scope(|scope| {
            let handles: Vec<_> = (0..4)
                .map(|_| scope.spawn(|| segment.generate_filter().unwrap()))
                .collect();
            for handle in handles {
                assert_eq!(handle.join().unwrap(), expected);
            }
        });
    }
}
