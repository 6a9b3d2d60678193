use std::sync::Arc;

use proptest::prelude::*;
use tessera_filtergraph::{Label, Segment, StreamKind};
use tessera_layout::LayoutKind;
use tessera_media_model::geometry::Size;
use tessera_media_model::media::{ChannelLayout, MediaItem, UserRef};

type RawItem = (u8, Option<u8>, i64, i64, bool);

fn media_item() -> impl Strategy<Value = RawItem> {
    (
        0u8..3,
        prop::option::of(0u8..3),
        0i64..20_000,
        1i64..20_000,
        any::<bool>(),
    )
}

fn build(raw: Vec<RawItem>) -> Vec<MediaItem> {
    raw.into_iter()
        .enumerate()
        .map(|(id, (kind, user, start, duration, surround))| {
            let user = user.map(|u| UserRef::new(format!("u{u}"), format!("User {u}")));
            let item = match kind {
                0 => MediaItem::camera(id as u32, user, start, duration),
                1 => MediaItem::audio(id as u32, user, start, duration),
                _ => MediaItem::background(id as u32, user, start, duration),
            };
            if surround {
                item.with_channels(ChannelLayout::Surround51)
            } else {
                item
            }
        })
        .collect()
}

proptest! {
    #[test]
    fn overlay_chain_covers_every_visible_item(
        raw in prop::collection::vec(media_item(), 0..8),
        start in 0i64..10_000,
        length in 1i64..10_000,
        layout in prop_oneof![Just(LayoutKind::Grid), Just(LayoutKind::Row), Just(LayoutKind::Column)],
    ) {
        let media = build(raw);
        let segment = Segment::new(
            "p",
            media,
            start,
            start + length,
            Size::new(1280, 720),
            layout.strategy(0),
        ).unwrap();

        let graph = segment.generate().unwrap();
        prop_assert_eq!(graph.to_string(), segment.generate_filter().unwrap());

        let visible = segment.visible_items();
        let overlays: Vec<_> = graph.with_filter("overlay").collect();
        prop_assert_eq!(overlays.len(), visible.len());

        if let Some(first) = overlays.first() {
            prop_assert!(first.reads(&Label::background("p")));
        }
        if let Some(last) = overlays.last() {
            prop_assert_eq!(&last.outputs, &vec![Label::video_out("p")]);
        }
        for (pair, item) in overlays.windows(2).zip(&visible) {
            prop_assert_eq!(&pair[0].outputs, &vec![Label::overlay("p", item.id)]);
            prop_assert!(pair[1].reads(&pair[0].outputs[0]));
        }

        prop_assert!(graph.producer(&Label::video_out("p")).is_some());
        prop_assert!(graph.producer(&Label::audio_out("p")).is_some());
        for item in segment.audio_items() {
            let label = Label::item("p", item.id, StreamKind::Audio);
            prop_assert!(graph.producer(&label).is_some());
        }
    }

    #[test]
    fn segments_share_media_without_interference(
        raw in prop::collection::vec(media_item(), 1..6),
    ) {
        let media: Arc<[MediaItem]> = build(raw).into();
        let layout = LayoutKind::Grid.strategy(4);
        let a = Segment::new("a", Arc::clone(&media), 0, 1_000, Size::new(640, 360), Arc::clone(&layout)).unwrap();
        let b = Segment::new("b", Arc::clone(&media), 0, 1_000, Size::new(640, 360), layout).unwrap();

        let graph_a = a.generate().unwrap();
        let graph_b = b.generate().unwrap();
        prop_assert_eq!(graph_a.len(), graph_b.len());
        for (x, y) in graph_a.statements().iter().zip(graph_b.statements()) {
            let names_x: Vec<&str> = x.filters.iter().map(|f| f.name).collect();
            let names_y: Vec<&str> = y.filters.iter().map(|f| f.name).collect();
            prop_assert_eq!(names_x, names_y);
            prop_assert!(x.outputs.iter().all(|label| label.as_str().starts_with("a_")));
            prop_assert!(y.outputs.iter().all(|label| label.as_str().starts_with("b_")));
        }
    }
}
