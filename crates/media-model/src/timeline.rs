//! Splitting a session into segment windows.
//!
//! A session is cut at every instant where some item starts or stops,
//! so the set of playing items is constant inside each window. Every
//! window becomes one output segment with a fixed layout.

use serde::{Deserialize, Serialize};

use crate::media::{MediaId, MediaItem};

/// A time window and the items playing throughout it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SegmentWindow {
    /// Absolute start (ms).
    pub start_ms: i64,
    /// Absolute end (ms), always after `start_ms`.
    pub end_ms: i64,
    /// Items overlapping the window, ascending by id.
    pub media: Vec<MediaId>,
}

impl SegmentWindow {
    pub fn duration_ms(&self) -> i64 {
        self.end_ms - self.start_ms
    }
}

/// Ids of the items overlapping `[start_ms, end_ms)`, ascending.
pub fn overlapping_ids(items: &[MediaItem], start_ms: i64, end_ms: i64) -> Vec<MediaId> {
    let mut ids: Vec<MediaId> = items
        .iter()
        .filter(|item| item.duration_ms > 0 && item.overlaps(start_ms, end_ms))
        .map(|item| item.id)
        .collect();
    ids.sort_unstable();
    ids
}

/// Cut the session at every item boundary.
///
/// Windows where nothing plays are skipped; zero-length items never
/// produce a boundary.
pub fn split_windows(items: &[MediaItem]) -> Vec<SegmentWindow> {
    let mut cuts: Vec<i64> = items
        .iter()
        .filter(|item| item.duration_ms > 0)
        .flat_map(|item| [item.start_ms, item.end_ms()])
        .collect();
    cuts.sort_unstable();
    cuts.dedup();

    cuts.windows(2)
        .filter_map(|pair| {
            let (start_ms, end_ms) = (pair[0], pair[1]);
            let media = overlapping_ids(items, start_ms, end_ms);
            if media.is_empty() {
                None
            } else {
                Some(SegmentWindow {
                    start_ms,
                    end_ms,
                    media,
                })
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::media::UserRef;
    use proptest::prelude::*;

    fn ids(raw: &[u32]) -> Vec<MediaId> {
        raw.iter().copied().map(MediaId).collect()
    }

    #[test]
    fn test_split_on_every_boundary() {
        let alice = Some(UserRef::new("u1", "Alice"));
        let items = vec![
            MediaItem::camera(0, alice.clone(), 0, 10_000),
            MediaItem::audio(1, alice, 4_000, 10_000),
        ];
        let windows = split_windows(&items);
        assert_eq!(windows.len(), 3);
        assert_eq!((windows[0].start_ms, windows[0].end_ms), (0, 4_000));
        assert_eq!(windows[0].media, ids(&[0]));
        assert_eq!((windows[1].start_ms, windows[1].end_ms), (4_000, 10_000));
        assert_eq!(windows[1].media, ids(&[0, 1]));
        assert_eq!((windows[2].start_ms, windows[2].end_ms), (10_000, 14_000));
        assert_eq!(windows[2].media, ids(&[1]));
    }

    #[test]
    fn test_gaps_are_skipped() {
        let items = vec![
            MediaItem::camera(0, None, 0, 1_000),
            MediaItem::camera(1, None, 5_000, 1_000),
        ];
        let windows = split_windows(&items);
        assert_eq!(windows.len(), 2);
        assert!(windows.iter().all(|w| w.duration_ms() == 1_000));
    }

    #[test]
    fn test_ids_sorted_regardless_of_input_order() {
        let items = vec![
            MediaItem::camera(2, None, 0, 1_000),
            MediaItem::camera(0, None, 0, 1_000),
            MediaItem::camera(1, None, 0, 1_000),
        ];
        let windows = split_windows(&items);
        assert_eq!(windows.len(), 1);
        assert_eq!(windows[0].media, ids(&[0, 1, 2]));
    }

    #[test]
    fn test_empty_and_zero_length() {
        assert!(split_windows(&[]).is_empty());
        assert!(split_windows(&[MediaItem::camera(0, None, 100, 0)]).is_empty());
    }

    proptest! {
        #[test]
        fn prop_windows_are_ordered_and_populated(
            spans in prop::collection::vec((0i64..20_000, 0i64..5_000), 0..12)
        ) {
            let items: Vec<MediaItem> = spans
                .iter()
                .enumerate()
                .map(|(i, (start, dur))| MediaItem::camera(i as u32, None, *start, *dur))
                .collect();
            let windows = split_windows(&items);
            for pair in windows.windows(2) {
                prop_assert!(pair[0].end_ms <= pair[1].start_ms);
            }
            for window in &windows {
                prop_assert!(window.end_ms > window.start_ms);
                prop_assert!(!window.media.is_empty());
                for id in &window.media {
                    let item = &items[id.0 as usize];
                    prop_assert!(item.overlaps(window.start_ms, window.end_ms));
                }
            }
        }
    }
}
