//! Show session information.

use std::collections::BTreeMap;
use std::path::PathBuf;

use serde::Serialize;
use tessera_common::config::AppConfig;
use tessera_common::timing::{format_duration, format_wall_clock};
use tessera_filtergraph::SessionPlanner;
use tessera_media_model::manifest::LoadedManifest;
use tessera_media_model::media::MediaItem;

#[derive(Serialize)]
struct SegmentSummary {
    id: String,
    start: String,
    end: String,
    duration_ms: i64,
    media: Vec<u32>,
    tiles: Vec<u32>,
    timestamp: bool,
}

#[derive(Serialize)]
struct SessionSummary {
    name: String,
    canvas: String,
    layout: String,
    participants: BTreeMap<String, Vec<u32>>,
    segments: Vec<SegmentSummary>,
}

pub fn run(path: PathBuf, json: bool, config: &AppConfig) -> anyhow::Result<()> {
    let loaded =
        LoadedManifest::load(&path).map_err(|e| anyhow::anyhow!("Failed to load manifest: {e}"))?;
    let manifest = &loaded.manifest;

    let planner =
        SessionPlanner::from_manifest(manifest, &config.planner, config.style.clone())?;
    let segments = planner.segments(manifest)?;

    let mut participants: BTreeMap<String, Vec<u32>> = BTreeMap::new();
    for source in &manifest.media {
        let owner = source
            .item
            .display_name()
            .unwrap_or("(unassigned)")
            .to_string();
        participants.entry(owner).or_default().push(source.item.id.0);
    }

    let summary = SessionSummary {
        name: manifest.name.clone(),
        canvas: planner.canvas.to_string(),
        layout: planner.layout.name().to_string(),
        participants,
        segments: segments
            .iter()
            .map(|segment| SegmentSummary {
                id: segment.id().to_string(),
                start: format_wall_clock(segment.start_ms()),
                end: format_wall_clock(segment.end_ms()),
                duration_ms: segment.duration_ms(),
                media: segment.media().iter().map(|m| m.id.0).collect(),
                tiles: segment.visible_items().iter().map(|m| m.id.0).collect(),
                timestamp: segment.shows_timestamp(),
            })
            .collect(),
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
        return Ok(());
    }

    println!("Session: {}", summary.name);
    println!("  Canvas: {}", summary.canvas);
    println!("  Layout: {}", summary.layout);
    println!();

    println!("Media:");
    for source in &manifest.media {
        println!("  [{}] {} ({})", source.item.id, source.path, describe(&source.item));
    }
    println!();

    println!("Participants:");
    for (name, ids) in &summary.participants {
        println!("  {name}: {ids:?}");
    }
    println!();

    println!("Segments:");
    for segment in &summary.segments {
        println!(
            "  {}: {} → {} ({}), media {:?}, tiles {:?}{}",
            segment.id,
            segment.start,
            segment.end,
            format_duration(segment.duration_ms),
            segment.media,
            segment.tiles,
            if segment.timestamp { ", timestamp" } else { "" }
        );
    }

    Ok(())
}

fn describe(item: &MediaItem) -> String {
    let mut streams = vec![];
    if item.has_video {
        streams.push("video".to_string());
    }
    if item.has_audio {
        streams.push(format!("audio {}ch", item.channels.count()));
    }
    if item.is_background {
        streams.push("card".to_string());
    }
    format!(
        "{}, starts {}, {}",
        streams.join(" + "),
        format_wall_clock(item.start_ms),
        format_duration(item.duration_ms)
    )
}
