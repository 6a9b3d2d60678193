//! Validate a session manifest.

use std::path::PathBuf;

use tessera_common::timing::format_duration;
use tessera_media_model::manifest::LoadedManifest;

pub fn run(path: PathBuf) -> anyhow::Result<()> {
    println!("Validating session at: {}", path.display());

    let loaded =
        LoadedManifest::load(&path).map_err(|e| anyhow::anyhow!("Failed to load manifest: {e}"))?;
    let manifest = &loaded.manifest;

    println!("  Name: {}", manifest.name);
    println!("  Version: {}", manifest.version);
    match manifest.canvas {
        Some(canvas) => println!("  Canvas: {canvas}"),
        None => println!("  Canvas: (configured default)"),
    }
    println!("  Media: {}", manifest.media.len());

    let mut issues = manifest.validate();
    if issues.is_empty() {
        let windows = manifest.segment_windows();
        let total: i64 = windows.iter().map(|s| s.window.duration_ms()).sum();
        println!("  Segments: {} ({})", windows.len(), format_duration(total));
    }
    issues.extend(loaded.missing_sources());

    if issues.is_empty() {
        println!("  Sources: All present");
        println!("\nManifest is valid.");
    } else {
        println!("\nValidation issues:");
        for issue in &issues {
            println!("  - {issue}");
        }
        println!(
            "\n{} issue(s) found. Session may not render correctly.",
            issues.len()
        );
    }

    Ok(())
}
