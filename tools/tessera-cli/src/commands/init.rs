//! Initialize a new session directory.

use std::path::PathBuf;

use tessera_media_model::geometry::Size;
use tessera_media_model::manifest::{LoadedManifest, MANIFEST_FILE};

pub fn run(name: String, output: PathBuf, width: u32, height: u32) -> anyhow::Result<()> {
    let session_dir = output.join(&name);
    println!("Creating session '{}' at {}", name, session_dir.display());

    let canvas = Size::new(width, height);
    let loaded = LoadedManifest::create(&session_dir, &name, canvas)
        .map_err(|e| anyhow::anyhow!("Failed to create session: {e}"))?;

    println!("Session created successfully:");
    println!("  Directory: {}", loaded.root.display());
    println!("  Canvas: {canvas}");
    println!();
    println!("Directory structure:");
    println!("  {}/", name);
    println!("  ├── {MANIFEST_FILE}  (media list, canvas, segments)");
    println!("  └── sources/       (recorded media files)");

    Ok(())
}
