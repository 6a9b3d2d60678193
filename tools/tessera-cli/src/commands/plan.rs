//! Plan the filter graph (or full FFmpeg invocation) for a session.

use std::path::PathBuf;

use tessera_common::config::AppConfig;
use tessera_filtergraph::{engine_inputs, PlannedSegment, SequencePlan, SessionPlanner};
use tessera_media_model::manifest::LoadedManifest;

pub async fn run(
    path: PathBuf,
    output: Option<PathBuf>,
    print_args: bool,
    target: PathBuf,
    config: &AppConfig,
) -> anyhow::Result<()> {
    let loaded = LoadedManifest::load_valid(&path)
        .map_err(|e| anyhow::anyhow!("Failed to load manifest: {e}"))?;

    for missing in loaded.missing_sources() {
        tracing::warn!("{missing}");
    }

    let planner =
        SessionPlanner::from_manifest(&loaded.manifest, &config.planner, config.style.clone())?;
    let segments = planner.segments(&loaded.manifest)?;
    tracing::info!(
        session = %loaded.manifest.name,
        segments = segments.len(),
        canvas = %planner.canvas,
        layout = planner.layout.name(),
        "Planning session"
    );

    // Segments are independent; plan them side by side and keep output order.
    let handles: Vec<_> = segments
        .into_iter()
        .map(|segment| tokio::task::spawn_blocking(move || segment.plan()))
        .collect();
    let mut planned: Vec<PlannedSegment> = Vec::with_capacity(handles.len());
    for handle in handles {
        planned.push(handle.await??);
    }

    let plan = SequencePlan::new(planned)?;
    let text = if print_args {
        let args = plan.ffmpeg_args(&engine_inputs(&loaded), &target)?;
        args.iter()
            .map(|arg| quote_arg(arg))
            .collect::<Vec<_>>()
            .join(" ")
    } else {
        plan.filter_complex()
    };

    match output {
        Some(file) => {
            std::fs::write(&file, format!("{text}\n"))
                .map_err(|e| anyhow::anyhow!("Failed to write {}: {e}", file.display()))?;
            println!("Wrote plan to {}", file.display());
        }
        None => println!("{text}"),
    }

    Ok(())
}

/// Single-quote an argument for a POSIX shell when it needs it.
fn quote_arg(arg: &str) -> String {
    let plain = !arg.is_empty()
        && arg
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || "-_./=:@".contains(c));
    if plain {
        arg.to_string()
    } else {
        format!("'{}'", arg.replace('\'', r"'\''"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quote_arg() {
        assert_eq!(quote_arg("-filter_complex"), "-filter_complex");
        assert_eq!(quote_arg("[out_v]"), "'[out_v]'");
        assert_eq!(quote_arg("a'b"), r"'a'\''b'");
    }
}
