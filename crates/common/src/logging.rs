//! Tracing subscriber setup.
//!
//! Planned graphs are printed on stdout, so log lines never go there:
//! they are written to stderr, or appended to `LoggingConfig::file`
//! when one is configured.

use std::fs::OpenOptions;
use std::sync::Mutex;

use tracing_subscriber::fmt::writer::BoxMakeWriter;
use tracing_subscriber::{fmt, EnvFilter};

use crate::config::LoggingConfig;

/// Install the global subscriber described by `config`.
///
/// `RUST_LOG` takes precedence over `config.level`. Calling this more
/// than once keeps the first subscriber.
pub fn init_logging(config: &LoggingConfig) {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.level));
    let builder = fmt::Subscriber::builder()
        .with_env_filter(env_filter)
        .with_writer(log_writer(config));

    let installed = if config.json {
        tracing::subscriber::set_global_default(builder.json().finish())
    } else {
        tracing::subscriber::set_global_default(
            builder
                .with_target(true)
                .with_file(false)
                .with_line_number(false)
                .finish(),
        )
    };
    if installed.is_ok() {
        tracing::trace!(level = %config.level, json = config.json, "Logging initialized");
    }
}

/// Logging for command-line use: `verbose` raises the level to debug.
pub fn init_cli_logging(config: &LoggingConfig, verbose: bool) {
    if verbose {
        init_logging(&LoggingConfig {
            level: "debug".to_string(),
            ..config.clone()
        });
    } else {
        init_logging(config);
    }
}

fn log_writer(config: &LoggingConfig) -> BoxMakeWriter {
    let Some(path) = &config.file else {
        return BoxMakeWriter::new(std::io::stderr);
    };
    match OpenOptions::new().create(true).append(true).open(path) {
        Ok(file) => BoxMakeWriter::new(Mutex::new(file)),
        Err(e) => {
            eprintln!(
                "warning: cannot open log file {}: {e}; logging to stderr",
                path.display()
            );
            BoxMakeWriter::new(std::io::stderr)
        }
    }
}
