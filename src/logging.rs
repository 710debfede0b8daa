//! Diagnostic logging. Stdout carries protocol traffic, so logs are appended
//! to a file instead.

use std::fs::{File, OpenOptions};
use std::path::Path;
use std::sync::Arc;
use tracing::Subscriber;
use tracing_subscriber::EnvFilter;

pub const DEFAULT_LOG_FILE: &str = "/tmp/slack-mcp.log";
const DEFAULT_LEVEL: &str = "info";

pub fn open_log_file(path: &Path) -> std::io::Result<File> {
    OpenOptions::new().create(true).append(true).open(path)
}

/// Map a `LOG_LEVEL` value onto a filter directive, falling back to the default.
fn level_directive(level: &str) -> &'static str {
    match level.to_lowercase().as_str() {
        "trace" => "trace",
        "debug" => "debug",
        "info" => "info",
        "warn" | "warning" => "warn",
        "error" => "error",
        _ => DEFAULT_LEVEL,
    }
}

/// `RUST_LOG` wins (module-level directives), then `LOG_LEVEL`, then `info`.
pub fn env_filter() -> EnvFilter {
    if let Ok(rust_log) = std::env::var("RUST_LOG") {
        EnvFilter::try_new(rust_log).unwrap_or_else(|_| EnvFilter::new(DEFAULT_LEVEL))
    } else if let Ok(log_level) = std::env::var("LOG_LEVEL") {
        EnvFilter::new(level_directive(&log_level))
    } else {
        EnvFilter::new(DEFAULT_LEVEL)
    }
}

fn subscriber(file: File, filter: EnvFilter) -> impl Subscriber + Send + Sync {
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Arc::new(file))
        .with_ansi(false)
        .with_target(false)
        .finish()
}

/// Install the global subscriber writing to `file`.
pub fn init(file: File) -> anyhow::Result<()> {
    tracing::subscriber::set_global_default(subscriber(file, env_filter()))?;
    Ok(())
}
