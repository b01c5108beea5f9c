use anyhow::{Context, Result};
use std::fs::OpenOptions;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

const ENV_LOG_FILE: &str = "SITEBOOK_LOG_FILE";

pub fn init_tracing() -> Result<()> {
    init_tracing_with_default("warn")
}

/// Install the global subscriber: a stderr layer filtered by `RUST_LOG`
/// (falling back to `default_directive`), plus a debug-level file layer
/// when `SITEBOOK_LOG_FILE` is set.
pub fn init_tracing_with_default(default_directive: &str) -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive));

    let stderr_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_filter(filter);

    let registry = tracing_subscriber::registry().with(stderr_layer);

    if let Some(log_path) = std::env::var(ENV_LOG_FILE).ok().filter(|p| !p.trim().is_empty()) {
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&log_path)
            .with_context(|| format!("Failed to open log file {}", log_path))?;

        let file_layer = fmt::layer()
            .with_writer(file)
            .with_ansi(false)
            .with_target(true)
            .with_thread_ids(true)
            .with_filter(tracing_subscriber::filter::LevelFilter::DEBUG);

        registry
            .with(file_layer)
            .try_init()
            .context("Failed to install tracing subscriber")?;
        eprintln!("File logging enabled: {}", log_path);
    } else {
        registry
            .try_init()
            .context("Failed to install tracing subscriber")?;
    }
    Ok(())
}
