//! Log setup for hosts that don't install their own subscriber.
//!
//! Lines go to stderr and are appended to `~/.brb/brb.log`.
//! JSON output with `BRB_LOG_JSON=1`; filter via `RUST_LOG`.

use std::fs::OpenOptions;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use tracing_subscriber::fmt::writer::MakeWriterExt;
use tracing_subscriber::EnvFilter;

pub const LOG_JSON_ENV: &str = "BRB_LOG_JSON";

pub fn log_path() -> anyhow::Result<PathBuf> {
    let home = dirs::home_dir().context("no home directory")?;
    Ok(home.join(".brb").join("brb.log"))
}

/// Install the global subscriber. Returns `Ok(false)` if one was already set.
pub fn init() -> anyhow::Result<bool> {
    let path = log_path()?;
    if let Some(dir) = path.parent() {
        std::fs::create_dir_all(dir).with_context(|| format!("can't create {}", dir.display()))?;
    }
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .with_context(|| format!("can't open {}", path.display()))?;
    let writer = std::io::stderr.and(Arc::new(file));

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("brb_bridge=info"));
    let json_logs = std::env::var(LOG_JSON_ENV).unwrap_or_default() == "1";

    let installed = if json_logs {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(writer)
            .with_ansi(false)
            .json()
            .try_init()
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(writer)
            .with_ansi(false)
            .try_init()
    };
    Ok(installed.is_ok())
}
