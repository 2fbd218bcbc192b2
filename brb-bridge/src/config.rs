//! Relay configuration.
//!
//! Config file lives at `~/.config/brb/bridge.toml` (or wherever
//! `BRB_BRIDGE_CONFIG` points). A missing file means defaults.

use std::path::PathBuf;

use anyhow::Context;
use serde::{Deserialize, Serialize};

/// Default bound on events buffered before a handler registers.
pub const DEFAULT_CAPACITY: usize = 256;
/// Environment variable overriding the config file location.
pub const CONFIG_ENV: &str = "BRB_BRIDGE_CONFIG";

/// What to do with a payload that is not valid UTF-8.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EncodingPolicy {
    /// Drop the event with `InvalidPayload`.
    #[default]
    Reject,
    /// Substitute U+FFFD for invalid sequences and deliver.
    Replace,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RelayConfig {
    /// Max events held while no handler is registered. Oldest are dropped past this.
    pub capacity: usize,
    pub encoding: EncodingPolicy,
    /// Scheme prefixes accepted from process launch arguments.
    pub launch_schemes: Vec<String>,
}

impl Default for RelayConfig {
    fn default() -> Self {
        Self {
            capacity: DEFAULT_CAPACITY,
            encoding: EncodingPolicy::Reject,
            launch_schemes: vec!["http".to_string(), "https".to_string()],
        }
    }
}

fn config_path() -> PathBuf {
    if let Some(path) = std::env::var_os(CONFIG_ENV) {
        return PathBuf::from(path);
    }
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("brb")
        .join("bridge.toml")
}

impl RelayConfig {
    /// Load from the default location, falling back to defaults on any problem.
    pub fn load() -> Self {
        let path = config_path();
        if !path.exists() {
            return Self::default();
        }
        match Self::load_from(&path) {
            Ok(c) => c,
            Err(e) => {
                tracing::warn!("ignoring bridge config {}: {e:#}", path.display());
                Self::default()
            }
        }
    }

    pub fn load_from(path: &std::path::Path) -> anyhow::Result<Self> {
        let s = std::fs::read_to_string(path)
            .with_context(|| format!("can't read {}", path.display()))?;
        Self::from_toml_str(&s)
    }

    pub fn from_toml_str(s: &str) -> anyhow::Result<Self> {
        let config: Self = toml::from_str(s).context("bad bridge config")?;
        Ok(config.normalized())
    }

    /// Clamp values the relay can't work with.
    pub fn normalized(mut self) -> Self {
        if self.capacity == 0 {
            self.capacity = 1;
        }
        for scheme in &mut self.launch_schemes {
            *scheme = scheme.trim_end_matches("://").to_ascii_lowercase();
        }
        self
    }
}
