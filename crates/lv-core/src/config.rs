use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

use crate::error::{Result, VeilError};

/// Default ceiling on accepted source size (1 MiB).
pub const DEFAULT_MAX_INPUT_BYTES: usize = 1024 * 1024;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct VeilConfig {
    pub latency: LatencyConfig,
    /// `None` disables the size ceiling.
    pub max_input_bytes: Option<usize>,
    pub banner: bool,
}

/// Simulated processing delay before a run starts.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LatencyConfig {
    pub enabled: bool,
    pub min_ms: u64,
    pub max_ms: u64,
}

impl LatencyConfig {
    /// Delay window with bounds ordered so that `min <= max`.
    pub fn window(&self) -> (Duration, Duration) {
        let lo = self.min_ms.min(self.max_ms);
        let hi = self.min_ms.max(self.max_ms);
        (Duration::from_millis(lo), Duration::from_millis(hi))
    }
}

impl Default for LatencyConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            min_ms: 300,
            max_ms: 1000,
        }
    }
}

impl Default for VeilConfig {
    fn default() -> Self {
        Self {
            latency: LatencyConfig::default(),
            max_input_bytes: Some(DEFAULT_MAX_INPUT_BYTES),
            banner: true,
        }
    }
}

impl VeilConfig {
    /// Config with the latency switched off, for synchronous callers.
    pub fn immediate() -> Self {
        Self {
            latency: LatencyConfig { enabled: false, ..LatencyConfig::default() },
            ..Self::default()
        }
    }

    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Load a JSON config document from disk.
    pub fn from_file(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path)
            .map_err(VeilError::from)
            .with_context(|| format!("reading config {}", path.display()))?;
        let config = Self::from_json_str(&raw)
            .with_context(|| format!("parsing config {}", path.display()))?;
        tracing::debug!(path = %path.display(), "loaded config");
        Ok(config)
    }
}
