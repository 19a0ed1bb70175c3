use std::fs;
use std::path::Path;
use std::time::Duration;

use anyhow::Context;
use engine_logging::engine_info;
use scanner_engine::{ApiSettings, BatchSettings, RetryPolicy, ScanSettings};
use serde::{Deserialize, Serialize};

/// Optional overrides read from a RON file. Absent fields keep the defaults.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    pub query: Option<String>,
    pub max_results: Option<u32>,
    pub batch_size: Option<usize>,
    pub pause_ms: Option<u64>,
    pub max_attempts: Option<u32>,
    pub initial_delay_ms: Option<u64>,
    pub base_url: Option<String>,
    pub connect_timeout_secs: Option<u64>,
    pub request_timeout_secs: Option<u64>,
}

impl FileConfig {
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path.display()))?;
        let config = Self::parse(&content)
            .with_context(|| format!("parsing config {}", path.display()))?;
        engine_info!("Loaded config from {:?}", path);
        Ok(config)
    }

    pub fn parse(content: &str) -> anyhow::Result<Self> {
        Ok(ron::from_str(content)?)
    }

    pub fn scan_settings(&self) -> ScanSettings {
        let defaults = ScanSettings::default();
        let batch = BatchSettings::default();
        let retry = RetryPolicy::default();
        ScanSettings {
            query: self.query.clone().unwrap_or(defaults.query),
            max_results: self.max_results.unwrap_or(defaults.max_results),
            batch: BatchSettings {
                batch_size: self.batch_size.unwrap_or(batch.batch_size),
                pause: self.pause_ms.map(Duration::from_millis).unwrap_or(batch.pause),
                retry: RetryPolicy {
                    max_attempts: self.max_attempts.unwrap_or(retry.max_attempts),
                    initial_delay: self
                        .initial_delay_ms
                        .map(Duration::from_millis)
                        .unwrap_or(retry.initial_delay),
                },
            },
        }
    }

    pub fn api_settings(&self) -> ApiSettings {
        let defaults = ApiSettings::default();
        ApiSettings {
            base_url: self.base_url.clone().unwrap_or(defaults.base_url),
            connect_timeout: self
                .connect_timeout_secs
                .map(Duration::from_secs)
                .unwrap_or(defaults.connect_timeout),
            request_timeout: self
                .request_timeout_secs
                .map(Duration::from_secs)
                .unwrap_or(defaults.request_timeout),
        }
    }
}
