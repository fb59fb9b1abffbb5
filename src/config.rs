use serde::Deserialize;

use crate::model::AssetHandle;

/// Default retry budget for a failing asset prefetch under the best-effort policy.
pub const DEFAULT_PREFETCH_RETRIES: u32 = 3;

/// Default base delay between prefetch retries; attempt N waits N times this.
pub const DEFAULT_PREFETCH_BACKOFF_MS: u64 = 500;

/// Events buffered per subscriber before the oldest are dropped.
pub const EVENT_CHANNEL_CAPACITY: usize = 64;

/// Policy applied when an individual asset prefetch fails.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReadinessPolicy {
    /// Block readiness until every asset resolves; a permanent failure keeps
    /// the gate closed.
    FailFast,
    /// Retry each failing asset up to `max_retries` with linear backoff, then
    /// proceed without it.
    BestEffort { max_retries: u32, backoff_ms: u64 },
}

/// Top-level configuration for the state core.
#[derive(Debug, Clone, Deserialize)]
pub struct CoreConfig {
    /// Assets prefetched before the interactive UI is shown.
    pub assets: Vec<AssetHandle>,
    /// How asset prefetch failures are handled.
    pub readiness: ReadinessPolicy,
}

impl Default for CoreConfig {
    fn default() -> Self {
        Self {
            assets: Vec::new(),
            readiness: ReadinessPolicy::BestEffort {
                max_retries: DEFAULT_PREFETCH_RETRIES,
                backoff_ms: DEFAULT_PREFETCH_BACKOFF_MS,
            },
        }
    }
}
