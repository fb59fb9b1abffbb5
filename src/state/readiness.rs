// Asset readiness gate — one-shot open once every first-screen asset resolves.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use bytes::Bytes;
use parking_lot::RwLock;
use tokio::sync::Notify;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use super::events::{EventSender, StateEvent};
use crate::config::ReadinessPolicy;
use crate::model::AssetHandle;
use crate::source::traits::AssetStore;

pub struct AssetReadinessGate {
    store: Arc<dyn AssetStore>,
    policy: ReadinessPolicy,
    ready: AtomicBool,
    begun: AtomicBool,
    ready_notify: Notify,
    resolved: RwLock<HashMap<String, Bytes>>,
    events: EventSender,
}

impl AssetReadinessGate {
    pub fn new(store: Arc<dyn AssetStore>, policy: ReadinessPolicy, events: EventSender) -> Self {
        Self {
            store,
            policy,
            ready: AtomicBool::new(false),
            begun: AtomicBool::new(false),
            ready_notify: Notify::new(),
            resolved: RwLock::new(HashMap::new()),
            events,
        }
    }

    pub fn is_ready(&self) -> bool {
        self.ready.load(Ordering::Acquire)
    }

    /// Prefetched bytes for a named asset, once it has resolved.
    pub fn asset(&self, name: &str) -> Option<Bytes> {
        self.resolved.read().get(name).cloned()
    }

    /// Wait until the gate opens. Returns immediately once ready.
    pub async fn wait_ready(&self) {
        loop {
            if self.is_ready() {
                return;
            }
            let notified = self.ready_notify.notified();
            // Re-check after registering so a wakeup between the first check
            // and the registration is not lost.
            if self.is_ready() {
                return;
            }
            notified.await;
        }
    }

    /// Start one prefetch per asset concurrently. Returns a handle that
    /// resolves when the aggregate has settled. Calling again after the
    /// first run is a no-op; `ready` never regresses.
    pub fn begin(self: &Arc<Self>, assets: Vec<AssetHandle>) -> JoinHandle<()> {
        if self.begun.swap(true, Ordering::AcqRel) {
            debug!("readiness gate already begun");
            return tokio::spawn(async {});
        }

        let gate = Arc::clone(self);
        tokio::spawn(async move {
            let mut handles = Vec::with_capacity(assets.len());
            for asset in assets {
                let gate = Arc::clone(&gate);
                handles.push(tokio::spawn(async move { gate.prefetch_one(asset).await }));
            }

            let mut all_resolved = true;
            for handle in handles {
                match handle.await {
                    Ok(resolved) => all_resolved &= resolved,
                    Err(e) => {
                        warn!("asset prefetch task failed: {}", e);
                        all_resolved = false;
                    }
                }
            }

            match gate.policy {
                ReadinessPolicy::FailFast if !all_resolved => {
                    warn!("readiness gate blocked: asset prefetch failed under fail-fast policy");
                }
                _ => gate.open(),
            }
        })
    }

    /// Fetch one asset, retrying per the configured policy. Returns whether
    /// the asset resolved within its budget.
    async fn prefetch_one(&self, asset: AssetHandle) -> bool {
        let (max_retries, backoff_ms) = match self.policy {
            ReadinessPolicy::FailFast => (0, 0),
            ReadinessPolicy::BestEffort {
                max_retries,
                backoff_ms,
            } => (max_retries, backoff_ms),
        };

        for attempt in 0..=max_retries {
            match self.store.prefetch(&asset).await {
                Ok(data) => {
                    debug!("asset {} prefetched ({} bytes)", asset.name, data.len());
                    self.resolved.write().insert(asset.name.clone(), data);
                    return true;
                }
                Err(e) => {
                    if attempt < max_retries {
                        warn!(
                            "asset {} prefetch failed (attempt {}): {}",
                            asset.name, attempt, e
                        );
                        tokio::time::sleep(Duration::from_millis(backoff_ms * (attempt as u64 + 1)))
                            .await;
                    } else {
                        warn!(
                            "asset {} prefetch failed after {} retries: {}",
                            asset.name, max_retries, e
                        );
                        let _ = self.events.send(StateEvent::AssetPrefetchFailed {
                            asset: asset.name.clone(),
                            message: e.to_string(),
                        });
                    }
                }
            }
        }
        false
    }

    /// One-way transition to ready; idempotent.
    fn open(&self) {
        if self.ready.swap(true, Ordering::AcqRel) {
            return;
        }
        info!("readiness gate open");
        self.ready_notify.notify_waiters();
        let _ = self.events.send(StateEvent::Ready);
    }
}
