// Application shell — composes the state core and exposes the consumer boundary.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use bytes::Bytes;
use parking_lot::RwLock;
use tokio::sync::broadcast;
use tokio::task::JoinHandle;
use tracing::debug;

use crate::config::{CoreConfig, EVENT_CHANNEL_CAPACITY};
use crate::model::{Artist, ContentKind, Mural};
use crate::source::traits::{AssetStore, ContentSource};
use crate::state::collection::ContentCollection;
use crate::state::events::{EventReceiver, EventSender, StateEvent};
use crate::state::readiness::AssetReadinessGate;
use crate::state::repository::ContentRepository;
use crate::state::tour::TourProgression;

/// Process-wide state container. Constructed once by the composition root and
/// shared by reference; all mutation goes through its methods, never through
/// the presentation layer directly.
pub struct ApplicationShell {
    config: CoreConfig,
    repository: Arc<ContentRepository>,
    gate: Arc<AssetReadinessGate>,
    tour: RwLock<TourProgression>,
    events: EventSender,
    initialized: AtomicBool,
}

impl ApplicationShell {
    pub fn new(
        config: CoreConfig,
        content_source: Arc<dyn ContentSource>,
        asset_store: Arc<dyn AssetStore>,
    ) -> Arc<Self> {
        let (events, _) = broadcast::channel(EVENT_CHANNEL_CAPACITY);
        let repository = Arc::new(ContentRepository::new(content_source, events.clone()));
        let gate = Arc::new(AssetReadinessGate::new(
            asset_store,
            config.readiness.clone(),
            events.clone(),
        ));

        Arc::new(Self {
            config,
            repository,
            gate,
            tour: RwLock::new(TourProgression::new()),
            events,
            initialized: AtomicBool::new(false),
        })
    }

    /// One-time startup: begin the asset prefetch and request both catalogs.
    /// Returns a handle resolving when the prefetch aggregate has settled.
    pub fn initialize(&self) -> JoinHandle<()> {
        if self.initialized.swap(true, Ordering::AcqRel) {
            debug!("shell already initialized");
            return tokio::spawn(async {});
        }

        let handle = self.gate.begin(self.config.assets.clone());
        self.repository.request_fetch(ContentKind::Murals);
        self.repository.request_fetch(ContentKind::Artists);
        handle
    }

    /// Observe every state mutation as a discrete event.
    pub fn subscribe(&self) -> EventReceiver {
        self.events.subscribe()
    }

    // Read access.

    pub fn murals(&self) -> ContentCollection<Mural> {
        self.repository.murals()
    }

    pub fn artists(&self) -> ContentCollection<Artist> {
        self.repository.artists()
    }

    pub fn tour(&self) -> TourProgression {
        *self.tour.read()
    }

    pub fn is_ready(&self) -> bool {
        self.gate.is_ready()
    }

    /// Wait until the first-screen assets have resolved.
    pub async fn wait_ready(&self) {
        self.gate.wait_ready().await
    }

    /// Mural backing the given marker index.
    pub fn mural_at(&self, marker: usize) -> Option<Mural> {
        self.repository.mural_at(marker)
    }

    /// Resolve a mural's weak artist reference.
    pub fn artist_for(&self, mural: &Mural) -> Option<Artist> {
        self.repository.artist_for(mural)
    }

    /// Prefetched bytes for a named first-screen asset.
    pub fn asset(&self, name: &str) -> Option<Bytes> {
        self.gate.asset(name)
    }

    // Mutation entry points.

    pub fn request_murals_fetch(&self) {
        self.repository.request_fetch(ContentKind::Murals);
    }

    pub fn request_artists_fetch(&self) {
        self.repository.request_fetch(ContentKind::Artists);
    }

    pub fn start_tour(&self) {
        let count = self.repository.marker_count();
        self.apply_tour(|tour| tour.start(count));
    }

    pub fn advance_marker(&self) {
        let count = self.repository.marker_count();
        self.apply_tour(|tour| tour.advance(count));
    }

    pub fn retreat_marker(&self) {
        self.apply_tour(TourProgression::retreat);
    }

    pub fn reset_tour(&self) {
        self.apply_tour(TourProgression::reset);
    }

    /// Run one tour transition and publish it if state changed.
    fn apply_tour(&self, transition: impl FnOnce(&mut TourProgression) -> bool) {
        let snapshot = {
            let mut tour = self.tour.write();
            if !transition(&mut tour) {
                return;
            }
            *tour
        };
        let _ = self.events.send(StateEvent::TourChanged {
            started: snapshot.started(),
            marker: snapshot.marker().unwrap_or(0),
        });
    }
}
