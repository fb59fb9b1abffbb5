// Content repository — mediates all reads and writes of fetched records.

use std::sync::Arc;

use parking_lot::RwLock;
use tracing::{debug, warn};

use super::collection::ContentCollection;
use super::events::{EventSender, StateEvent};
use crate::model::{Artist, ContentKind, Mural};
use crate::source::traits::ContentSource;

pub struct ContentRepository {
    source: Arc<dyn ContentSource>,
    murals: RwLock<ContentCollection<Mural>>,
    artists: RwLock<ContentCollection<Artist>>,
    events: EventSender,
}

impl ContentRepository {
    pub fn new(source: Arc<dyn ContentSource>, events: EventSender) -> Self {
        Self {
            source,
            murals: RwLock::new(ContentCollection::new()),
            artists: RwLock::new(ContentCollection::new()),
            events,
        }
    }

    /// Snapshot of the mural collection.
    pub fn murals(&self) -> ContentCollection<Mural> {
        self.murals.read().clone()
    }

    /// Snapshot of the artist collection.
    pub fn artists(&self) -> ContentCollection<Artist> {
        self.artists.read().clone()
    }

    /// Number of markers in the tour sequence.
    pub fn marker_count(&self) -> usize {
        self.murals.read().items.len()
    }

    /// Mural backing the given marker index.
    pub fn mural_at(&self, marker: usize) -> Option<Mural> {
        self.murals.read().items.get(marker).cloned()
    }

    /// Resolve a mural's weak artist reference against the loaded artists.
    pub fn artist_for(&self, mural: &Mural) -> Option<Artist> {
        self.artists
            .read()
            .items
            .iter()
            .find(|a| a.id == mural.artist_id)
            .cloned()
    }

    /// Idempotent: request a fetch for `kind`. The loading flag is checked
    /// and set under one lock acquisition, so a second call while a fetch is
    /// in flight never issues another remote read.
    pub fn request_fetch(self: &Arc<Self>, kind: ContentKind) {
        let started = match kind {
            ContentKind::Murals => self.murals.write().begin_fetch(),
            ContentKind::Artists => self.artists.write().begin_fetch(),
        };
        if !started {
            debug!("{} fetch already in flight", kind);
            return;
        }
        let _ = self.events.send(StateEvent::FetchStarted(kind));

        let repo = Arc::clone(self);
        tokio::spawn(async move {
            match kind {
                ContentKind::Murals => repo.run_murals_fetch().await,
                ContentKind::Artists => repo.run_artists_fetch().await,
            }
        });
    }

    async fn run_murals_fetch(&self) {
        match self.source.fetch_murals().await {
            Ok(items) => {
                debug!("murals fetch completed count={}", items.len());
                self.murals.write().complete_fetch(items);
                let _ = self
                    .events
                    .send(StateEvent::FetchCompleted(ContentKind::Murals));
            }
            Err(e) => {
                warn!("murals fetch failed: {}", e);
                self.murals.write().fail_fetch();
                let _ = self.events.send(StateEvent::FetchFailed {
                    kind: ContentKind::Murals,
                    message: e.to_string(),
                });
            }
        }
    }

    async fn run_artists_fetch(&self) {
        match self.source.fetch_artists().await {
            Ok(items) => {
                debug!("artists fetch completed count={}", items.len());
                self.artists.write().complete_fetch(items);
                let _ = self
                    .events
                    .send(StateEvent::FetchCompleted(ContentKind::Artists));
            }
            Err(e) => {
                warn!("artists fetch failed: {}", e);
                self.artists.write().fail_fetch();
                let _ = self.events.send(StateEvent::FetchFailed {
                    kind: ContentKind::Artists,
                    message: e.to_string(),
                });
            }
        }
    }
}
