// Integration tests for the content repository's fetch lifecycle.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use anyhow::{anyhow, Result};
use async_trait::async_trait;
use parking_lot::Mutex;
use tokio::sync::{broadcast, Notify};

use mural_tour_core::config::EVENT_CHANNEL_CAPACITY;
use mural_tour_core::model::{Artist, ContentKind, Mural};
use mural_tour_core::source::traits::ContentSource;
use mural_tour_core::state::events::{EventReceiver, StateEvent};
use mural_tour_core::state::repository::ContentRepository;

fn mural(id: &str, index: u32) -> Mural {
    Mural {
        id: id.to_string(),
        title: format!("Mural {index}"),
        description: String::new(),
        medium: "Acrylic".to_string(),
        month: "June".to_string(),
        year: "2017".to_string(),
        photo_url: format!("http://assets.test/{id}.jpg"),
        latitude: 41.82,
        longitude: -71.41,
        artist_id: "artist-1".to_string(),
        index,
    }
}

fn artist(id: &str, name: &str) -> Artist {
    Artist {
        id: id.to_string(),
        name: name.to_string(),
        city: "Providence".to_string(),
        bio: String::new(),
        link: String::new(),
    }
}

/// Source that holds every mural fetch until released, counting remote calls.
struct GatedSource {
    calls: AtomicUsize,
    release: Notify,
}

impl GatedSource {
    fn new() -> Self {
        Self {
            calls: AtomicUsize::new(0),
            release: Notify::new(),
        }
    }
}

#[async_trait]
impl ContentSource for GatedSource {
    async fn fetch_murals(&self) -> Result<Vec<Mural>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.release.notified().await;
        Ok(vec![mural("m1", 1), mural("m2", 2)])
    }

    async fn fetch_artists(&self) -> Result<Vec<Artist>> {
        Ok(Vec::new())
    }
}

/// Source that replays a scripted sequence of mural responses.
struct ScriptedSource {
    responses: Mutex<VecDeque<Result<Vec<Mural>>>>,
    artists: Vec<Artist>,
}

impl ScriptedSource {
    fn new(responses: Vec<Result<Vec<Mural>>>) -> Self {
        Self {
            responses: Mutex::new(responses.into()),
            artists: vec![artist("artist-1", "AGONZA")],
        }
    }
}

#[async_trait]
impl ContentSource for ScriptedSource {
    async fn fetch_murals(&self) -> Result<Vec<Mural>> {
        self.responses
            .lock()
            .pop_front()
            .unwrap_or_else(|| Err(anyhow!("no scripted response left")))
    }

    async fn fetch_artists(&self) -> Result<Vec<Artist>> {
        Ok(self.artists.clone())
    }
}

async fn next_event(rx: &mut EventReceiver) -> StateEvent {
    tokio::time::timeout(std::time::Duration::from_secs(5), rx.recv())
        .await
        .expect("timed out waiting for event")
        .expect("event channel closed")
}

#[tokio::test]
async fn test_duplicate_requests_issue_one_remote_call() {
    let source = Arc::new(GatedSource::new());
    let (events, mut rx) = broadcast::channel(EVENT_CHANNEL_CAPACITY);
    let repo = Arc::new(ContentRepository::new(source.clone(), events));

    repo.request_fetch(ContentKind::Murals);
    assert!(repo.murals().loading);

    // Second logical request while the first is in flight: no new remote call,
    // still observes loading.
    repo.request_fetch(ContentKind::Murals);
    assert!(repo.murals().loading);

    assert_eq!(next_event(&mut rx).await, StateEvent::FetchStarted(ContentKind::Murals));

    source.release.notify_one();
    assert_eq!(
        next_event(&mut rx).await,
        StateEvent::FetchCompleted(ContentKind::Murals)
    );

    assert_eq!(source.calls.load(Ordering::SeqCst), 1);
    let murals = repo.murals();
    assert!(!murals.loading);
    assert!(murals.loaded);
    assert_eq!(murals.items.len(), 2);

    // Once the fetch settled, a new request goes to the source again.
    repo.request_fetch(ContentKind::Murals);
    source.release.notify_one();
    assert_eq!(
        next_event(&mut rx).await,
        StateEvent::FetchCompleted(ContentKind::Murals)
    );
    assert_eq!(source.calls.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn test_failed_fetch_keeps_previous_collection() {
    let first = vec![mural("m1", 1)];
    let second = vec![mural("m2", 1), mural("m3", 2)];
    let source = Arc::new(ScriptedSource::new(vec![
        Ok(first.clone()),
        Err(anyhow!("backend unreachable")),
        Ok(second.clone()),
    ]));
    let (events, mut rx) = broadcast::channel(EVENT_CHANNEL_CAPACITY);
    let repo = Arc::new(ContentRepository::new(source, events));

    repo.request_fetch(ContentKind::Murals);
    assert_eq!(next_event(&mut rx).await, StateEvent::FetchStarted(ContentKind::Murals));
    assert_eq!(
        next_event(&mut rx).await,
        StateEvent::FetchCompleted(ContentKind::Murals)
    );
    assert_eq!(repo.murals().items, first);

    // Failure resets `loading` and leaves the previous items intact.
    repo.request_fetch(ContentKind::Murals);
    assert_eq!(next_event(&mut rx).await, StateEvent::FetchStarted(ContentKind::Murals));
    match next_event(&mut rx).await {
        StateEvent::FetchFailed { kind, message } => {
            assert_eq!(kind, ContentKind::Murals);
            assert!(message.contains("backend unreachable"));
        }
        other => panic!("expected FetchFailed, got {other:?}"),
    }
    let after_failure = repo.murals();
    assert!(!after_failure.loading);
    assert!(!after_failure.loaded);
    assert_eq!(after_failure.items, first);

    // A consumer retry succeeds and replaces the collection wholesale, not a
    // merge with the failed attempt.
    repo.request_fetch(ContentKind::Murals);
    assert_eq!(next_event(&mut rx).await, StateEvent::FetchStarted(ContentKind::Murals));
    assert_eq!(
        next_event(&mut rx).await,
        StateEvent::FetchCompleted(ContentKind::Murals)
    );
    let after_retry = repo.murals();
    assert!(after_retry.loaded);
    assert!(!after_retry.loading);
    assert_eq!(after_retry.items, second);
}

#[tokio::test]
async fn test_marker_lookup_and_weak_artist_reference() {
    let source = Arc::new(ScriptedSource::new(vec![Ok(vec![
        mural("m1", 1),
        mural("m2", 2),
    ])]));
    let (events, mut rx) = broadcast::channel(EVENT_CHANNEL_CAPACITY);
    let repo = Arc::new(ContentRepository::new(source, events));

    repo.request_fetch(ContentKind::Murals);
    repo.request_fetch(ContentKind::Artists);
    let mut completed = 0;
    while completed < 2 {
        if let StateEvent::FetchCompleted(_) = next_event(&mut rx).await {
            completed += 1;
        }
    }

    assert_eq!(repo.marker_count(), 2);
    let first = repo.mural_at(0).expect("marker 0 backed by a mural");
    assert_eq!(first.id, "m1");
    assert!(repo.mural_at(5).is_none());

    let resolved = repo.artist_for(&first).expect("artist record loaded");
    assert_eq!(resolved.name, "AGONZA");

    let mut orphan = repo.mural_at(1).unwrap();
    orphan.artist_id = "no-such-artist".to_string();
    assert!(repo.artist_for(&orphan).is_none());
}
