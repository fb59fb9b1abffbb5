// Consumer-facing event stream — one discrete event per state mutation.

use tokio::sync::broadcast;

use crate::model::ContentKind;

pub type EventSender = broadcast::Sender<StateEvent>;
pub type EventReceiver = broadcast::Receiver<StateEvent>;

/// State-change notification pushed to every subscriber.
#[derive(Debug, Clone, PartialEq)]
pub enum StateEvent {
    /// A remote fetch for `kind` started loading.
    FetchStarted(ContentKind),
    /// A remote fetch completed and the collection was replaced.
    FetchCompleted(ContentKind),
    /// A remote fetch failed; the previous collection is intact.
    FetchFailed { kind: ContentKind, message: String },
    /// One asset exhausted its prefetch budget.
    AssetPrefetchFailed { asset: String, message: String },
    /// The readiness gate opened; the interactive UI may be shown.
    Ready,
    /// Tour progression changed.
    TourChanged { started: bool, marker: usize },
}
