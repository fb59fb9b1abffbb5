// Client-side state core for the guided mural-tour application — tracks the
// fetched mural/artist catalogs, gates the interactive UI on first-screen
// asset prefetch, and drives tour progression.

use std::sync::Once;

use tracing::info;
use tracing_subscriber::EnvFilter;

pub mod config;
pub mod model;
pub mod shell;
pub mod source;
pub mod state;

static INIT_TRACING: Once = Once::new();

/// Install the process-wide tracing subscriber. Safe to call repeatedly.
pub fn init_tracing() {
    INIT_TRACING.call_once(|| {
        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new("info,hyper=warn,reqwest=warn"));

        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(true)
            .try_init();

        info!("tour core tracing initialized");
    });
}
