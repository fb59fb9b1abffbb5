use anyhow::Result;
use async_trait::async_trait;
use bytes::Bytes;

use crate::model::{Artist, AssetHandle, Mural};

/// Remote read-only backend serving the mural and artist catalogs.
#[async_trait]
pub trait ContentSource: Send + Sync {
    /// Fetch the full mural catalog, ordered by tour sequence.
    async fn fetch_murals(&self) -> Result<Vec<Mural>>;

    /// Fetch the full artist catalog.
    async fn fetch_artists(&self) -> Result<Vec<Artist>>;
}

/// Store that resolves heavy first-screen assets ahead of display.
#[async_trait]
pub trait AssetStore: Send + Sync {
    /// Download one asset, returning its bytes.
    async fn prefetch(&self, asset: &AssetHandle) -> Result<Bytes>;
}
