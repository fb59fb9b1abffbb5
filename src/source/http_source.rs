// HTTP backend — fetches the mural/artist catalogs and first-screen assets.

use std::collections::HashMap;

use anyhow::{anyhow, Result};
use async_trait::async_trait;
use bytes::Bytes;
use reqwest::{Client, RequestBuilder};
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use super::traits::{AssetStore, ContentSource};
use crate::model::{Artist, AssetHandle, Mural};

pub struct HttpContentSource {
    client: Client,
    base_url: String,
    headers: HashMap<String, String>,
}

impl HttpContentSource {
    pub fn new(base_url: String, headers: HashMap<String, String>) -> Self {
        Self {
            client: Client::new(),
            base_url,
            headers,
        }
    }

    /// Build a GET request for a catalog path with the configured headers.
    fn build_request(&self, path: &str) -> RequestBuilder {
        let url = format!("{}/{}", self.base_url.trim_end_matches('/'), path);

        let mut req = self.client.get(&url);
        for (k, v) in &self.headers {
            req = req.header(k.as_str(), v.as_str());
        }
        req
    }

    /// Fetch a catalog path. The backend serves each catalog as a JSON
    /// object keyed by record uuid.
    async fn fetch_catalog<T: DeserializeOwned>(&self, path: &str) -> Result<Vec<T>> {
        let resp = self.build_request(path).send().await?;

        let status = resp.status();
        debug!("catalog fetch path={} status={}", path, status.as_u16());
        if !status.is_success() {
            warn!("catalog fetch failed path={} status={}", path, status.as_u16());
            return Err(anyhow!("catalog fetch failed: HTTP {}", status.as_u16()));
        }

        let map = resp.json::<HashMap<String, T>>().await?;
        Ok(map.into_values().collect())
    }
}

#[async_trait]
impl ContentSource for HttpContentSource {
    async fn fetch_murals(&self) -> Result<Vec<Mural>> {
        let mut murals: Vec<Mural> = self.fetch_catalog("murals.json").await?;
        // Tour order is the wire index, not the map's key order.
        murals.sort_by_key(|m| m.index);
        Ok(murals)
    }

    async fn fetch_artists(&self) -> Result<Vec<Artist>> {
        let mut artists: Vec<Artist> = self.fetch_catalog("artists.json").await?;
        artists.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(artists)
    }
}

/// Downloads first-screen assets over HTTP.
pub struct HttpAssetStore {
    client: Client,
}

impl HttpAssetStore {
    pub fn new() -> Self {
        Self {
            client: Client::new(),
        }
    }
}

impl Default for HttpAssetStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl AssetStore for HttpAssetStore {
    async fn prefetch(&self, asset: &AssetHandle) -> Result<Bytes> {
        let resp = self.client.get(&asset.url).send().await?;

        let status = resp.status();
        if !status.is_success() {
            warn!(
                "asset prefetch failed name={} status={}",
                asset.name,
                status.as_u16()
            );
            return Err(anyhow!("asset prefetch failed: HTTP {}", status.as_u16()));
        }

        let data = resp.bytes().await?;
        debug!("asset prefetched name={} bytes={}", asset.name, data.len());
        Ok(data)
    }
}
