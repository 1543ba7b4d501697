use super::api;
use rand::seq::SliceRandom;
use reqwest::Client;
use tracing::warn;
use watchtrack_config::CatalogConfig;
use watchtrack_models::{CatalogItem, MediaKind, SeriesExtents};

/// Shown when the catalog has no artwork for an item.
const PLACEHOLDER_IMAGE: &str =
    "https://via.placeholder.com/500x750/1a1a1a/666666?text=No+Image";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrendWindow {
    Day,
    Week,
}

impl TrendWindow {
    fn as_str(&self) -> &'static str {
        match self {
            TrendWindow::Day => "day",
            TrendWindow::Week => "week",
        }
    }
}

/// Wrapper over the metadata catalog. Every remote failure is logged and
/// degraded to an empty/`None` return; callers never see an error.
#[derive(Clone)]
pub struct CatalogClient {
    client: Client,
    base_url: String,
    image_base_url: String,
    api_key: String,
}

impl CatalogClient {
    pub fn new(config: &CatalogConfig) -> Self {
        Self {
            client: Client::new(),
            base_url: config.base_url.trim_end_matches('/').to_string(),
            image_base_url: config.image_base_url.trim_end_matches('/').to_string(),
            api_key: config.api_key.clone(),
        }
    }

    fn ready(&self) -> bool {
        if self.api_key.is_empty() {
            warn!("Catalog API key is not configured");
            return false;
        }
        true
    }

    /// Multi-type search across movies and series.
    pub async fn search(&self, query: &str) -> Vec<CatalogItem> {
        if !self.ready() {
            return Vec::new();
        }
        match api::search_multi(&self.client, &self.base_url, &self.api_key, query).await {
            Ok(items) => items,
            Err(e) => {
                warn!("Catalog search failed: {}", e);
                Vec::new()
            }
        }
    }

    pub async fn search_kind(&self, kind: MediaKind, query: &str) -> Vec<CatalogItem> {
        if !self.ready() {
            return Vec::new();
        }
        match api::search_kind(&self.client, &self.base_url, &self.api_key, kind, query).await {
            Ok(items) => items,
            Err(e) => {
                warn!("Catalog {} search failed: {}", kind, e);
                Vec::new()
            }
        }
    }

    pub async fn trending(&self, window: TrendWindow, limit: usize) -> Vec<CatalogItem> {
        if !self.ready() {
            return Vec::new();
        }
        match api::trending(&self.client, &self.base_url, &self.api_key, window.as_str()).await {
            Ok(mut items) => {
                items.truncate(limit);
                items
            }
            Err(e) => {
                warn!("Catalog trending fetch failed: {}", e);
                Vec::new()
            }
        }
    }

    /// Popular movies and series, half of each, shuffled into one sampled
    /// recommendation set.
    pub async fn recommendations(&self, limit: usize) -> Vec<CatalogItem> {
        if !self.ready() {
            return Vec::new();
        }

        let half = limit / 2;
        let mut combined = Vec::with_capacity(limit);

        match api::popular(&self.client, &self.base_url, &self.api_key, MediaKind::Movie).await {
            Ok(mut movies) => {
                movies.truncate(half);
                combined.extend(movies);
            }
            Err(e) => warn!("Popular movies fetch failed: {}", e),
        }
        match api::popular(&self.client, &self.base_url, &self.api_key, MediaKind::Series).await {
            Ok(mut series) => {
                series.truncate(half);
                combined.extend(series);
            }
            Err(e) => warn!("Popular series fetch failed: {}", e),
        }

        combined.shuffle(&mut rand::thread_rng());
        combined.truncate(limit);
        combined
    }

    pub async fn movie(&self, catalog_id: u64) -> Option<CatalogItem> {
        self.details(MediaKind::Movie, catalog_id).await
    }

    pub async fn series(&self, catalog_id: u64) -> Option<CatalogItem> {
        self.details(MediaKind::Series, catalog_id).await
    }

    async fn details(&self, kind: MediaKind, catalog_id: u64) -> Option<CatalogItem> {
        if !self.ready() {
            return None;
        }
        match api::details(&self.client, &self.base_url, &self.api_key, kind, catalog_id).await {
            Ok(item) => Some(item),
            Err(e) => {
                warn!("Catalog {} detail fetch failed for {}: {}", kind, catalog_id, e);
                None
            }
        }
    }

    /// Detail fetch when the kind may be unknown: probed movie first, then
    /// series.
    pub async fn item(&self, catalog_id: u64, kind: Option<MediaKind>) -> Option<CatalogItem> {
        match kind {
            Some(k) => self.details(k, catalog_id).await,
            None => {
                if let Some(movie) = self.details(MediaKind::Movie, catalog_id).await {
                    return Some(movie);
                }
                self.details(MediaKind::Series, catalog_id).await
            }
        }
    }

    /// Duration used to bound progress input: full runtime for a movie, one
    /// episode's runtime for a series.
    pub async fn duration_seconds(&self, catalog_id: u64, kind: MediaKind) -> Option<u64> {
        self.item(catalog_id, Some(kind))
            .await
            .and_then(|item| item.duration_seconds())
    }

    /// Season/episode ceilings for a series. Falls back to the default
    /// extents when the catalog call fails.
    pub async fn series_extents(&self, catalog_id: u64) -> SeriesExtents {
        if !self.ready() {
            return SeriesExtents::default();
        }
        match api::series_extents(&self.client, &self.base_url, &self.api_key, catalog_id).await {
            Ok(extents) => extents,
            Err(e) => {
                warn!("Catalog extents fetch failed for {}: {}", catalog_id, e);
                SeriesExtents::default()
            }
        }
    }

    /// Absolute artwork URL, with a placeholder for missing paths.
    pub fn image_url(&self, path: Option<&str>) -> String {
        match path {
            Some(p) if !p.is_empty() => format!("{}{}", self.image_base_url, p),
            _ => PLACEHOLDER_IMAGE.to_string(),
        }
    }
}
