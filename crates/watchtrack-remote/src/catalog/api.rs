use anyhow::{anyhow, Result};
use reqwest::Client;
use serde::Deserialize;
use watchtrack_models::{CatalogItem, MediaKind, SeriesExtents};

/// Raw catalog record as either the search or the detail endpoints return
/// it. Movies carry `title`/`release_date`/`runtime`; series carry
/// `name`/`first_air_date`/`episode_run_time`.
#[derive(Debug, Deserialize)]
struct RawItem {
    id: u64,
    title: Option<String>,
    name: Option<String>,
    media_type: Option<String>,
    poster_path: Option<String>,
    backdrop_path: Option<String>,
    overview: Option<String>,
    release_date: Option<String>,
    first_air_date: Option<String>,
    vote_average: Option<f64>,
    /// Movie runtime in minutes
    runtime: Option<u64>,
    /// Series episode runtimes in minutes, usually one entry
    episode_run_time: Option<Vec<u64>>,
    number_of_seasons: Option<u32>,
    number_of_episodes: Option<u32>,
    seasons: Option<Vec<RawSeason>>,
}

#[derive(Debug, Deserialize)]
struct RawSeason {
    episode_count: Option<u32>,
}

#[derive(Debug, Deserialize)]
struct PageResponse {
    results: Vec<RawItem>,
}

fn normalize(raw: RawItem, kind: MediaKind) -> CatalogItem {
    let title = match kind {
        MediaKind::Movie => raw.title,
        MediaKind::Series => raw.name,
    }
    .unwrap_or_else(|| "Unknown".to_string());

    let release_date = match kind {
        MediaKind::Movie => raw.release_date,
        MediaKind::Series => raw.first_air_date,
    };

    CatalogItem {
        id: raw.id,
        title,
        media_kind: kind,
        poster_path: raw.poster_path,
        backdrop_path: raw.backdrop_path,
        overview: raw.overview.unwrap_or_default(),
        release_date,
        vote_average: raw.vote_average,
        runtime_seconds: raw.runtime.map(|m| m * 60),
        episode_runtime_seconds: raw
            .episode_run_time
            .and_then(|runtimes| runtimes.first().copied())
            .map(|m| m * 60),
        seasons: raw.number_of_seasons,
        episodes: raw.number_of_episodes,
    }
}

/// Keep only movie/series results; the multi endpoint also returns people.
fn normalize_mixed(raws: Vec<RawItem>) -> Vec<CatalogItem> {
    raws.into_iter()
        .filter_map(|raw| match raw.media_type.as_deref() {
            Some("movie") => Some(normalize(raw, MediaKind::Movie)),
            Some("tv") => Some(normalize(raw, MediaKind::Series)),
            _ => None,
        })
        .collect()
}

async fn fetch_page(client: &Client, url: &str) -> Result<PageResponse> {
    let response = client.get(url).send().await?;

    if !response.status().is_success() {
        let status = response.status();
        let error_text = response.text().await.unwrap_or_default();
        return Err(anyhow!("Catalog request failed: {} - {}", status, error_text));
    }

    Ok(response.json().await?)
}

pub async fn search_multi(
    client: &Client,
    base_url: &str,
    api_key: &str,
    query: &str,
) -> Result<Vec<CatalogItem>> {
    let url = format!(
        "{}/search/multi?api_key={}&query={}&page=1&include_adult=false",
        base_url,
        api_key,
        urlencoding::encode(query)
    );
    let page = fetch_page(client, &url).await?;
    Ok(normalize_mixed(page.results))
}

pub async fn search_kind(
    client: &Client,
    base_url: &str,
    api_key: &str,
    kind: MediaKind,
    query: &str,
) -> Result<Vec<CatalogItem>> {
    let path = match kind {
        MediaKind::Movie => "movie",
        MediaKind::Series => "tv",
    };
    let url = format!(
        "{}/search/{}?api_key={}&query={}&page=1",
        base_url,
        path,
        api_key,
        urlencoding::encode(query)
    );
    let page = fetch_page(client, &url).await?;
    Ok(page.results.into_iter().map(|raw| normalize(raw, kind)).collect())
}

pub async fn popular(
    client: &Client,
    base_url: &str,
    api_key: &str,
    kind: MediaKind,
) -> Result<Vec<CatalogItem>> {
    let path = match kind {
        MediaKind::Movie => "movie",
        MediaKind::Series => "tv",
    };
    let url = format!("{}/{}/popular?api_key={}&page=1", base_url, path, api_key);
    let page = fetch_page(client, &url).await?;
    Ok(page.results.into_iter().map(|raw| normalize(raw, kind)).collect())
}

pub async fn trending(
    client: &Client,
    base_url: &str,
    api_key: &str,
    window: &str,
) -> Result<Vec<CatalogItem>> {
    let url = format!("{}/trending/all/{}?api_key={}", base_url, window, api_key);
    let page = fetch_page(client, &url).await?;
    Ok(normalize_mixed(page.results))
}

pub async fn details(
    client: &Client,
    base_url: &str,
    api_key: &str,
    kind: MediaKind,
    catalog_id: u64,
) -> Result<CatalogItem> {
    let path = match kind {
        MediaKind::Movie => "movie",
        MediaKind::Series => "tv",
    };
    let url = format!("{}/{}/{}?api_key={}", base_url, path, catalog_id, api_key);

    let response = client.get(&url).send().await?;
    if !response.status().is_success() {
        let status = response.status();
        let error_text = response.text().await.unwrap_or_default();
        return Err(anyhow!("Catalog detail fetch failed: {} - {}", status, error_text));
    }

    let raw: RawItem = response.json().await?;
    Ok(normalize(raw, kind))
}

/// Season ceiling and aggregate episode count for a series, summed over the
/// per-season counts the detail endpoint reports.
pub async fn series_extents(
    client: &Client,
    base_url: &str,
    api_key: &str,
    catalog_id: u64,
) -> Result<SeriesExtents> {
    let url = format!("{}/tv/{}?api_key={}", base_url, catalog_id, api_key);

    let response = client.get(&url).send().await?;
    if !response.status().is_success() {
        let status = response.status();
        let error_text = response.text().await.unwrap_or_default();
        return Err(anyhow!("Catalog series fetch failed: {} - {}", status, error_text));
    }

    let raw: RawItem = response.json().await?;
    let total_episodes: u32 = raw
        .seasons
        .unwrap_or_default()
        .iter()
        .map(|season| season.episode_count.unwrap_or(0))
        .sum();

    let fallback = SeriesExtents::default();
    Ok(SeriesExtents {
        max_seasons: raw.number_of_seasons.filter(|&n| n > 0).unwrap_or(fallback.max_seasons),
        max_episodes: if total_episodes > 0 {
            total_episodes
        } else {
            fallback.max_episodes
        },
    })
}
