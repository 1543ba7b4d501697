use anyhow::{anyhow, Result};
use reqwest::Client;
use watchtrack_models::{NewTrackedItem, TrackedItem, TrackedItemPatch};

/// Collection name in the row store.
const TABLE: &str = "tracked_items";

/// List order: most recently watched first, never-watched rows last within
/// their creation order.
const LIST_ORDER: &str = "last_watched_at.desc.nullslast,created_at.desc";

fn table_url(base_url: &str) -> String {
    format!("{}/rest/v1/{}", base_url, TABLE)
}

fn row_url(base_url: &str, id: &str) -> String {
    format!("{}?id=eq.{}", table_url(base_url), urlencoding::encode(id))
}

async fn check(response: reqwest::Response, what: &str) -> Result<reqwest::Response> {
    if !response.status().is_success() {
        let status = response.status();
        let error_text = response.text().await.unwrap_or_default();
        return Err(anyhow!("Failed to {}: {} - {}", what, status, error_text));
    }
    Ok(response)
}

pub async fn list(
    client: &Client,
    base_url: &str,
    publishable_key: &str,
    access_token: &str,
) -> Result<Vec<TrackedItem>> {
    let url = format!("{}?select=*&order={}", table_url(base_url), LIST_ORDER);

    let response = client
        .get(&url)
        .header("apikey", publishable_key)
        .header("Authorization", format!("Bearer {}", access_token))
        .send()
        .await?;

    let response = check(response, "list tracked items").await?;
    Ok(response.json().await?)
}

pub async fn insert(
    client: &Client,
    base_url: &str,
    publishable_key: &str,
    access_token: &str,
    item: &NewTrackedItem,
) -> Result<TrackedItem> {
    let response = client
        .post(table_url(base_url))
        .header("apikey", publishable_key)
        .header("Authorization", format!("Bearer {}", access_token))
        .header("Prefer", "return=representation")
        .json(&[item])
        .send()
        .await?;

    let response = check(response, "insert tracked item").await?;
    let mut rows: Vec<TrackedItem> = response.json().await?;
    rows.pop()
        .ok_or_else(|| anyhow!("Insert returned no representation"))
}

pub async fn update(
    client: &Client,
    base_url: &str,
    publishable_key: &str,
    access_token: &str,
    id: &str,
    patch: &TrackedItemPatch,
) -> Result<TrackedItem> {
    let response = client
        .patch(row_url(base_url, id))
        .header("apikey", publishable_key)
        .header("Authorization", format!("Bearer {}", access_token))
        .header("Prefer", "return=representation")
        .json(patch)
        .send()
        .await?;

    let response = check(response, "update tracked item").await?;
    let mut rows: Vec<TrackedItem> = response.json().await?;
    rows.pop()
        .ok_or_else(|| anyhow!("Update matched no row: {}", id))
}

pub async fn delete(
    client: &Client,
    base_url: &str,
    publishable_key: &str,
    access_token: &str,
    id: &str,
) -> Result<()> {
    let response = client
        .delete(row_url(base_url, id))
        .header("apikey", publishable_key)
        .header("Authorization", format!("Bearer {}", access_token))
        .send()
        .await?;

    check(response, "delete tracked item").await?;
    Ok(())
}

pub async fn get(
    client: &Client,
    base_url: &str,
    publishable_key: &str,
    access_token: &str,
    id: &str,
) -> Result<Option<TrackedItem>> {
    let url = format!("{}&select=*", row_url(base_url, id));

    let response = client
        .get(&url)
        .header("apikey", publishable_key)
        .header("Authorization", format!("Bearer {}", access_token))
        .send()
        .await?;

    let response = check(response, "fetch tracked item").await?;
    let mut rows: Vec<TrackedItem> = response.json().await?;
    Ok(rows.pop())
}
