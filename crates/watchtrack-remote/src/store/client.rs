use super::api;
use chrono::Utc;
use reqwest::Client;
use tracing::warn;
use watchtrack_config::BackendConfig;
use watchtrack_models::{NewTrackedItem, Session, TrackedItem, TrackedItemPatch};

/// CRUD wrapper over the remote row store. Requests are scoped to the
/// signed-in user by the session's bearer token; the store enforces row
/// ownership. Errors are logged and degraded, so callers cannot distinguish
/// "not found" from a transient failure.
#[derive(Clone)]
pub struct StoreClient {
    client: Client,
    base_url: String,
    publishable_key: String,
}

impl StoreClient {
    pub fn new(config: &BackendConfig) -> Self {
        Self {
            client: Client::new(),
            base_url: config.project_url.trim_end_matches('/').to_string(),
            publishable_key: config.publishable_key.clone(),
        }
    }

    /// The user's full tracked list, most recently watched first,
    /// never-watched rows last.
    pub async fn list(&self, session: &Session) -> Vec<TrackedItem> {
        match api::list(
            &self.client,
            &self.base_url,
            &self.publishable_key,
            &session.access_token,
        )
        .await
        {
            Ok(items) => items,
            Err(e) => {
                warn!("Error fetching tracked items: {}", e);
                Vec::new()
            }
        }
    }

    pub async fn insert(&self, session: &Session, item: &NewTrackedItem) -> Option<TrackedItem> {
        match api::insert(
            &self.client,
            &self.base_url,
            &self.publishable_key,
            &session.access_token,
            item,
        )
        .await
        {
            Ok(created) => Some(created),
            Err(e) => {
                warn!("Error adding tracked item: {}", e);
                None
            }
        }
    }

    /// Apply a partial update, stamping `updated_at` before it goes out.
    pub async fn update(
        &self,
        session: &Session,
        id: &str,
        patch: &TrackedItemPatch,
    ) -> Option<TrackedItem> {
        let mut patch = patch.clone();
        patch.updated_at = Some(Utc::now());

        match api::update(
            &self.client,
            &self.base_url,
            &self.publishable_key,
            &session.access_token,
            id,
            &patch,
        )
        .await
        {
            Ok(updated) => Some(updated),
            Err(e) => {
                warn!("Error updating tracked item {}: {}", id, e);
                None
            }
        }
    }

    pub async fn delete(&self, session: &Session, id: &str) -> bool {
        match api::delete(
            &self.client,
            &self.base_url,
            &self.publishable_key,
            &session.access_token,
            id,
        )
        .await
        {
            Ok(()) => true,
            Err(e) => {
                warn!("Error deleting tracked item {}: {}", id, e);
                false
            }
        }
    }

    pub async fn get(&self, session: &Session, id: &str) -> Option<TrackedItem> {
        match api::get(
            &self.client,
            &self.base_url,
            &self.publishable_key,
            &session.access_token,
            id,
        )
        .await
        {
            Ok(item) => item,
            Err(e) => {
                warn!("Error fetching tracked item {}: {}", id, e);
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use serde_json::json;
    use watchtrack_models::{MediaKind, User, WatchStatus};
    use wiremock::matchers::{body_partial_json, header, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn test_session() -> Session {
        Session {
            access_token: "jwt-token".to_string(),
            refresh_token: "refresh".to_string(),
            expires_at: Utc::now() + chrono::Duration::hours(1),
            user: User {
                id: "u1".to_string(),
                email: "a@b.c".to_string(),
                created_at: Utc::now(),
            },
        }
    }

    fn test_client(server: &MockServer) -> StoreClient {
        StoreClient::new(&BackendConfig {
            project_url: server.uri(),
            publishable_key: "anon".to_string(),
        })
    }

    fn row_json(id: &str) -> serde_json::Value {
        json!({
            "id": id,
            "user_id": "u1",
            "catalog_id": 603,
            "title": "The Matrix",
            "poster_url": null,
            "backdrop_url": null,
            "media_kind": "movie",
            "position_seconds": 0,
            "status": "plan-to-watch",
            "created_at": "2026-08-01T12:00:00Z",
            "updated_at": "2026-08-01T12:00:00Z"
        })
    }

    #[tokio::test]
    async fn test_list_sends_order_and_auth() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/rest/v1/tracked_items"))
            .and(query_param(
                "order",
                "last_watched_at.desc.nullslast,created_at.desc",
            ))
            .and(header("apikey", "anon"))
            .and(header("Authorization", "Bearer jwt-token"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([row_json("row-1")])))
            .mount(&server)
            .await;

        let items = test_client(&server).list(&test_session()).await;
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].id, "row-1");
        assert_eq!(items[0].status, WatchStatus::PlanToWatch);
        assert_eq!(items[0].media_kind, MediaKind::Movie);
    }

    #[tokio::test]
    async fn test_list_degrades_to_empty_on_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/rest/v1/tracked_items"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let items = test_client(&server).list(&test_session()).await;
        assert!(items.is_empty());
    }

    #[tokio::test]
    async fn test_insert_returns_representation() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/rest/v1/tracked_items"))
            .and(header("Prefer", "return=representation"))
            .respond_with(ResponseTemplate::new(201).set_body_json(json!([row_json("row-2")])))
            .mount(&server)
            .await;

        let new_item = NewTrackedItem {
            user_id: "u1".to_string(),
            catalog_id: 603,
            title: "The Matrix".to_string(),
            poster_url: None,
            backdrop_url: None,
            media_kind: MediaKind::Movie,
            current_season: None,
            current_episode: None,
            position_seconds: 0,
            total_duration_seconds: Some(8160),
            status: WatchStatus::PlanToWatch,
        };
        let created = test_client(&server)
            .insert(&test_session(), &new_item)
            .await
            .unwrap();
        assert_eq!(created.id, "row-2");
        assert_eq!(created.position_seconds, 0);
    }

    #[tokio::test]
    async fn test_update_stamps_updated_at() {
        let server = MockServer::start().await;
        // The patch body must carry an updated_at stamp alongside the change
        Mock::given(method("PATCH"))
            .and(path("/rest/v1/tracked_items"))
            .and(query_param("id", "eq.row-1"))
            .and(body_partial_json(json!({ "status": "watching" })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([row_json("row-1")])))
            .mount(&server)
            .await;

        let patch = TrackedItemPatch {
            status: Some(WatchStatus::Watching),
            ..TrackedItemPatch::default()
        };
        let updated = test_client(&server)
            .update(&test_session(), "row-1", &patch)
            .await;
        assert!(updated.is_some());

        let requests = server.received_requests().await.unwrap();
        let body: serde_json::Value = serde_json::from_slice(&requests[0].body).unwrap();
        assert!(body.get("updated_at").is_some());
    }

    #[tokio::test]
    async fn test_delete() {
        let server = MockServer::start().await;
        Mock::given(method("DELETE"))
            .and(path("/rest/v1/tracked_items"))
            .and(query_param("id", "eq.row-1"))
            .respond_with(ResponseTemplate::new(204))
            .mount(&server)
            .await;

        assert!(test_client(&server).delete(&test_session(), "row-1").await);
        assert!(!test_client(&server).delete(&test_session(), "missing").await);
    }

    #[tokio::test]
    async fn test_get_missing_row_is_none() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/rest/v1/tracked_items"))
            .and(query_param("id", "eq.gone"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
            .mount(&server)
            .await;

        let item = test_client(&server).get(&test_session(), "gone").await;
        assert!(item.is_none());
    }
}
