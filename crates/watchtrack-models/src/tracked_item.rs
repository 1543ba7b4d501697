use crate::media::MediaKind;
use crate::status::WatchStatus;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A user's persisted progress record for one movie or series. Owned by the
/// remote row store; local copies are caches with no authority.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TrackedItem {
    pub id: String,
    pub user_id: String,
    /// External catalog id this item was added from
    pub catalog_id: u64,
    pub title: String,
    pub poster_url: Option<String>,
    pub backdrop_url: Option<String>,
    pub media_kind: MediaKind,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub current_season: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub current_episode: Option<u32>,
    pub position_seconds: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_duration_seconds: Option<u64>,

    pub status: WatchStatus,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_watched_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rating: Option<f64>,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl TrackedItem {
    pub fn is_series(&self) -> bool {
        self.media_kind == MediaKind::Series
    }
}

/// Insert payload: everything the row store does not generate itself.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NewTrackedItem {
    pub user_id: String,
    pub catalog_id: u64,
    pub title: String,
    pub poster_url: Option<String>,
    pub backdrop_url: Option<String>,
    pub media_kind: MediaKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub current_season: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub current_episode: Option<u32>,
    pub position_seconds: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_duration_seconds: Option<u64>,
    pub status: WatchStatus,
}

impl NewTrackedItem {
    /// The insert payload a confirmed add produces: plan-to-watch at
    /// position 0, pointing at season 1 episode 1 for series.
    pub fn from_catalog(
        user_id: &str,
        item: &crate::catalog::CatalogItem,
        poster_url: String,
        backdrop_url: String,
    ) -> Self {
        let is_series = item.media_kind == MediaKind::Series;
        Self {
            user_id: user_id.to_string(),
            catalog_id: item.id,
            title: item.title.clone(),
            poster_url: Some(poster_url),
            backdrop_url: Some(backdrop_url),
            media_kind: item.media_kind,
            current_season: is_series.then_some(1),
            current_episode: is_series.then_some(1),
            position_seconds: 0,
            total_duration_seconds: item.duration_seconds(),
            status: WatchStatus::PlanToWatch,
        }
    }
}

/// Partial update. Absent fields are omitted from the wire and left
/// untouched by the store.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct TrackedItemPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<WatchStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub position_seconds: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_duration_seconds: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub current_season: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub current_episode: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_watched_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl TrackedItemPatch {
    pub fn is_empty(&self) -> bool {
        self == &TrackedItemPatch::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_patch_omits_absent_fields() {
        let patch = TrackedItemPatch {
            status: Some(WatchStatus::Watching),
            position_seconds: Some(90),
            ..TrackedItemPatch::default()
        };
        let json = serde_json::to_value(&patch).unwrap();
        let obj = json.as_object().unwrap();
        assert_eq!(obj.len(), 2);
        assert_eq!(obj["status"], "watching");
        assert_eq!(obj["position_seconds"], 90);
        assert!(!obj.contains_key("notes"));
        assert!(!obj.contains_key("updated_at"));
    }

    #[test]
    fn test_empty_patch() {
        assert!(TrackedItemPatch::default().is_empty());
        let patch = TrackedItemPatch {
            notes: Some("ep 4 was great".to_string()),
            ..TrackedItemPatch::default()
        };
        assert!(!patch.is_empty());
    }

    #[test]
    fn test_new_item_starts_as_plan_to_watch() {
        let catalog_item = |kind| crate::catalog::CatalogItem {
            id: 603,
            title: "The Matrix".to_string(),
            media_kind: kind,
            poster_path: Some("/p.jpg".to_string()),
            backdrop_path: None,
            overview: String::new(),
            release_date: None,
            vote_average: None,
            runtime_seconds: Some(8160),
            episode_runtime_seconds: Some(2700),
            seasons: None,
            episodes: None,
        };

        let movie = NewTrackedItem::from_catalog(
            "u1",
            &catalog_item(MediaKind::Movie),
            "p".to_string(),
            "b".to_string(),
        );
        assert_eq!(movie.status, WatchStatus::PlanToWatch);
        assert_eq!(movie.position_seconds, 0);
        assert_eq!(movie.current_season, None);
        assert_eq!(movie.total_duration_seconds, Some(8160));

        let series = NewTrackedItem::from_catalog(
            "u1",
            &catalog_item(MediaKind::Series),
            "p".to_string(),
            "b".to_string(),
        );
        assert_eq!(series.status, WatchStatus::PlanToWatch);
        assert_eq!(series.position_seconds, 0);
        assert_eq!(series.current_season, Some(1));
        assert_eq!(series.current_episode, Some(1));
        assert_eq!(series.total_duration_seconds, Some(2700));
    }

    #[test]
    fn test_tracked_item_round_trip() {
        let item = TrackedItem {
            id: "row-1".to_string(),
            user_id: "u1".to_string(),
            catalog_id: 603,
            title: "The Matrix".to_string(),
            poster_url: Some("https://img.example/p.jpg".to_string()),
            backdrop_url: None,
            media_kind: MediaKind::Movie,
            current_season: None,
            current_episode: None,
            position_seconds: 1200,
            total_duration_seconds: Some(8160),
            status: WatchStatus::Watching,
            last_watched_at: None,
            notes: None,
            rating: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };
        let json = serde_json::to_string(&item).unwrap();
        let back: TrackedItem = serde_json::from_str(&json).unwrap();
        assert_eq!(back, item);
    }
}
