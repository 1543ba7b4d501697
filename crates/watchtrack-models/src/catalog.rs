use crate::media::MediaKind;
use serde::{Deserialize, Serialize};

/// A normalized search/recommendation result from the metadata catalog.
/// Transient: never persisted, only the referenced fields are copied into a
/// tracked item at add time.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CatalogItem {
    pub id: u64,
    pub title: String,
    pub media_kind: MediaKind,
    pub poster_path: Option<String>,
    pub backdrop_path: Option<String>,
    pub overview: String,
    pub release_date: Option<String>,
    pub vote_average: Option<f64>,
    /// Movie runtime in seconds (the catalog reports minutes)
    pub runtime_seconds: Option<u64>,
    /// Series per-episode runtime in seconds
    pub episode_runtime_seconds: Option<u64>,
    pub seasons: Option<u32>,
    pub episodes: Option<u32>,
}

impl CatalogItem {
    /// Duration used to bound a tracked item's playback position: the full
    /// runtime for a movie, one episode's runtime for a series.
    pub fn duration_seconds(&self) -> Option<u64> {
        match self.media_kind {
            MediaKind::Movie => self.runtime_seconds,
            MediaKind::Series => self.episode_runtime_seconds,
        }
    }

    /// Release year, when the catalog reported a date.
    pub fn year(&self) -> Option<&str> {
        self.release_date.as_deref().and_then(|d| d.get(..4))
    }
}

/// Season/episode ceilings for a series, used to bound progress inputs.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct SeriesExtents {
    pub max_seasons: u32,
    pub max_episodes: u32,
}

impl SeriesExtents {
    /// Episode ceiling per season, averaged over the whole run.
    pub fn episodes_per_season(&self) -> u32 {
        if self.max_seasons == 0 {
            return self.max_episodes.max(1);
        }
        self.max_episodes.div_ceil(self.max_seasons).max(1)
    }
}

impl Default for SeriesExtents {
    fn default() -> Self {
        // Fallback ceilings when the catalog response is unusable
        Self {
            max_seasons: 10,
            max_episodes: 100,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(kind: MediaKind) -> CatalogItem {
        CatalogItem {
            id: 42,
            title: "Example".to_string(),
            media_kind: kind,
            poster_path: None,
            backdrop_path: None,
            overview: String::new(),
            release_date: Some("1999-03-31".to_string()),
            vote_average: Some(8.7),
            runtime_seconds: Some(8160),
            episode_runtime_seconds: Some(2700),
            seasons: Some(4),
            episodes: Some(50),
        }
    }

    #[test]
    fn test_duration_follows_media_kind() {
        assert_eq!(item(MediaKind::Movie).duration_seconds(), Some(8160));
        assert_eq!(item(MediaKind::Series).duration_seconds(), Some(2700));
    }

    #[test]
    fn test_year() {
        assert_eq!(item(MediaKind::Movie).year(), Some("1999"));
    }

    #[test]
    fn test_episodes_per_season_rounds_up() {
        let extents = SeriesExtents {
            max_seasons: 4,
            max_episodes: 50,
        };
        assert_eq!(extents.episodes_per_season(), 13);
    }

    #[test]
    fn test_extents_default() {
        let extents = SeriesExtents::default();
        assert_eq!(extents.max_seasons, 10);
        assert_eq!(extents.max_episodes, 100);
    }
}
