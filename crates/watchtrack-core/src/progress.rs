use crate::clock::{completion_percent, compose_clock, split_clock};
use chrono::{DateTime, Utc};
use watchtrack_models::{SeriesExtents, TrackedItem, TrackedItemPatch, WatchStatus};

/// Ceiling on the hours field when set component-wise.
const MAX_HOURS: u64 = 99;
/// Notes are capped at what the detail form accepts.
const MAX_NOTES_CHARS: usize = 500;
/// Slider ceiling when the item has no known duration (2 hours).
const DEFAULT_SLIDER_MAX: u64 = 7200;

/// Edits one tracked item's progress before a save. The playback position
/// is a single integer; the hour/minute/second fields and the slider are
/// derived views of it, never independent state. The position is kept
/// inside [0, total duration] whenever the duration is known.
#[derive(Debug, Clone)]
pub struct ProgressEditor {
    item_id: String,
    series: bool,
    position_seconds: u64,
    total_duration_seconds: Option<u64>,
    status: WatchStatus,
    season: u32,
    episode: u32,
    extents: SeriesExtents,
    notes: String,
}

impl ProgressEditor {
    pub fn new(item: &TrackedItem, extents: SeriesExtents) -> Self {
        let mut editor = Self {
            item_id: item.id.clone(),
            series: item.is_series(),
            position_seconds: 0,
            total_duration_seconds: item.total_duration_seconds,
            status: item.status,
            season: item.current_season.unwrap_or(1),
            episode: item.current_episode.unwrap_or(1),
            extents,
            notes: item.notes.clone().unwrap_or_default(),
        };
        editor.set_position(item.position_seconds);
        editor
    }

    pub fn item_id(&self) -> &str {
        &self.item_id
    }

    // Position: one source of truth, three views

    pub fn position_seconds(&self) -> u64 {
        self.position_seconds
    }

    /// Derived hour/minute/second view of the position.
    pub fn clock(&self) -> (u64, u64, u64) {
        split_clock(self.position_seconds)
    }

    pub fn percent(&self) -> u8 {
        completion_percent(self.position_seconds, self.total_duration_seconds)
    }

    pub fn total_duration_seconds(&self) -> Option<u64> {
        self.total_duration_seconds
    }

    /// Slider ceiling: the known duration, or a two-hour default.
    pub fn slider_max(&self) -> u64 {
        self.total_duration_seconds.unwrap_or(DEFAULT_SLIDER_MAX)
    }

    pub fn set_position(&mut self, seconds: u64) {
        self.position_seconds = match self.total_duration_seconds {
            Some(total) => seconds.min(total),
            None => seconds,
        };
    }

    pub fn set_hours(&mut self, hours: u64) {
        let (_, m, s) = self.clock();
        self.set_position(compose_clock(hours.min(MAX_HOURS), m, s));
    }

    pub fn set_minutes(&mut self, minutes: u64) {
        let (h, _, s) = self.clock();
        self.set_position(compose_clock(h, minutes.min(59), s));
    }

    pub fn set_seconds(&mut self, seconds: u64) {
        let (h, m, _) = self.clock();
        self.set_position(compose_clock(h, m, seconds.min(59)));
    }

    /// Quick ±N-second adjustment, saturating at zero.
    pub fn nudge(&mut self, delta_seconds: i64) {
        let next = if delta_seconds < 0 {
            self.position_seconds
                .saturating_sub(delta_seconds.unsigned_abs())
        } else {
            self.position_seconds.saturating_add(delta_seconds as u64)
        };
        self.set_position(next);
    }

    // Status

    pub fn status(&self) -> WatchStatus {
        self.status
    }

    pub fn set_status(&mut self, status: WatchStatus) {
        self.status = status;
    }

    /// Advance to the next status in the cycle.
    pub fn cycle_status(&mut self) {
        self.status = self.status.next();
    }

    // Season/episode, bounded by the catalog-reported extents

    pub fn season(&self) -> u32 {
        self.season
    }

    pub fn episode(&self) -> u32 {
        self.episode
    }

    pub fn extents(&self) -> SeriesExtents {
        self.extents
    }

    pub fn set_season(&mut self, season: u32) {
        self.season = season.clamp(1, self.extents.max_seasons.max(1));
    }

    pub fn set_episode(&mut self, episode: u32) {
        self.episode = episode.clamp(1, self.extents.episodes_per_season());
    }

    // Notes

    pub fn notes(&self) -> &str {
        &self.notes
    }

    pub fn set_notes(&mut self, notes: &str) {
        self.notes = notes.chars().take(MAX_NOTES_CHARS).collect();
    }

    /// The patch a save sends: status, position, notes, last-watched stamp,
    /// and the season/episode pair for series.
    pub fn build_patch(&self, now: DateTime<Utc>) -> TrackedItemPatch {
        TrackedItemPatch {
            status: Some(self.status),
            position_seconds: Some(self.position_seconds),
            notes: Some(self.notes.clone()),
            last_watched_at: Some(now),
            current_season: self.series.then_some(self.season),
            current_episode: self.series.then_some(self.episode),
            ..TrackedItemPatch::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use watchtrack_models::MediaKind;

    fn movie_item(position: u64, total: Option<u64>) -> TrackedItem {
        TrackedItem {
            id: "row-1".to_string(),
            user_id: "u1".to_string(),
            catalog_id: 603,
            title: "The Matrix".to_string(),
            poster_url: None,
            backdrop_url: None,
            media_kind: MediaKind::Movie,
            current_season: None,
            current_episode: None,
            position_seconds: position,
            total_duration_seconds: total,
            status: WatchStatus::Watching,
            last_watched_at: None,
            notes: None,
            rating: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn series_item() -> TrackedItem {
        TrackedItem {
            media_kind: MediaKind::Series,
            current_season: Some(2),
            current_episode: Some(5),
            total_duration_seconds: Some(2700),
            ..movie_item(600, Some(2700))
        }
    }

    #[test]
    fn test_position_is_single_source_of_truth() {
        let mut editor = ProgressEditor::new(&movie_item(0, Some(8160)), SeriesExtents::default());

        editor.set_position(3661);
        assert_eq!(editor.clock(), (1, 1, 1));

        editor.set_minutes(30);
        assert_eq!(editor.position_seconds(), compose_clock(1, 30, 1));

        editor.set_hours(2);
        assert_eq!(editor.position_seconds(), compose_clock(2, 30, 1));

        editor.set_seconds(59);
        assert_eq!(editor.clock(), (2, 30, 59));
    }

    #[test]
    fn test_component_clamps() {
        let mut editor = ProgressEditor::new(&movie_item(0, None), SeriesExtents::default());
        editor.set_hours(250);
        assert_eq!(editor.clock().0, 99);
        editor.set_minutes(75);
        assert_eq!(editor.clock().1, 59);
        editor.set_seconds(99);
        assert_eq!(editor.clock().2, 59);
    }

    #[test]
    fn test_position_clamped_to_duration() {
        let mut editor = ProgressEditor::new(&movie_item(0, Some(100)), SeriesExtents::default());
        editor.set_position(500);
        assert_eq!(editor.position_seconds(), 100);
        assert_eq!(editor.percent(), 100);

        // Stored positions beyond the duration are clamped on load too
        let editor = ProgressEditor::new(&movie_item(9999, Some(100)), SeriesExtents::default());
        assert_eq!(editor.position_seconds(), 100);
    }

    #[test]
    fn test_nudge_saturates_at_zero() {
        let mut editor = ProgressEditor::new(&movie_item(20, Some(8160)), SeriesExtents::default());
        editor.nudge(-30);
        assert_eq!(editor.position_seconds(), 0);
        editor.nudge(60);
        assert_eq!(editor.position_seconds(), 60);
        editor.nudge(-30);
        assert_eq!(editor.position_seconds(), 30);
    }

    #[test]
    fn test_slider_max_falls_back_to_two_hours() {
        let editor = ProgressEditor::new(&movie_item(0, None), SeriesExtents::default());
        assert_eq!(editor.slider_max(), 7200);
        let editor = ProgressEditor::new(&movie_item(0, Some(8160)), SeriesExtents::default());
        assert_eq!(editor.slider_max(), 8160);
    }

    #[test]
    fn test_season_episode_bounded_by_extents() {
        let extents = SeriesExtents {
            max_seasons: 5,
            max_episodes: 62,
        };
        let mut editor = ProgressEditor::new(&series_item(), extents);
        assert_eq!(editor.season(), 2);
        assert_eq!(editor.episode(), 5);

        editor.set_season(9);
        assert_eq!(editor.season(), 5);
        editor.set_season(0);
        assert_eq!(editor.season(), 1);

        // 62 episodes over 5 seasons rounds up to 13 per season
        editor.set_episode(40);
        assert_eq!(editor.episode(), 13);
    }

    #[test]
    fn test_status_cycle() {
        let mut editor = ProgressEditor::new(&movie_item(0, None), SeriesExtents::default());
        assert_eq!(editor.status(), WatchStatus::Watching);
        editor.cycle_status();
        assert_eq!(editor.status(), WatchStatus::Completed);
        editor.cycle_status();
        editor.cycle_status();
        editor.cycle_status();
        assert_eq!(editor.status(), WatchStatus::Watching);
    }

    #[test]
    fn test_notes_capped() {
        let mut editor = ProgressEditor::new(&movie_item(0, None), SeriesExtents::default());
        let long = "x".repeat(600);
        editor.set_notes(&long);
        assert_eq!(editor.notes().chars().count(), 500);
    }

    #[test]
    fn test_build_patch_for_movie_omits_season() {
        let mut editor = ProgressEditor::new(&movie_item(0, Some(8160)), SeriesExtents::default());
        editor.set_position(1200);
        editor.set_status(WatchStatus::OnHold);
        let now = Utc::now();

        let patch = editor.build_patch(now);
        assert_eq!(patch.status, Some(WatchStatus::OnHold));
        assert_eq!(patch.position_seconds, Some(1200));
        assert_eq!(patch.last_watched_at, Some(now));
        assert_eq!(patch.current_season, None);
        assert_eq!(patch.current_episode, None);
    }

    #[test]
    fn test_build_patch_for_series_carries_season() {
        let editor = ProgressEditor::new(&series_item(), SeriesExtents::default());
        let patch = editor.build_patch(Utc::now());
        assert_eq!(patch.current_season, Some(2));
        assert_eq!(patch.current_episode, Some(5));
    }
}
