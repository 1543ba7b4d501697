use chrono::{DateTime, Utc};
use parking_lot::RwLock;
use std::sync::Arc;
use tracing::debug;
use watchtrack_models::{CatalogItem, TrackedItem, TrackedItemPatch, User};

/// Process-wide client state: the current user, the tracked-item list, and
/// transient search state. The list is a cache with no authority: it is
/// overwritten wholesale on each fetch and patched optimistically on
/// individual mutations.
#[derive(Debug, Default)]
struct AppState {
    user: Option<User>,
    items: Vec<TrackedItem>,
    search_query: String,
    search_results: Vec<CatalogItem>,
    selected: Option<TrackedItem>,
}

/// Cheaply clonable handle to the shared state.
#[derive(Clone, Default)]
pub struct StateHandle {
    inner: Arc<RwLock<AppState>>,
}

impl StateHandle {
    pub fn new() -> Self {
        Self::default()
    }

    // User

    pub fn set_user(&self, user: User) {
        self.inner.write().user = Some(user);
    }

    pub fn clear_user(&self) {
        let mut state = self.inner.write();
        state.user = None;
        state.items.clear();
        state.selected = None;
    }

    pub fn user(&self) -> Option<User> {
        self.inner.read().user.clone()
    }

    // Tracked items

    /// Replace the whole cached list with a fresh fetch.
    pub fn replace_items(&self, items: Vec<TrackedItem>) {
        debug!("Replacing cached list with {} items", items.len());
        self.inner.write().items = items;
    }

    pub fn items(&self) -> Vec<TrackedItem> {
        self.inner.read().items.clone()
    }

    pub fn item(&self, id: &str) -> Option<TrackedItem> {
        self.inner.read().items.iter().find(|i| i.id == id).cloned()
    }

    pub fn insert_item(&self, item: TrackedItem) {
        self.inner.write().items.push(item);
    }

    /// Optimistically apply a patch to the cached copy, refreshing its
    /// update stamp the way the store would.
    pub fn patch_item(&self, id: &str, patch: &TrackedItemPatch, now: DateTime<Utc>) {
        let mut state = self.inner.write();
        if let Some(item) = state.items.iter_mut().find(|i| i.id == id) {
            apply_patch(item, patch, now);
        }
        if let Some(selected) = state.selected.as_mut() {
            if selected.id == id {
                apply_patch(selected, patch, now);
            }
        }
    }

    /// Swap in the store's authoritative row after a successful update.
    pub fn refresh_item(&self, updated: TrackedItem) {
        let mut state = self.inner.write();
        if let Some(item) = state.items.iter_mut().find(|i| i.id == updated.id) {
            *item = updated.clone();
        }
        if let Some(selected) = state.selected.as_mut() {
            if selected.id == updated.id {
                *selected = updated;
            }
        }
    }

    pub fn remove_item(&self, id: &str) {
        let mut state = self.inner.write();
        state.items.retain(|i| i.id != id);
        if state.selected.as_ref().is_some_and(|s| s.id == id) {
            state.selected = None;
        }
    }

    // Search

    pub fn set_search_query(&self, query: &str) {
        self.inner.write().search_query = query.to_string();
    }

    pub fn search_query(&self) -> String {
        self.inner.read().search_query.clone()
    }

    pub fn set_search_results(&self, results: Vec<CatalogItem>) {
        self.inner.write().search_results = results;
    }

    pub fn search_results(&self) -> Vec<CatalogItem> {
        self.inner.read().search_results.clone()
    }

    // Selection

    pub fn select_item(&self, item: Option<TrackedItem>) {
        self.inner.write().selected = item;
    }

    pub fn selected_item(&self) -> Option<TrackedItem> {
        self.inner.read().selected.clone()
    }
}

fn apply_patch(item: &mut TrackedItem, patch: &TrackedItemPatch, now: DateTime<Utc>) {
    if let Some(status) = patch.status {
        item.status = status;
    }
    if let Some(position) = patch.position_seconds {
        item.position_seconds = position;
    }
    if let Some(total) = patch.total_duration_seconds {
        item.total_duration_seconds = Some(total);
    }
    if let Some(season) = patch.current_season {
        item.current_season = Some(season);
    }
    if let Some(episode) = patch.current_episode {
        item.current_episode = Some(episode);
    }
    if let Some(notes) = &patch.notes {
        item.notes = Some(notes.clone());
    }
    if let Some(last_watched) = patch.last_watched_at {
        item.last_watched_at = Some(last_watched);
    }
    item.updated_at = patch.updated_at.unwrap_or(now);
}

#[cfg(test)]
mod tests {
    use super::*;
    use watchtrack_models::{MediaKind, WatchStatus};

    fn item(id: &str) -> TrackedItem {
        TrackedItem {
            id: id.to_string(),
            user_id: "u1".to_string(),
            catalog_id: 603,
            title: "The Matrix".to_string(),
            poster_url: None,
            backdrop_url: None,
            media_kind: MediaKind::Movie,
            current_season: None,
            current_episode: None,
            position_seconds: 0,
            total_duration_seconds: None,
            status: WatchStatus::PlanToWatch,
            last_watched_at: None,
            notes: None,
            rating: None,
            created_at: Utc::now(),
            updated_at: Utc::now() - chrono::Duration::days(1),
        }
    }

    #[test]
    fn test_replace_is_wholesale() {
        let state = StateHandle::new();
        state.replace_items(vec![item("a"), item("b")]);
        assert_eq!(state.items().len(), 2);

        state.replace_items(vec![item("c")]);
        let items = state.items();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].id, "c");
    }

    #[test]
    fn test_patch_item_refreshes_update_stamp() {
        let state = StateHandle::new();
        state.replace_items(vec![item("a")]);

        let now = Utc::now();
        let patch = TrackedItemPatch {
            status: Some(WatchStatus::Watching),
            position_seconds: Some(90),
            ..TrackedItemPatch::default()
        };
        state.patch_item("a", &patch, now);

        let cached = state.item("a").unwrap();
        assert_eq!(cached.status, WatchStatus::Watching);
        assert_eq!(cached.position_seconds, 90);
        assert_eq!(cached.updated_at, now);
        // Untouched fields survive
        assert_eq!(cached.title, "The Matrix");
    }

    #[test]
    fn test_remove_item_clears_selection() {
        let state = StateHandle::new();
        let a = item("a");
        state.replace_items(vec![a.clone(), item("b")]);
        state.select_item(Some(a));

        state.remove_item("a");
        assert!(state.item("a").is_none());
        assert!(state.selected_item().is_none());
        assert_eq!(state.items().len(), 1);
    }

    #[test]
    fn test_clear_user_drops_cached_data() {
        let state = StateHandle::new();
        state.set_user(User {
            id: "u1".to_string(),
            email: "a@b.c".to_string(),
            created_at: Utc::now(),
        });
        state.replace_items(vec![item("a")]);

        state.clear_user();
        assert!(state.user().is_none());
        assert!(state.items().is_empty());
    }
}
