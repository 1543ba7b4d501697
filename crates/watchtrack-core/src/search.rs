use crate::state::StateHandle;
use tracing::debug;
use watchtrack_models::CatalogItem;

/// Identifies one dispatched search, so a slow earlier response cannot
/// overwrite a newer one's results.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchTicket(u64);

/// Mediates between typed queries and the shared search state.
/// Whitespace-only input never reaches the network: it clears the previous
/// results and yields no ticket.
pub struct SearchSession {
    state: StateHandle,
    next_ticket: u64,
    current: Option<SearchTicket>,
}

impl SearchSession {
    pub fn new(state: StateHandle) -> Self {
        Self {
            state,
            next_ticket: 0,
            current: None,
        }
    }

    /// Accept a query. Returns the normalized query and a ticket when a
    /// remote search should be issued, None when the input was blank.
    pub fn begin(&mut self, raw_query: &str) -> Option<(SearchTicket, String)> {
        let query = raw_query.trim();
        self.state.set_search_query(query);

        if query.is_empty() {
            self.state.set_search_results(Vec::new());
            self.current = None;
            return None;
        }

        self.next_ticket += 1;
        let ticket = SearchTicket(self.next_ticket);
        self.current = Some(ticket);
        Some((ticket, query.to_string()))
    }

    /// Apply results for a dispatched search. Stale tickets are dropped.
    pub fn complete(&mut self, ticket: SearchTicket, results: Vec<CatalogItem>) {
        if self.current != Some(ticket) {
            debug!("Dropping stale search results for ticket {:?}", ticket);
            return;
        }
        self.state.set_search_results(results);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use watchtrack_models::MediaKind;

    fn result(id: u64, title: &str) -> CatalogItem {
        CatalogItem {
            id,
            title: title.to_string(),
            media_kind: MediaKind::Movie,
            poster_path: None,
            backdrop_path: None,
            overview: String::new(),
            release_date: None,
            vote_average: None,
            runtime_seconds: None,
            episode_runtime_seconds: None,
            seasons: None,
            episodes: None,
        }
    }

    #[test]
    fn test_blank_query_clears_results_without_dispatch() {
        let state = StateHandle::new();
        state.set_search_results(vec![result(1, "Old")]);
        let mut session = SearchSession::new(state.clone());

        assert!(session.begin("   ").is_none());
        assert!(state.search_results().is_empty());
        assert_eq!(state.search_query(), "");
    }

    #[test]
    fn test_query_is_trimmed() {
        let state = StateHandle::new();
        let mut session = SearchSession::new(state.clone());

        let (_, query) = session.begin("  matrix  ").unwrap();
        assert_eq!(query, "matrix");
        assert_eq!(state.search_query(), "matrix");
    }

    #[test]
    fn test_stale_results_are_dropped() {
        let state = StateHandle::new();
        let mut session = SearchSession::new(state.clone());

        let (old_ticket, _) = session.begin("matr").unwrap();
        let (new_ticket, _) = session.begin("matrix").unwrap();

        // The newer search resolves first
        session.complete(new_ticket, vec![result(603, "The Matrix")]);
        // The slow earlier response arrives afterwards and must not win
        session.complete(old_ticket, vec![result(9, "Matra")]);

        let results = state.search_results();
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].title, "The Matrix");
    }

    #[test]
    fn test_blank_query_invalidates_inflight_search() {
        let state = StateHandle::new();
        let mut session = SearchSession::new(state.clone());

        let (ticket, _) = session.begin("matrix").unwrap();
        assert!(session.begin("").is_none());

        session.complete(ticket, vec![result(603, "The Matrix")]);
        assert!(state.search_results().is_empty());
    }
}
