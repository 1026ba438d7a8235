//! Search Coordinator.
//!
//! Owns the query text, the latest search results and the presented history
//! list, and turns result selections into history growth plus a one-shot
//! marker event. Provider and store failures are reported, never returned.

use std::sync::{Arc, Mutex};

use tracing::debug;

use crate::managers::history_manager::{HistoryManager, HistoryManagerTrait};
use crate::search::LocationSearchProvider;
use crate::services::diagnostics::ErrorReporter;
use crate::types::errors::{Diagnostic, ErrorKind};
use crate::types::history::HistoryEntry;
use crate::types::location::Location;
use crate::types::observable::{EventQueue, Observable};

pub struct SearchCoordinator {
    history: Arc<HistoryManager>,
    provider: Arc<dyn LocationSearchProvider>,
    reporter: Arc<dyn ErrorReporter>,
    query: Observable<String>,
    results: Observable<Vec<Location>>,
    history_list: Observable<Vec<HistoryEntry>>,
    marker_selections: EventQueue<Location>,
    /// Generation of the most recently issued search. Checked and applied
    /// under the same lock so an older response can never overwrite a newer one.
    latest_search: Mutex<u64>,
    /// Held across a history mutation and the reload that follows it, so
    /// history snapshots are published in the order they were taken.
    history_sync: tokio::sync::Mutex<()>,
}

impl SearchCoordinator {
    /// Creates a coordinator with empty state. See [`SearchCoordinator::start`]
    /// for the variant that loads the history list up front.
    pub fn new(
        history: Arc<HistoryManager>,
        provider: Arc<dyn LocationSearchProvider>,
        reporter: Arc<dyn ErrorReporter>,
    ) -> Self {
        Self {
            history,
            provider,
            reporter,
            query: Observable::default(),
            results: Observable::default(),
            history_list: Observable::default(),
            marker_selections: EventQueue::new(),
            latest_search: Mutex::new(0),
            history_sync: tokio::sync::Mutex::new(()),
        }
    }

    /// Creates a coordinator and loads the current history list.
    pub async fn start(
        history: Arc<HistoryManager>,
        provider: Arc<dyn LocationSearchProvider>,
        reporter: Arc<dyn ErrorReporter>,
    ) -> Self {
        let coordinator = Self::new(history, provider, reporter);
        coordinator.refresh_history().await;
        coordinator
    }

    pub fn query(&self) -> &Observable<String> {
        &self.query
    }

    pub fn results(&self) -> &Observable<Vec<Location>> {
        &self.results
    }

    pub fn history(&self) -> &Observable<Vec<HistoryEntry>> {
        &self.history_list
    }

    pub fn current_query(&self) -> String {
        self.query.get()
    }

    pub fn current_results(&self) -> Vec<Location> {
        self.results.get()
    }

    pub fn current_history(&self) -> Vec<HistoryEntry> {
        self.history_list.get()
    }

    /// Publishes `text` as the current query and searches for it.
    pub async fn set_query(&self, text: &str) -> Vec<Location> {
        self.query.set(text.to_string());
        self.search(text).await
    }

    /// Searches for `text` and applies the results unless a newer search was
    /// issued meanwhile. Returns this call's results either way.
    ///
    /// An empty or all-whitespace query yields no results without consulting
    /// the provider.
    pub async fn search(&self, text: &str) -> Vec<Location> {
        let generation = {
            let mut latest = self.lock_latest();
            *latest += 1;
            *latest
        };

        let results = if text.trim().is_empty() {
            Vec::new()
        } else {
            match self.provider.find(text).await {
                Ok(found) => found,
                Err(e) => {
                    self.reporter.report(Diagnostic::new(
                        ErrorKind::SearchProviderFailure,
                        "search",
                        e.to_string(),
                    ));
                    Vec::new()
                }
            }
        };

        let latest = self.lock_latest();
        if *latest == generation {
            self.results.set(results.clone());
        } else {
            debug!(query = text, generation, latest = *latest, "discarding stale search response");
        }
        results
    }

    /// Records `location` in the history, refreshes the history list and emits
    /// a marker selection for it.
    pub async fn select_result(&self, location: Location) {
        let sync = self.history_sync.lock().await;
        if let Err(e) = self.history.record_selection(&location.name).await {
            self.reporter.report(Diagnostic::new(
                ErrorKind::StoreUnavailable,
                "record_selection",
                e.to_string(),
            ));
        }
        self.reload_history().await;
        drop(sync);
        self.marker_selections.push(location);
    }

    /// Re-issues the search for a history entry. History counts are left alone.
    pub async fn select_from_history(&self, name: &str) -> Vec<Location> {
        self.set_query(name).await
    }

    /// Removes `name` from the history and refreshes the history list.
    pub async fn remove_history(&self, name: &str) {
        let _sync = self.history_sync.lock().await;
        if let Err(e) = self.history.remove_entry(name).await {
            self.reporter.report(Diagnostic::new(
                ErrorKind::StoreUnavailable,
                "remove_entry",
                e.to_string(),
            ));
        }
        self.reload_history().await;
    }

    /// Removes every history entry and refreshes the history list.
    pub async fn clear_history(&self) {
        let _sync = self.history_sync.lock().await;
        if let Err(e) = self.history.clear_history().await {
            self.reporter.report(Diagnostic::new(
                ErrorKind::StoreUnavailable,
                "clear_history",
                e.to_string(),
            ));
        }
        self.reload_history().await;
    }

    /// Reloads the history list. On failure the previous list stays published.
    pub async fn refresh_history(&self) {
        let _sync = self.history_sync.lock().await;
        self.reload_history().await;
    }

    async fn reload_history(&self) {
        match self.history.get_history().await {
            Ok(entries) => self.history_list.set(entries),
            Err(e) => self.reporter.report(Diagnostic::new(
                ErrorKind::StoreUnavailable,
                "get_history",
                e.to_string(),
            )),
        }
    }

    /// Waits for the next marker selection and consumes it.
    pub async fn next_marker_selection(&self) -> Option<Location> {
        self.marker_selections.next().await
    }

    /// Consumes a pending marker selection, if any, without waiting.
    pub fn try_next_marker_selection(&self) -> Option<Location> {
        self.marker_selections.try_next()
    }

    fn lock_latest(&self) -> std::sync::MutexGuard<'_, u64> {
        self.latest_search
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}
