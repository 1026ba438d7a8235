//! App Core.
//!
//! Central struct wiring the database, stores, search provider and both
//! coordinators together by constructor injection.

use std::error::Error;
use std::sync::Arc;

use tracing::{info, warn};

use crate::database::connection::Database;
use crate::managers::history_manager::HistoryManager;
use crate::search::{KakaoLocalSearch, LocationSearchProvider, StaticSearchProvider};
use crate::services::diagnostics::{ErrorReporter, TracingReporter};
use crate::services::position_coordinator::PositionCoordinator;
use crate::services::search_coordinator::SearchCoordinator;
use crate::stores::{SqliteHistoryStore, SqlitePositionStore};
use crate::types::errors::SearchError;
use crate::types::settings::CoreSettings;

/// Central application struct holding both coordinators.
pub struct App {
    pub db: Arc<Database>,
    pub settings: CoreSettings,
    pub search: SearchCoordinator,
    pub position: PositionCoordinator,
}

impl App {
    /// Opens the database named by `settings`, picks the search provider and
    /// loads the initial history list.
    pub async fn new(settings: CoreSettings) -> Result<Self, Box<dyn Error + Send + Sync>> {
        let db_path = settings.database_path();
        let db = Arc::new(Database::open(&db_path)?);
        info!(path = %db_path.display(), "database opened");

        let provider = Self::build_provider(&settings)?;
        Ok(Self::with_parts(db, provider, Arc::new(TracingReporter), settings).await)
    }

    /// Wires an app around an already opened database and a given provider.
    pub async fn with_parts(
        db: Arc<Database>,
        provider: Arc<dyn LocationSearchProvider>,
        reporter: Arc<dyn ErrorReporter>,
        settings: CoreSettings,
    ) -> Self {
        let history = Arc::new(HistoryManager::new(Arc::new(SqliteHistoryStore::new(
            db.clone(),
        ))));
        let search = SearchCoordinator::start(history, provider, reporter.clone()).await;
        let position = PositionCoordinator::new(
            Arc::new(SqlitePositionStore::new(db.clone())),
            reporter,
            settings.fallback_position(),
        );

        Self {
            db,
            settings,
            search,
            position,
        }
    }

    /// Kakao Local search when an API key is configured, otherwise an empty
    /// static catalogue.
    pub fn build_provider(
        settings: &CoreSettings,
    ) -> Result<Arc<dyn LocationSearchProvider>, SearchError> {
        match settings.search.api_key.as_deref() {
            Some(key) if !key.is_empty() => {
                Ok(Arc::new(KakaoLocalSearch::new(&settings.search, key)?))
            }
            _ => {
                warn!("no Kakao REST API key configured, search results will be empty");
                Ok(Arc::new(StaticSearchProvider::default()))
            }
        }
    }
}
