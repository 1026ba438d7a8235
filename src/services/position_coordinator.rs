//! Position Coordinator.
//!
//! Tracks the last-known map camera position, persists it on demand and
//! restores it on startup, degrading to a fixed fallback coordinate.

use std::sync::Arc;

use tracing::{debug, info};

use crate::services::diagnostics::ErrorReporter;
use crate::stores::PositionStore;
use crate::types::errors::{Diagnostic, ErrorKind};
use crate::types::observable::Observable;
use crate::types::position::LastPosition;

pub struct PositionCoordinator {
    store: Arc<dyn PositionStore>,
    reporter: Arc<dyn ErrorReporter>,
    fallback: LastPosition,
    camera: Observable<Option<LastPosition>>,
}

impl PositionCoordinator {
    pub fn new(
        store: Arc<dyn PositionStore>,
        reporter: Arc<dyn ErrorReporter>,
        fallback: LastPosition,
    ) -> Self {
        Self {
            store,
            reporter,
            fallback,
            camera: Observable::new(None),
        }
    }

    /// Last-known camera position, if one was set, saved or loaded from the store.
    pub fn camera_position(&self) -> Option<LastPosition> {
        self.camera.get()
    }

    /// Records the current camera position in memory only.
    pub fn update_camera(&self, latitude: f64, longitude: f64) {
        self.camera.set(Some(LastPosition::new(latitude, longitude)));
    }

    /// Persists the given position. A store failure is reported and `false`
    /// is returned; the coordinator keeps working either way.
    pub async fn save_last_position(&self, latitude: f64, longitude: f64) -> bool {
        let position = LastPosition::new(latitude, longitude);
        match self.store.save(position).await {
            Ok(()) => {
                debug!(latitude, longitude, "saved last position");
                self.camera.set(Some(position));
                true
            }
            Err(e) => {
                self.reporter.report(Diagnostic::new(
                    ErrorKind::StoreUnavailable,
                    "save_last_position",
                    e.to_string(),
                ));
                false
            }
        }
    }

    /// Persists the last-known camera position. Returns `false` when there is
    /// nothing to persist or the write failed.
    pub async fn persist_camera(&self) -> bool {
        match self.camera.get() {
            Some(p) => self.save_last_position(p.latitude, p.longitude).await,
            None => false,
        }
    }

    /// Loads the stored position and passes it to `callback` exactly once.
    ///
    /// The third argument is `true` when the fallback coordinate was used,
    /// either because nothing was stored or because the store failed.
    pub async fn load_last_position<F>(&self, callback: F)
    where
        F: FnOnce(f64, f64, bool) + Send,
    {
        let (position, is_default) = self.resolve_last_position().await;
        callback(position.latitude, position.longitude, is_default);
    }

    /// Non-callback form of [`PositionCoordinator::load_last_position`].
    ///
    /// Only a stored position becomes the camera position. The fallback is
    /// never recorded, so `persist_camera` cannot write it over real data.
    pub async fn resolve_last_position(&self) -> (LastPosition, bool) {
        match self.store.load().await {
            Ok(Some(position)) => {
                self.camera.set(Some(position));
                (position, false)
            }
            Ok(None) => {
                info!("no stored position, using fallback");
                (self.fallback, true)
            }
            Err(e) => {
                self.reporter.report(Diagnostic::new(
                    ErrorKind::StoreUnavailable,
                    "load_last_position",
                    e.to_string(),
                ));
                (self.fallback, true)
            }
        }
    }
}
