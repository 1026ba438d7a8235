use serde::{Deserialize, Serialize};

/// Latitude used when no camera position was ever persisted.
pub const DEFAULT_FALLBACK_LATITUDE: f64 = 37.402005;
/// Longitude used when no camera position was ever persisted.
pub const DEFAULT_FALLBACK_LONGITUDE: f64 = 127.108621;

/// The last map camera position.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LastPosition {
    pub latitude: f64,
    pub longitude: f64,
}

impl LastPosition {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }
}

impl Default for LastPosition {
    fn default() -> Self {
        Self::new(DEFAULT_FALLBACK_LATITUDE, DEFAULT_FALLBACK_LONGITUDE)
    }
}
