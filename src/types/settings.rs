use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use super::position::{LastPosition, DEFAULT_FALLBACK_LATITUDE, DEFAULT_FALLBACK_LONGITUDE};
use crate::platform;

/// Environment variable overriding the directory holding the database.
pub const DATA_DIR_ENV: &str = "MAPSEARCH_DATA_DIR";
/// Environment variable carrying the Kakao REST API key.
pub const API_KEY_ENV: &str = "KAKAO_REST_API_KEY";

/// Top-level settings container.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct CoreSettings {
    /// Explicit database file. `None` means `<data dir>/mapsearch.db`.
    pub database_path: Option<String>,
    pub search: SearchSettings,
    pub map: MapSettings,
    /// `tracing` filter directive used when `RUST_LOG` is not set.
    pub log_filter: String,
}

impl Default for CoreSettings {
    fn default() -> Self {
        Self {
            database_path: None,
            search: SearchSettings::default(),
            map: MapSettings::default(),
            log_filter: "info".to_string(),
        }
    }
}

impl CoreSettings {
    /// Applies `MAPSEARCH_DATA_DIR` and `KAKAO_REST_API_KEY` on top of the
    /// loaded values.
    pub fn apply_env(&mut self) {
        if let Ok(dir) = std::env::var(DATA_DIR_ENV) {
            if !dir.is_empty() {
                self.database_path = Some(
                    PathBuf::from(dir)
                        .join("mapsearch.db")
                        .to_string_lossy()
                        .to_string(),
                );
            }
        }
        if let Ok(key) = std::env::var(API_KEY_ENV) {
            if !key.is_empty() {
                self.search.api_key = Some(key);
            }
        }
    }

    /// Resolves the database file location.
    pub fn database_path(&self) -> PathBuf {
        match &self.database_path {
            Some(p) => PathBuf::from(p),
            None => platform::get_data_dir().join("mapsearch.db"),
        }
    }

    pub fn fallback_position(&self) -> LastPosition {
        LastPosition::new(self.map.fallback_latitude, self.map.fallback_longitude)
    }
}

/// Settings for the Kakao Local keyword search provider.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct SearchSettings {
    pub endpoint: String,
    pub api_key: Option<String>,
    /// Number of documents requested per query (Kakao accepts 1..=15).
    pub page_size: u32,
    pub timeout_secs: u64,
}

impl Default for SearchSettings {
    fn default() -> Self {
        Self {
            endpoint: "https://dapi.kakao.com/v2/local/search/keyword.json".to_string(),
            api_key: None,
            page_size: 15,
            timeout_secs: 10,
        }
    }
}

/// Map camera settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct MapSettings {
    pub fallback_latitude: f64,
    pub fallback_longitude: f64,
}

impl Default for MapSettings {
    fn default() -> Self {
        Self {
            fallback_latitude: DEFAULT_FALLBACK_LATITUDE,
            fallback_longitude: DEFAULT_FALLBACK_LONGITUDE,
        }
    }
}
