use serde::{Deserialize, Serialize};

/// A place returned by a location search provider.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub name: String,
    pub address: String,
    pub category: String,
    pub latitude: f64,
    pub longitude: f64,
}

impl Location {
    pub fn new(name: &str, address: &str, category: &str, latitude: f64, longitude: f64) -> Self {
        Self {
            name: name.to_string(),
            address: address.to_string(),
            category: category.to_string(),
            latitude,
            longitude,
        }
    }

    /// Case-insensitive substring match on name, address or category.
    pub fn matches(&self, query: &str) -> bool {
        let needle = query.to_lowercase();
        self.name.to_lowercase().contains(&needle)
            || self.address.to_lowercase().contains(&needle)
            || self.category.to_lowercase().contains(&needle)
    }
}
