//! Search over a fixed catalogue of places.

use async_trait::async_trait;

use super::LocationSearchProvider;
use crate::types::errors::SearchError;
use crate::types::location::Location;

/// Filters a fixed list of places by case-insensitive substring match on
/// name, address or category, keeping catalogue order.
#[derive(Debug, Clone, Default)]
pub struct StaticSearchProvider {
    places: Vec<Location>,
}

impl StaticSearchProvider {
    pub fn new(places: Vec<Location>) -> Self {
        Self { places }
    }
}

#[async_trait]
impl LocationSearchProvider for StaticSearchProvider {
    async fn find(&self, query: &str) -> Result<Vec<Location>, SearchError> {
        let query = query.trim();
        if query.is_empty() {
            return Ok(Vec::new());
        }
        Ok(self
            .places
            .iter()
            .filter(|p| p.matches(query))
            .cloned()
            .collect())
    }
}
