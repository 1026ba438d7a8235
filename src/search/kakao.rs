//! Kakao Local keyword search client.
//!
//! `GET {endpoint}?query=..&size=..` with `Authorization: KakaoAK {key}`.
//! Coordinates arrive as decimal strings: `x` is longitude, `y` latitude.

use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;
use tracing::debug;

use super::LocationSearchProvider;
use crate::types::errors::SearchError;
use crate::types::location::Location;
use crate::types::settings::SearchSettings;

#[derive(Debug, Deserialize)]
struct KeywordResponse {
    documents: Vec<Document>,
}

#[derive(Debug, Deserialize)]
struct Document {
    place_name: String,
    #[serde(default)]
    address_name: String,
    #[serde(default)]
    road_address_name: String,
    #[serde(default)]
    category_group_name: String,
    #[serde(default)]
    category_name: String,
    x: String,
    y: String,
}

impl Document {
    fn into_location(self) -> Result<Location, SearchError> {
        let longitude: f64 = self.x.trim().parse().map_err(|_| {
            SearchError::MalformedResponse(format!("invalid longitude for {}: {}", self.place_name, self.x))
        })?;
        let latitude: f64 = self.y.trim().parse().map_err(|_| {
            SearchError::MalformedResponse(format!("invalid latitude for {}: {}", self.place_name, self.y))
        })?;

        let address = if self.address_name.is_empty() {
            self.road_address_name
        } else {
            self.address_name
        };

        // "음식점 > 카페 > 커피전문점" -> "커피전문점" when no group name is set
        let category = if self.category_group_name.is_empty() {
            self.category_name
                .rsplit('>')
                .next()
                .map(|s| s.trim().to_string())
                .unwrap_or_default()
        } else {
            self.category_group_name
        };

        Ok(Location {
            name: self.place_name,
            address,
            category,
            latitude,
            longitude,
        })
    }
}

/// Search provider backed by the Kakao Local REST API.
pub struct KakaoLocalSearch {
    client: reqwest::Client,
    endpoint: String,
    api_key: String,
    page_size: u32,
}

impl KakaoLocalSearch {
    /// Builds a client from the search settings.
    ///
    /// # Errors
    /// Returns `SearchError::ProviderFailure` if the HTTP client cannot be built.
    pub fn new(settings: &SearchSettings, api_key: &str) -> Result<Self, SearchError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(settings.timeout_secs))
            .build()
            .map_err(|e| SearchError::ProviderFailure(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            endpoint: settings.endpoint.clone(),
            api_key: api_key.to_string(),
            page_size: settings.page_size.clamp(1, 15),
        })
    }

    /// Parses a keyword-search response body, preserving document order.
    pub fn parse_response(body: &str) -> Result<Vec<Location>, SearchError> {
        let response: KeywordResponse = serde_json::from_str(body)
            .map_err(|e| SearchError::MalformedResponse(e.to_string()))?;
        response
            .documents
            .into_iter()
            .map(Document::into_location)
            .collect()
    }
}

#[async_trait]
impl LocationSearchProvider for KakaoLocalSearch {
    async fn find(&self, query: &str) -> Result<Vec<Location>, SearchError> {
        let size = self.page_size.to_string();
        let response = self
            .client
            .get(&self.endpoint)
            .header("Authorization", format!("KakaoAK {}", self.api_key))
            .query(&[("query", query), ("size", size.as_str())])
            .send()
            .await
            .map_err(|e| SearchError::ProviderFailure(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(SearchError::ProviderFailure(format!("HTTP {}", status)));
        }

        let body = response
            .text()
            .await
            .map_err(|e| SearchError::ProviderFailure(e.to_string()))?;
        let locations = Self::parse_response(&body)?;
        debug!(query, results = locations.len(), "kakao keyword search");
        Ok(locations)
    }
}
