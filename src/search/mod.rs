//! Location search providers.
//!
//! The coordinators treat a provider as an opaque async function from a
//! query to an ordered list of places. Relevance order belongs to the
//! provider and is never changed downstream.

use async_trait::async_trait;

use crate::types::errors::SearchError;
use crate::types::location::Location;

pub mod kakao;
pub mod static_provider;

pub use kakao::KakaoLocalSearch;
pub use static_provider::StaticSearchProvider;

/// Free-text location search.
#[async_trait]
pub trait LocationSearchProvider: Send + Sync {
    async fn find(&self, query: &str) -> Result<Vec<Location>, SearchError>;
}
