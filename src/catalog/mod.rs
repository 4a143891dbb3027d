//! Bibliographic catalog integration
//!
//! Free-text book search against an Open Library compatible endpoint.

pub mod client;
pub mod mock;
pub mod types;

pub use client::OpenLibraryClient;
pub use mock::MockCatalogClient;

use crate::models::BookRecord;
use crate::Result;
use async_trait::async_trait;
use std::num::NonZeroUsize;

#[async_trait]
pub trait CatalogService: Send + Sync {
    /// At most `limit` books matching `query`, in catalog relevance order.
    async fn search(&self, query: &str, limit: NonZeroUsize) -> Result<Vec<BookRecord>>;
}
