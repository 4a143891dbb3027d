use super::CatalogService;
use crate::models::BookRecord;
use crate::{Error, Result};
use async_trait::async_trait;
use std::num::NonZeroUsize;
use std::sync::{Arc, Mutex};

/// In-memory [`CatalogService`] that records every query it receives.
#[derive(Clone)]
pub struct MockCatalogClient {
    books: Arc<Mutex<Vec<BookRecord>>>,
    failure: Arc<Mutex<Option<String>>>,
    queries: Arc<Mutex<Vec<(String, usize)>>>,
}

impl MockCatalogClient {
    pub fn new() -> Self {
        Self {
            books: Arc::new(Mutex::new(Vec::new())),
            failure: Arc::new(Mutex::new(None)),
            queries: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn with_book(self, book: BookRecord) -> Self {
        self.books.lock().unwrap().push(book);
        self
    }

    /// Make every search fail as a transport error would.
    pub fn with_failure(self, message: String) -> Self {
        *self.failure.lock().unwrap() = Some(message);
        self
    }

    pub fn get_call_count(&self) -> usize {
        self.queries.lock().unwrap().len()
    }

    /// `(query, limit)` pairs in call order.
    pub fn received_queries(&self) -> Vec<(String, usize)> {
        self.queries.lock().unwrap().clone()
    }
}

impl Default for MockCatalogClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CatalogService for MockCatalogClient {
    async fn search(&self, query: &str, limit: NonZeroUsize) -> Result<Vec<BookRecord>> {
        self.queries
            .lock()
            .unwrap()
            .push((query.to_string(), limit.get()));

        if let Some(message) = self.failure.lock().unwrap().clone() {
            return Err(Error::Catalog(message));
        }

        let books = self.books.lock().unwrap();
        Ok(books.iter().take(limit.get()).cloned().collect())
    }
}
