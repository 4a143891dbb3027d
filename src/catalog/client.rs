use super::types::SearchResponse;
use super::CatalogService;
use crate::models::BookRecord;
use crate::{Error, Result};
use async_trait::async_trait;
use reqwest::Client;
use std::num::NonZeroUsize;
use std::time::Duration;

pub const DEFAULT_BASE_URL: &str = "https://openlibrary.org";
const SEARCH_PATH: &str = "/search.json";

pub struct OpenLibraryClient {
    client: Client,
    base_url: String,
}

impl OpenLibraryClient {
    pub fn new(timeout: Duration) -> Result<Self> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self::new_with_client(client))
    }

    pub fn new_with_client(client: Client) -> Self {
        Self {
            client,
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }

    pub fn with_base_url(mut self, base_url: String) -> Self {
        self.base_url = base_url.trim_end_matches('/').to_string();
        self
    }
}

#[async_trait]
impl CatalogService for OpenLibraryClient {
    async fn search(&self, query: &str, limit: NonZeroUsize) -> Result<Vec<BookRecord>> {
        let url = format!("{}{}", self.base_url, SEARCH_PATH);
        tracing::debug!("GET {} (q={:?}, limit={})", url, query, limit);

        let response = self
            .client
            .get(&url)
            .query(&[("q", query.to_string()), ("limit", limit.to_string())])
            .send()
            .await
            .map_err(|e| {
                tracing::error!("Failed to send request to catalog: {}", e);
                e
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await?;
            tracing::error!("Catalog error (status {}): {}", status, error_text);
            return Err(Error::Catalog(format!(
                "catalog returned status {}",
                status
            )));
        }

        let body = response.text().await?;
        let parsed: SearchResponse = serde_json::from_str(&body).map_err(|e| {
            tracing::error!("Failed to parse catalog response: {}", e);
            Error::Catalog(format!("Failed to parse catalog response: {}", e))
        })?;

        Ok(parsed
            .docs
            .into_iter()
            .take(limit.get())
            .map(BookRecord::from)
            .collect())
    }
}
