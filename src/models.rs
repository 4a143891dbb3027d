//! Data models and structures
//!
//! Defines the book records produced by catalog lookups, the result of one
//! pipeline run, and the process configuration.

use crate::ai::openai::client::DEFAULT_BASE_URL as DEFAULT_OPENAI_BASE_URL;
use crate::catalog::client::DEFAULT_BASE_URL as DEFAULT_CATALOG_BASE_URL;
use crate::image::ImageDetail;
use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::num::NonZeroUsize;
use std::time::Duration;

/// Marker rendered in place of a missing catalog field.
pub const NOT_AVAILABLE: &str = "N/A";
/// Author shown when the catalog lists none.
pub const UNKNOWN_AUTHOR: &str = "Unknown";

/// One book as returned by the catalog service, with defaults already applied.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct BookRecord {
    pub title: String,
    /// Never empty; `["Unknown"]` when the catalog has no author.
    pub authors: Vec<String>,
    pub first_publish_year: Option<i32>,
    pub edition_count: Option<u32>,
    pub catalog_id: String,
}

impl BookRecord {
    pub fn new(
        title: Option<String>,
        authors: Option<Vec<String>>,
        first_publish_year: Option<i32>,
        edition_count: Option<u32>,
        catalog_id: Option<String>,
    ) -> Self {
        let authors = match authors {
            Some(authors) if !authors.is_empty() => authors,
            _ => vec![UNKNOWN_AUTHOR.to_string()],
        };

        Self {
            title: title.unwrap_or_else(|| NOT_AVAILABLE.to_string()),
            authors,
            first_publish_year,
            edition_count,
            catalog_id: catalog_id.unwrap_or_else(|| NOT_AVAILABLE.to_string()),
        }
    }

    /// Authors joined for display.
    pub fn author(&self) -> String {
        self.authors.join(", ")
    }

    pub fn first_publish_year_display(&self) -> String {
        display_or_na(self.first_publish_year)
    }

    pub fn edition_count_display(&self) -> String {
        display_or_na(self.edition_count)
    }
}

fn display_or_na<T: ToString>(value: Option<T>) -> String {
    value
        .map(|v| v.to_string())
        .unwrap_or_else(|| NOT_AVAILABLE.to_string())
}

/// A row of a lookup result: either a book or the marker for a failed lookup.
///
/// A failed lookup yields exactly one `Error` row so callers can tell it apart
/// from a lookup that matched nothing (an empty sequence).
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(untagged)]
pub enum CatalogEntry {
    Book(BookRecord),
    Error { error: String },
}

impl CatalogEntry {
    pub fn is_error(&self) -> bool {
        matches!(self, CatalogEntry::Error { .. })
    }

    pub fn as_book(&self) -> Option<&BookRecord> {
        match self {
            CatalogEntry::Book(book) => Some(book),
            CatalogEntry::Error { .. } => None,
        }
    }
}

/// Outcome of one pipeline invocation.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct PipelineResult {
    /// Extracted keyword, or the diagnostic text that replaced it.
    pub keyword: String,
    pub books: Vec<CatalogEntry>,
    pub summary_text: String,
}

// Configuration
pub const DEFAULT_MODEL: &str = "gpt-4o-mini";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_BOOK_LIMIT: usize = 5;

#[derive(Clone)]
pub struct Config {
    pub openai_api_key: String,
    pub openai_base_url: String,
    pub vision_model: String,
    pub keyword_model: String,
    pub catalog_base_url: String,
    pub request_timeout: Duration,
    pub book_limit: NonZeroUsize,
    pub image_detail: ImageDetail,
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("openai_api_key", &"<redacted>")
            .field("openai_base_url", &self.openai_base_url)
            .field("vision_model", &self.vision_model)
            .field("keyword_model", &self.keyword_model)
            .field("catalog_base_url", &self.catalog_base_url)
            .field("request_timeout", &self.request_timeout)
            .field("book_limit", &self.book_limit)
            .field("image_detail", &self.image_detail)
            .finish()
    }
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build a config from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        let openai_api_key =
            get("OPENAI_API_KEY").ok_or_else(|| Error::Config("OPENAI_API_KEY not set".into()))?;

        let timeout_secs = match get("REQUEST_TIMEOUT_SECS") {
            Some(raw) => parse_positive(&raw, "REQUEST_TIMEOUT_SECS")?.get() as u64,
            None => DEFAULT_TIMEOUT_SECS,
        };

        let book_limit = match get("BOOK_LIMIT") {
            Some(raw) => parse_positive(&raw, "BOOK_LIMIT")?,
            None => NonZeroUsize::new(DEFAULT_BOOK_LIMIT)
                .ok_or_else(|| Error::Config("default book limit is zero".into()))?,
        };

        let image_detail = match get("IMAGE_DETAIL") {
            Some(raw) => raw.parse()?,
            None => ImageDetail::default(),
        };

        Ok(Self {
            openai_api_key,
            openai_base_url: get("OPENAI_BASE_URL")
                .unwrap_or_else(|| DEFAULT_OPENAI_BASE_URL.to_string()),
            vision_model: get("VISION_MODEL").unwrap_or_else(|| DEFAULT_MODEL.to_string()),
            keyword_model: get("KEYWORD_MODEL").unwrap_or_else(|| DEFAULT_MODEL.to_string()),
            catalog_base_url: get("CATALOG_BASE_URL")
                .unwrap_or_else(|| DEFAULT_CATALOG_BASE_URL.to_string()),
            request_timeout: Duration::from_secs(timeout_secs),
            book_limit,
            image_detail,
        })
    }
}

fn parse_positive(raw: &str, key: &str) -> Result<NonZeroUsize> {
    raw.trim()
        .parse::<NonZeroUsize>()
        .map_err(|_| Error::Config(format!("{} must be a positive integer, got '{}'", key, raw)))
}
