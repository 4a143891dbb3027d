//! Stage wrappers that absorb remote failures.
//!
//! Each stage performs exactly one remote call. A failed call never aborts the
//! run: the stage yields a [`StageOutcome::Diagnostic`] carrying user-visible
//! text, and the next stage consumes that text as its input.

use crate::ai::{KeywordService, VisionService};
use crate::catalog::CatalogService;
use crate::image::EncodedImage;
use crate::models::{BookRecord, CatalogEntry};
use std::num::NonZeroUsize;
use tracing::{info, warn};

pub const DESCRIPTION_FAILURE_PREFIX: &str = "Error analyzing image";
pub const KEYWORD_FAILURE_PREFIX: &str = "Error extracting keywords";
pub const LOOKUP_FAILURE_PREFIX: &str = "Error fetching data";

/// Result of one stage: its normal payload, or diagnostic text in its place.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StageOutcome<T> {
    Success(T),
    Diagnostic(String),
}

impl<T> StageOutcome<T> {
    pub fn is_degraded(&self) -> bool {
        matches!(self, StageOutcome::Diagnostic(_))
    }
}

impl StageOutcome<String> {
    /// Text handed to the next stage, whichever variant this is.
    pub fn text(&self) -> &str {
        match self {
            StageOutcome::Success(text) | StageOutcome::Diagnostic(text) => text,
        }
    }

    pub fn into_text(self) -> String {
        match self {
            StageOutcome::Success(text) | StageOutcome::Diagnostic(text) => text,
        }
    }
}

impl StageOutcome<Vec<BookRecord>> {
    /// Rows for display. A failed lookup becomes exactly one error row so it
    /// stays distinguishable from an empty match list.
    pub fn into_entries(self) -> Vec<CatalogEntry> {
        match self {
            StageOutcome::Success(books) => books.into_iter().map(CatalogEntry::Book).collect(),
            StageOutcome::Diagnostic(error) => vec![CatalogEntry::Error { error }],
        }
    }
}

pub type Description = StageOutcome<String>;
pub type Keyword = StageOutcome<String>;

pub struct DescriptionStage {
    service: Box<dyn VisionService>,
}

impl DescriptionStage {
    pub fn new(service: Box<dyn VisionService>) -> Self {
        Self { service }
    }

    pub async fn describe(&self, image: &EncodedImage) -> Description {
        match self.service.describe_image(image).await {
            Ok(text) => {
                info!("Description received ({} chars)", text.len());
                StageOutcome::Success(text)
            }
            Err(e) => {
                warn!("Description stage degraded: {}", e);
                StageOutcome::Diagnostic(format!("{}: {}", DESCRIPTION_FAILURE_PREFIX, e))
            }
        }
    }
}

pub struct KeywordStage {
    service: Box<dyn KeywordService>,
}

impl KeywordStage {
    pub fn new(service: Box<dyn KeywordService>) -> Self {
        Self { service }
    }

    /// Runs even on a degraded description; the diagnostic text is the input.
    pub async fn extract_keyword(&self, description: &Description) -> Keyword {
        match self.service.extract_keyword(description.text()).await {
            Ok(keyword) => {
                info!("Keyword extracted: {}", keyword);
                StageOutcome::Success(keyword)
            }
            Err(e) => {
                warn!("Keyword stage degraded: {}", e);
                StageOutcome::Diagnostic(format!("{}: {}", KEYWORD_FAILURE_PREFIX, e))
            }
        }
    }
}

pub struct CatalogLookup {
    service: Box<dyn CatalogService>,
}

impl CatalogLookup {
    pub fn new(service: Box<dyn CatalogService>) -> Self {
        Self { service }
    }

    /// A diagnostic keyword is still searched for as a literal query.
    pub async fn search(
        &self,
        keyword: &Keyword,
        limit: NonZeroUsize,
    ) -> StageOutcome<Vec<BookRecord>> {
        match self.service.search(keyword.text(), limit).await {
            Ok(books) => {
                info!("Catalog returned {} book(s)", books.len());
                StageOutcome::Success(books)
            }
            Err(e) => {
                warn!("Catalog lookup degraded: {}", e);
                StageOutcome::Diagnostic(format!("{}: {}", LOOKUP_FAILURE_PREFIX, e))
            }
        }
    }
}
