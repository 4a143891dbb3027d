//! Image-to-books orchestration.
//!
//! A run is strictly linear: encode, describe, extract a keyword, search the
//! catalog. Each step needs the previous step's output, so nothing inside a
//! run is parallel. Separate runs share only the immutable service handles and
//! may proceed concurrently.

pub mod stages;
pub mod summary;

pub use stages::{
    CatalogLookup, Description, DescriptionStage, Keyword, KeywordStage, StageOutcome,
};

use crate::ai::{KeywordService, OpenAiKeywordClient, OpenAiVisionClient, VisionService};
use crate::catalog::{CatalogService, OpenLibraryClient};
use crate::image::{ImageDetail, ImageEncoder, ImagePayload};
use crate::models::{Config, PipelineResult};
use crate::{Error, Result};
use std::num::NonZeroUsize;
use tracing::{info, info_span, Instrument};
use uuid::Uuid;

/// Runs the describe → keyword → lookup chain for uploaded images.
pub struct Pipeline {
    encoder: ImageEncoder,
    description: DescriptionStage,
    keyword: KeywordStage,
    lookup: CatalogLookup,
    book_limit: NonZeroUsize,
}

/// Injectable service bundle used to construct [`Pipeline`] in tests/harnesses.
pub struct PipelineServices {
    pub vision: Box<dyn VisionService>,
    pub keyword: Box<dyn KeywordService>,
    pub catalog: Box<dyn CatalogService>,
}

impl Pipeline {
    /// Build a pipeline from concrete service dependencies.
    pub fn with_services(
        services: PipelineServices,
        detail: ImageDetail,
        book_limit: NonZeroUsize,
    ) -> Self {
        Self {
            encoder: ImageEncoder::new(detail),
            description: DescriptionStage::new(services.vision),
            keyword: KeywordStage::new(services.keyword),
            lookup: CatalogLookup::new(services.catalog),
            book_limit,
        }
    }

    /// Construct the production pipeline from configuration.
    pub fn from_config(config: &Config) -> Result<Self> {
        // Reuse one HTTP connection pool across both remote services.
        let http_client = reqwest::Client::builder()
            .timeout(config.request_timeout)
            .build()?;

        info!(
            "Inference service: {} (vision model: {}, keyword model: {})",
            config.openai_base_url, config.vision_model, config.keyword_model
        );
        info!("Catalog service: {}", config.catalog_base_url);

        let vision = OpenAiVisionClient::new_with_client(
            config.openai_api_key.clone(),
            config.vision_model.clone(),
            http_client.clone(),
        )
        .with_base_url(config.openai_base_url.clone());

        let keyword = OpenAiKeywordClient::new_with_client(
            config.openai_api_key.clone(),
            config.keyword_model.clone(),
            http_client.clone(),
        )
        .with_base_url(config.openai_base_url.clone());

        let catalog = OpenLibraryClient::new_with_client(http_client)
            .with_base_url(config.catalog_base_url.clone());

        Ok(Self::with_services(
            PipelineServices {
                vision: Box::new(vision),
                keyword: Box::new(keyword),
                catalog: Box::new(catalog),
            },
            config.image_detail,
            config.book_limit,
        ))
    }

    /// Turn an uploaded image into a keyword and a ranked book list.
    ///
    /// Fails only when no image is supplied or it cannot be encoded; both are
    /// checked before any network call. Every later failure is reported inside
    /// the returned result.
    pub async fn run(&self, image: Option<ImagePayload>) -> Result<PipelineResult> {
        let payload = image.ok_or(Error::Input)?;
        let run_id = Uuid::new_v4();

        self.run_stages(payload)
            .instrument(info_span!("pipeline", %run_id))
            .await
    }

    async fn run_stages(&self, payload: ImagePayload) -> Result<PipelineResult> {
        let encoded = self.encoder.encode(payload)?;

        let description = self.description.describe(&encoded).await;
        drop(encoded);

        let keyword = self.keyword.extract_keyword(&description).await;
        let books = self
            .lookup
            .search(&keyword, self.book_limit)
            .await
            .into_entries();

        let description_failure = match &description {
            StageOutcome::Diagnostic(text) => Some(text.as_str()),
            StageOutcome::Success(_) => None,
        };
        let keyword = keyword.into_text();
        let summary_text = summary::render_summary(&keyword, description_failure, &books);

        info!(
            "Pipeline finished: keyword={:?}, {} row(s)",
            keyword,
            books.len()
        );

        Ok(PipelineResult {
            keyword,
            books,
            summary_text,
        })
    }
}
