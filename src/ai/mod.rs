//! Inference service integration
//!
//! Two capabilities of one multimodal completion service: describing an image
//! and distilling a description into a single keyword.

pub mod mock;
pub mod openai;

pub use mock::{MockKeywordClient, MockVisionClient};
pub use openai::{OpenAiKeywordClient, OpenAiVisionClient};

use crate::image::EncodedImage;
use crate::Result;
use async_trait::async_trait;

#[async_trait]
pub trait VisionService: Send + Sync {
    /// Free-text description of the main objects, concepts or actions.
    async fn describe_image(&self, image: &EncodedImage) -> Result<String>;
}

#[async_trait]
pub trait KeywordService: Send + Sync {
    /// The single most salient keyword or named entity in `description`.
    async fn extract_keyword(&self, description: &str) -> Result<String>;
}
