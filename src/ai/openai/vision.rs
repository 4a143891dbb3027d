use super::client::OpenAiHttpClient;
use super::types::{ChatCompletionRequest, ChatMessage, ChatMessageContent, MessagePart};
use crate::ai::VisionService;
use crate::image::EncodedImage;
use crate::{prompts, Error, Result};
use async_trait::async_trait;
use std::time::Duration;

const MAX_DESCRIPTION_TOKENS: u32 = 150;
/// Some latitude in wording, bounded by the token cap.
const DESCRIPTION_TEMPERATURE: f32 = 0.7;

pub struct OpenAiVisionClient {
    http: OpenAiHttpClient,
    model: String,
}

impl OpenAiVisionClient {
    pub fn new(api_key: String, model: String, timeout: Duration) -> Result<Self> {
        Ok(Self {
            http: OpenAiHttpClient::new(api_key, timeout)?,
            model,
        })
    }

    pub fn new_with_client(api_key: String, model: String, client: reqwest::Client) -> Self {
        Self {
            http: OpenAiHttpClient::new_with_client(api_key, client),
            model,
        }
    }
}

super::impl_with_openai_base_url!(OpenAiVisionClient);

#[async_trait]
impl VisionService for OpenAiVisionClient {
    async fn describe_image(&self, image: &EncodedImage) -> Result<String> {
        tracing::debug!(
            "Requesting description for {} image ({} base64 chars)",
            image.media_type,
            image.base64.len()
        );

        let user_message = ChatMessage::user(ChatMessageContent::Parts(vec![
            MessagePart::text(prompts::DESCRIBE_USER),
            MessagePart::image(image.data_url(), image.detail),
        ]));

        let request = ChatCompletionRequest {
            model: self.model.clone(),
            messages: vec![user_message],
            max_completion_tokens: MAX_DESCRIPTION_TOKENS,
            temperature: DESCRIPTION_TEMPERATURE,
        };

        let response = self.http.chat_completion(&request).await?;

        response
            .first_text()
            .ok_or_else(|| Error::AiProvider("No description in OpenAI response".to_string()))
    }
}
