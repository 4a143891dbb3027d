use super::client::OpenAiHttpClient;
use super::types::{ChatCompletionRequest, ChatMessage, ChatMessageContent};
use crate::ai::KeywordService;
use crate::{prompts, Error, Result};
use async_trait::async_trait;

const MAX_KEYWORD_TOKENS: u32 = 50;
/// Zero temperature so identical descriptions yield identical keywords.
const KEYWORD_TEMPERATURE: f32 = 0.0;

pub struct OpenAiKeywordClient {
    http: OpenAiHttpClient,
    model: String,
}

impl OpenAiKeywordClient {
    pub fn new_with_client(api_key: String, model: String, client: reqwest::Client) -> Self {
        Self {
            http: OpenAiHttpClient::new_with_client(api_key, client),
            model,
        }
    }
}

super::impl_with_openai_base_url!(OpenAiKeywordClient);

#[async_trait]
impl KeywordService for OpenAiKeywordClient {
    async fn extract_keyword(&self, description: &str) -> Result<String> {
        tracing::debug!(
            "Requesting keyword for description ({} chars)",
            description.len()
        );

        let user_message = ChatMessage::user(ChatMessageContent::Text(prompts::render(
            prompts::KEYWORD_USER,
            &[("description", description)],
        )));

        let request = ChatCompletionRequest {
            model: self.model.clone(),
            messages: vec![ChatMessage::system(prompts::KEYWORD_SYSTEM), user_message],
            max_completion_tokens: MAX_KEYWORD_TOKENS,
            temperature: KEYWORD_TEMPERATURE,
        };

        let response = self.http.chat_completion(&request).await?;

        response
            .first_text()
            .ok_or_else(|| Error::AiProvider("No keyword in OpenAI response".to_string()))
    }
}
