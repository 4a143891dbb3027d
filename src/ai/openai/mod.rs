/// Adds a `with_base_url` builder to a client wrapping an `http: OpenAiHttpClient`.
macro_rules! impl_with_openai_base_url {
    ($client:ty) => {
        impl $client {
            pub fn with_base_url(mut self, base_url: String) -> Self {
                self.http = self.http.with_base_url(base_url);
                self
            }
        }
    };
}

pub(crate) use impl_with_openai_base_url;

pub mod client;
pub mod keyword;
pub mod types;
pub mod vision;

pub use keyword::OpenAiKeywordClient;
pub use vision::OpenAiVisionClient;

pub const CHAT_COMPLETIONS_PATH: &str = "/v1/chat/completions";
