use super::{KeywordService, VisionService};
use crate::image::EncodedImage;
use crate::{Error, Result};
use async_trait::async_trait;
use std::sync::{Arc, Mutex};

/// Scripted [`VisionService`]. Clones share state, so a test can keep a handle.
#[derive(Clone)]
pub struct MockVisionClient {
    responses: Arc<Mutex<Vec<String>>>,
    failure: Arc<Mutex<Option<String>>>,
    call_count: Arc<Mutex<usize>>,
}

impl MockVisionClient {
    pub fn new() -> Self {
        Self {
            responses: Arc::new(Mutex::new(Vec::new())),
            failure: Arc::new(Mutex::new(None)),
            call_count: Arc::new(Mutex::new(0)),
        }
    }

    pub fn with_description(self, response: String) -> Self {
        self.responses.lock().unwrap().push(response);
        self
    }

    /// Make every call fail as if the service answered with `message`.
    pub fn with_failure(self, message: String) -> Self {
        *self.failure.lock().unwrap() = Some(message);
        self
    }

    pub fn get_call_count(&self) -> usize {
        *self.call_count.lock().unwrap()
    }
}

impl Default for MockVisionClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl VisionService for MockVisionClient {
    async fn describe_image(&self, image: &EncodedImage) -> Result<String> {
        let mut count = self.call_count.lock().unwrap();
        *count += 1;

        if let Some(message) = self.failure.lock().unwrap().clone() {
            return Err(Error::AiProvider(message));
        }

        let responses = self.responses.lock().unwrap();
        if responses.is_empty() {
            Ok(format!(
                "A {}x{} {} image",
                image.width, image.height, image.media_type
            ))
        } else {
            let index = (*count - 1) % responses.len();
            Ok(responses[index].clone())
        }
    }
}

/// Scripted [`KeywordService`] that records every description it receives.
#[derive(Clone)]
pub struct MockKeywordClient {
    responses: Arc<Mutex<Vec<String>>>,
    failure: Arc<Mutex<Option<String>>>,
    received: Arc<Mutex<Vec<String>>>,
}

impl MockKeywordClient {
    pub fn new() -> Self {
        Self {
            responses: Arc::new(Mutex::new(Vec::new())),
            failure: Arc::new(Mutex::new(None)),
            received: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn with_keyword(self, response: String) -> Self {
        self.responses.lock().unwrap().push(response);
        self
    }

    pub fn with_failure(self, message: String) -> Self {
        *self.failure.lock().unwrap() = Some(message);
        self
    }

    pub fn get_call_count(&self) -> usize {
        self.received.lock().unwrap().len()
    }

    pub fn received_descriptions(&self) -> Vec<String> {
        self.received.lock().unwrap().clone()
    }
}

impl Default for MockKeywordClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl KeywordService for MockKeywordClient {
    async fn extract_keyword(&self, description: &str) -> Result<String> {
        let mut received = self.received.lock().unwrap();
        received.push(description.to_string());

        if let Some(message) = self.failure.lock().unwrap().clone() {
            return Err(Error::AiProvider(message));
        }

        let responses = self.responses.lock().unwrap();
        if responses.is_empty() {
            // Deterministic default: first word of the description
            Ok(description
                .split_whitespace()
                .next()
                .unwrap_or_default()
                .to_string())
        } else {
            let index = (received.len() - 1) % responses.len();
            Ok(responses[index].clone())
        }
    }
}
