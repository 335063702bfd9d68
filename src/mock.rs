//! Mock content generator for downstream tests.

use crate::generator::{ContentGenerator, ResponseStream};
use crate::models::{
    Candidate, Content, CountTokensResponse, EmbedContentResponse, GenerateContentRequest,
    GenerateContentResponse,
};
use crate::Result;
use async_trait::async_trait;
use futures_util::stream;
use std::sync::{Arc, Mutex};

/// Canned-response [`ContentGenerator`] that never touches the network.
pub struct MockContentGenerator {
    responses: Arc<Mutex<Vec<String>>>,
    stream_scripts: Arc<Mutex<Vec<Vec<String>>>>,
    call_count: Arc<Mutex<usize>>,
}

impl MockContentGenerator {
    pub fn new() -> Self {
        Self {
            responses: Arc::new(Mutex::new(Vec::new())),
            stream_scripts: Arc::new(Mutex::new(Vec::new())),
            call_count: Arc::new(Mutex::new(0)),
        }
    }

    /// Queues one single-shot response text. Responses cycle once exhausted.
    pub fn with_response(self, text: impl Into<String>) -> Self {
        self.responses.lock().unwrap().push(text.into());
        self
    }

    /// Queues one scripted stream: each entry becomes one partial response.
    pub fn with_stream(self, deltas: Vec<String>) -> Self {
        self.stream_scripts.lock().unwrap().push(deltas);
        self
    }

    pub fn get_call_count(&self) -> usize {
        *self.call_count.lock().unwrap()
    }

    fn full_response(text: String, finish_reason: Option<String>) -> GenerateContentResponse {
        GenerateContentResponse {
            candidates: vec![Candidate {
                index: 0,
                content: Content::model_text(text),
                finish_reason,
                safety_ratings: Vec::new(),
                citation_metadata: None,
            }],
            prompt_feedback: None,
        }
    }
}

impl Default for MockContentGenerator {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ContentGenerator for MockContentGenerator {
    async fn generate_content(
        &self,
        _request: GenerateContentRequest,
    ) -> Result<GenerateContentResponse> {
        let mut count = self.call_count.lock().unwrap();
        *count += 1;

        let responses = self.responses.lock().unwrap();
        let text = if responses.is_empty() {
            "mock response".to_string()
        } else {
            responses[(*count - 1) % responses.len()].clone()
        };

        Ok(Self::full_response(text, Some("stop".to_string())))
    }

    async fn generate_content_stream(
        &self,
        _request: GenerateContentRequest,
    ) -> Result<ResponseStream> {
        let mut count = self.call_count.lock().unwrap();
        *count += 1;

        let scripts = self.stream_scripts.lock().unwrap();
        let deltas = if scripts.is_empty() {
            vec!["mock ".to_string(), "stream".to_string()]
        } else {
            scripts[(*count - 1) % scripts.len()].clone()
        };

        let items: Vec<Result<GenerateContentResponse>> = deltas
            .into_iter()
            .map(|text| Ok(Self::full_response(text, None)))
            .collect();

        Ok(Box::pin(stream::iter(items)))
    }

    async fn count_tokens(&self, _request: GenerateContentRequest) -> Result<CountTokensResponse> {
        Ok(CountTokensResponse { total_tokens: 0 })
    }

    async fn embed_content(
        &self,
        _request: GenerateContentRequest,
    ) -> Result<EmbedContentResponse> {
        Ok(EmbedContentResponse {
            embeddings: Vec::new(),
        })
    }
}
