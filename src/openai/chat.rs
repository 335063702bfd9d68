//! The chat-completion adapter: [`ContentGenerator`] over an
//! OpenAI-compatible backend.

use super::client::{OpenAiHttpClient, DEFAULT_BASE_URL};
use super::sse::{SseFrame, SseFrameDecoder};
use super::translate;
use super::types::ChatCompletionRequest;
use crate::generator::{ContentGenerator, ResponseStream};
use crate::models::{
    CountTokensResponse, EmbedContentResponse, GenerateContentRequest, GenerateContentResponse,
};
use crate::{Error, Result};
use async_trait::async_trait;
use futures_util::StreamExt;
use std::time::Duration;

const CHAT_COMPLETIONS_PATH: &str = "/v1/chat/completions";
const DEFAULT_MODEL: &str = "gpt-4o-mini";

/// Adapter exposing the generic content-generation interface over an
/// OpenAI-compatible chat completion API.
///
/// Multi-part turns degrade to their first part (which must be text); token
/// counting and embeddings are deliberate capability gaps that return
/// structurally empty results without contacting the backend.
pub struct OpenAiContentGenerator {
    http: OpenAiHttpClient,
    model: String,
}

impl OpenAiContentGenerator {
    pub fn new(api_key: String, model: String) -> Self {
        Self::new_with_client(api_key, model, reqwest::Client::new())
    }

    pub fn new_with_client(api_key: String, model: String, client: reqwest::Client) -> Self {
        Self {
            http: OpenAiHttpClient::new_with_client(api_key, Duration::from_secs(30), client),
            model,
        }
    }

    /// Construct from environment configuration.
    ///
    /// `OPENAI_API_KEY` is required; `OPENAI_BASE_URL` and `OPENAI_MODEL`
    /// are optional. A missing credential fails here, before any call is
    /// attempted.
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();

        let api_key = std::env::var("OPENAI_API_KEY")
            .map_err(|_| Error::Configuration("OPENAI_API_KEY not set".to_string()))?;
        let base_url =
            std::env::var("OPENAI_BASE_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());
        let model = std::env::var("OPENAI_MODEL").unwrap_or_else(|_| DEFAULT_MODEL.to_string());

        Ok(Self::new(api_key, model).with_base_url(base_url))
    }

    pub fn with_base_url(mut self, base_url: String) -> Self {
        self.http = self.http.with_base_url(base_url);
        self
    }

    fn build_request(
        &self,
        request: &GenerateContentRequest,
        stream: bool,
    ) -> Result<ChatCompletionRequest> {
        Ok(ChatCompletionRequest {
            model: self.model.clone(),
            messages: translate::to_backend_messages(&request.contents)?,
            stream,
        })
    }
}

#[async_trait]
impl ContentGenerator for OpenAiContentGenerator {
    async fn generate_content(
        &self,
        request: GenerateContentRequest,
    ) -> Result<GenerateContentResponse> {
        let body = self.build_request(&request, false)?;
        tracing::debug!(model = %self.model, "Sending chat completion request");

        let response = self.http.post(CHAT_COMPLETIONS_PATH, &body).await?;
        translate::to_generic_response(response)
    }

    async fn generate_content_stream(
        &self,
        request: GenerateContentRequest,
    ) -> Result<ResponseStream> {
        let body = self.build_request(&request, true)?;
        tracing::debug!(model = %self.model, "Sending streaming chat completion request");

        // Request construction and HTTP status failures surface here; the
        // returned stream only ever carries per-frame results.
        let response = self
            .http
            .post_streaming(CHAT_COMPLETIONS_PATH, &body)
            .await?;

        let stream = async_stream::stream! {
            let mut decoder = SseFrameDecoder::new();
            let mut bytes = response.bytes_stream();

            while let Some(chunk) = bytes.next().await {
                let chunk = match chunk {
                    Ok(chunk) => chunk,
                    Err(e) => {
                        tracing::error!("Stream read error: {}", e);
                        yield Err(Error::Http(e));
                        return;
                    }
                };

                for frame in decoder.feed(&chunk) {
                    match frame {
                        SseFrame::Delta(delta) => {
                            match translate::chunk_to_generic_response(delta) {
                                Ok(response) => yield Ok(response),
                                // A chunk without choices is a malformed
                                // frame: skip it, keep the stream alive.
                                Err(e) => tracing::warn!("Skipping unusable stream frame: {}", e),
                            }
                        }
                        SseFrame::Done => return,
                    }
                }
            }
            // Upstream closed without the sentinel: a normal end.
        };

        Ok(Box::pin(stream))
    }

    /// The backend offers no token-counting endpoint. Always zero, never a
    /// network call.
    async fn count_tokens(&self, _request: GenerateContentRequest) -> Result<CountTokensResponse> {
        Ok(CountTokensResponse { total_tokens: 0 })
    }

    /// The backend offers no embedding endpoint. Always empty, never a
    /// network call.
    async fn embed_content(
        &self,
        _request: GenerateContentRequest,
    ) -> Result<EmbedContentResponse> {
        Ok(EmbedContentResponse {
            embeddings: Vec::new(),
        })
    }
}
