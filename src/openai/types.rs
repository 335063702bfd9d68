//! OpenAI-compatible wire payloads used by the chat-completion adapter.
//!
//! The backend's JSON is modeled as explicit record shapes so that a body
//! missing expected structure fails deserialization instead of surfacing as
//! an undefined-field access downstream.

use serde::{Deserialize, Serialize};

/// Wire-level chat message. This adapter only ever produces `user` and
/// `assistant` roles.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: String,
    pub content: String,
}

/// Request body for chat completions, single-shot and streaming.
#[derive(Debug, Serialize)]
pub struct ChatCompletionRequest {
    pub model: String,
    pub messages: Vec<ChatMessage>,
    pub stream: bool,
}

/// Assistant message inside a single-shot choice.
#[derive(Debug, Deserialize)]
pub struct ResponseMessage {
    pub content: Option<String>,
}

/// Single choice item in a single-shot response.
#[derive(Debug, Deserialize)]
pub struct ChatChoice {
    #[serde(default)]
    pub index: u32,
    pub message: ResponseMessage,
    pub finish_reason: Option<String>,
}

/// Top-level single-shot chat completion response.
#[derive(Debug, Deserialize)]
pub struct ChatCompletionResponse {
    pub choices: Vec<ChatChoice>,
}

/// Incremental message fragment inside a streaming choice.
#[derive(Debug, Default, Deserialize)]
pub struct MessageDelta {
    pub content: Option<String>,
}

/// Single choice item in a streaming chunk.
#[derive(Debug, Deserialize)]
pub struct StreamChoice {
    #[serde(default)]
    pub index: u32,
    #[serde(default)]
    pub delta: MessageDelta,
    pub finish_reason: Option<String>,
}

/// One parsed streaming event payload.
#[derive(Debug, Deserialize)]
pub struct ChatCompletionChunk {
    pub choices: Vec<StreamChoice>,
}
