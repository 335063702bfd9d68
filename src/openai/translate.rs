//! Bidirectional mapping between the generic content model and the
//! OpenAI-compatible wire format.
//!
//! Outbound translation refuses turns it cannot represent faithfully rather
//! than silently dropping semantics: unsupported roles, empty turns, and
//! non-text leading parts are hard errors. The one documented loss is that
//! parts beyond the first are not sent; that degradation is logged.

use super::types::{ChatCompletionChunk, ChatCompletionResponse, ChatMessage};
use crate::models::{Candidate, Content, GenerateContentResponse, Part, Role};
use crate::{Error, Result};

/// Converts one generic turn into one wire message.
///
/// Role mapping: `user` stays `user`, `model` becomes `assistant`, anything
/// else is refused. Only the first part is sent and it must be text.
pub fn to_backend_message(turn: &Content) -> Result<ChatMessage> {
    let role = match turn.role {
        Role::User => "user",
        Role::Model => "assistant",
        other => return Err(Error::UnsupportedRole(other.as_str().to_string())),
    };

    let first = turn.parts.first().ok_or(Error::EmptyTurn)?;
    let text = match first {
        Part::Text { text } => text.clone(),
        Part::InlineData { inline_data } => {
            return Err(Error::UnsupportedPart(format!(
                "inline data ({}) cannot be sent as chat text",
                inline_data.mime_type
            )));
        }
    };

    if turn.parts.len() > 1 {
        tracing::warn!(
            dropped = turn.parts.len() - 1,
            "multi-part turn degraded to first part only"
        );
    }

    Ok(ChatMessage {
        role: role.to_string(),
        content: text,
    })
}

/// Converts a full conversation, failing on the first untranslatable turn.
pub fn to_backend_messages(turns: &[Content]) -> Result<Vec<ChatMessage>> {
    turns.iter().map(to_backend_message).collect()
}

/// Maps a single-shot response body to the generic contract.
///
/// Only `choices[0]` is read; a response without choices violates the
/// backend contract.
pub fn to_generic_response(response: ChatCompletionResponse) -> Result<GenerateContentResponse> {
    let choice = response
        .choices
        .into_iter()
        .next()
        .ok_or_else(|| Error::MalformedResponse("response contains no choices".to_string()))?;

    Ok(candidate_response(
        choice.index,
        choice.message.content.unwrap_or_default(),
        choice.finish_reason,
    ))
}

/// Maps one streaming chunk to a partial generic response.
///
/// Structurally the same mapping as [`to_generic_response`], sourced from the
/// delta fragment. No accumulation happens here.
pub fn chunk_to_generic_response(chunk: ChatCompletionChunk) -> Result<GenerateContentResponse> {
    let choice = chunk
        .choices
        .into_iter()
        .next()
        .ok_or_else(|| Error::MalformedResponse("stream chunk contains no choices".to_string()))?;

    Ok(candidate_response(
        choice.index,
        choice.delta.content.unwrap_or_default(),
        choice.finish_reason,
    ))
}

fn candidate_response(
    index: u32,
    text: String,
    finish_reason: Option<String>,
) -> GenerateContentResponse {
    GenerateContentResponse {
        candidates: vec![Candidate {
            index,
            content: Content {
                role: Role::Model,
                parts: vec![Part::Text { text }],
            },
            finish_reason,
            safety_ratings: Vec::new(),
            citation_metadata: None,
        }],
        prompt_feedback: None,
    }
}
