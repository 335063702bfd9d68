//! OpenAI-compatible chat-completion backend adapter.
//!
//! Translates the generic contract in [`crate::models`] to the backend's
//! flat role/text message format, decodes its server-sent-event stream, and
//! exposes everything through [`OpenAiContentGenerator`].

pub mod chat;
pub mod client;
pub mod sse;
pub mod translate;
pub mod types;

pub use chat::OpenAiContentGenerator;
pub use sse::{SseFrame, SseFrameDecoder};
