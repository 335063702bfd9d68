//! genbridge - generic content generation over OpenAI-compatible backends
//!
//! Callers build conversations from vendor-neutral turns and receive
//! candidate responses back, either as one result or as a live stream of
//! partial results. Which backend serves the call is hidden behind the
//! [`generator::ContentGenerator`] trait; this crate ships the adapter for
//! OpenAI-compatible chat completion APIs.

pub mod error;
pub mod generator;
pub mod mock;
pub mod models;
pub mod openai;

pub use error::{Error, Result};
pub use generator::{ContentGenerator, ResponseStream};
pub use mock::MockContentGenerator;
pub use openai::OpenAiContentGenerator;
