//! Generic content-generation capability interface.
//!
//! Callers depend on [`ContentGenerator`] only; which backend serves the
//! request is an implementation detail of the adapter they were handed.

use crate::models::{
    CountTokensResponse, EmbedContentResponse, GenerateContentRequest, GenerateContentResponse,
};
use crate::Result;
use async_trait::async_trait;
use futures_util::Stream;
use std::pin::Pin;

/// Lazy, single-pass, non-restartable sequence of partial responses.
///
/// Produced by [`ContentGenerator::generate_content_stream`]. Dropping the
/// stream cancels the underlying call.
pub type ResponseStream = Pin<Box<dyn Stream<Item = Result<GenerateContentResponse>> + Send>>;

#[async_trait]
pub trait ContentGenerator: Send + Sync {
    /// Runs one generation call and returns the complete response.
    async fn generate_content(
        &self,
        request: GenerateContentRequest,
    ) -> Result<GenerateContentResponse>;

    /// Runs one generation call and returns incremental partial responses.
    ///
    /// Request construction and HTTP-level failures surface from this method;
    /// the returned stream only carries per-fragment results.
    async fn generate_content_stream(
        &self,
        request: GenerateContentRequest,
    ) -> Result<ResponseStream>;

    /// Token counting. Adapters without backend support return
    /// `{ total_tokens: 0 }` without contacting the network.
    async fn count_tokens(&self, request: GenerateContentRequest) -> Result<CountTokensResponse>;

    /// Embedding generation. Adapters without backend support return an
    /// empty embedding list without contacting the network.
    async fn embed_content(
        &self,
        request: GenerateContentRequest,
    ) -> Result<EmbedContentResponse>;
}
