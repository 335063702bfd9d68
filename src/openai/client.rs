use crate::{Error, Result};
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::time::Duration;

pub(crate) const DEFAULT_BASE_URL: &str = "https://api.openai.com";

/// Lightweight HTTP client for an OpenAI-compatible chat completion API.
pub struct OpenAiHttpClient {
    pub(crate) client: Client,
    pub(crate) api_key: String,
    pub(crate) base_url: String,
    timeout: Duration,
}

impl OpenAiHttpClient {
    pub fn new(api_key: String, timeout: Duration) -> Self {
        Self::new_with_client(api_key, timeout, Client::new())
    }

    /// Construct over an existing `reqwest::Client` to share one connection
    /// pool across adapters.
    pub fn new_with_client(api_key: String, timeout: Duration, client: Client) -> Self {
        Self {
            client,
            api_key,
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout,
        }
    }

    pub fn with_base_url(mut self, base_url: String) -> Self {
        self.base_url = base_url;
        self
    }

    fn request(&self, path: &str, request: &impl Serialize) -> reqwest::RequestBuilder {
        let url = format!("{}{}", self.base_url, path);
        self.client
            .post(url)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .json(request)
    }

    async fn check_status(response: reqwest::Response) -> Result<reqwest::Response> {
        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            tracing::error!("Backend API error (status {}): {}", status, body);
            return Err(Error::BackendHttp {
                status: status.as_u16(),
                body,
            });
        }
        Ok(response)
    }

    /// POSTs a JSON body and parses the JSON response.
    ///
    /// The configured timeout covers the whole call: single-shot responses
    /// arrive as one body.
    pub async fn post<Req: Serialize, Resp: DeserializeOwned>(
        &self,
        path: &str,
        request: &Req,
    ) -> Result<Resp> {
        let response = self
            .request(path, request)
            .timeout(self.timeout)
            .send()
            .await
            .map_err(|e| {
                tracing::error!("Failed to send request to backend: {}", e);
                e
            })?;
        let response = Self::check_status(response).await?;

        let body = response.text().await?;
        serde_json::from_str(&body).map_err(|e| {
            tracing::error!("Failed to parse backend response: {}\nBody: {}", e, body);
            Error::MalformedResponse(format!("{e}"))
        })
    }

    /// POSTs a JSON body and returns the raw response so the caller can read
    /// the body incrementally via `bytes_stream()`.
    ///
    /// No overall timeout is applied: a live stream may legitimately stay
    /// open far longer than any single-shot call. Cancellation is dropping
    /// the response.
    pub async fn post_streaming<Req: Serialize>(
        &self,
        path: &str,
        request: &Req,
    ) -> Result<reqwest::Response> {
        let response = self.request(path, request).send().await.map_err(|e| {
            tracing::error!("Failed to send streaming request to backend: {}", e);
            e
        })?;
        Self::check_status(response).await
    }
}
