//! Error handling and custom error types
//!
//! Provides unified error handling across the crate using thiserror.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Unsupported role: {0}")]
    UnsupportedRole(String),

    #[error("Turn contains no parts")]
    EmptyTurn,

    #[error("Unsupported content part: {0}")]
    UnsupportedPart(String),

    #[error("Backend API error (status {status}): {body}")]
    BackendHttp { status: u16, body: String },

    #[error("Malformed backend response: {0}")]
    MalformedResponse(String),

    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
