//! Text backend port interface

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::transform::TransformRequest;

/// Backend errors
#[derive(Debug, Clone, Error)]
pub enum BackendError {
    #[error("OpenAI API key not configured. Set OPENAI_API_KEY or settings.openai_api_key")]
    MissingApiKey,

    #[error("{backend} base URL not configured")]
    MissingBaseUrl { backend: &'static str },

    #[error("{backend} request timed out after {secs}s")]
    Timeout { backend: &'static str, secs: u64 },

    #[error("{backend} request failed: {message}")]
    RequestFailed {
        backend: &'static str,
        message: String,
    },

    #[error("{backend} API error (HTTP {status}): {detail}")]
    HttpStatus {
        backend: &'static str,
        status: u16,
        detail: String,
    },

    #[error("{backend} error: {message}")]
    Upstream {
        backend: &'static str,
        message: String,
    },

    #[error("Failed to parse {backend} response: {message}")]
    ParseError {
        backend: &'static str,
        message: String,
    },
}

/// Port for language-model text transformation
#[async_trait]
pub trait TextBackend: Send + Sync {
    /// Transform the request's text with its shortcut's model and prompt.
    ///
    /// # Returns
    /// The backend's output, trimmed of surrounding whitespace
    async fn transform(&self, request: &TransformRequest<'_>) -> Result<String, BackendError>;
}

/// Blanket implementation for boxed backend types
#[async_trait]
impl TextBackend for Box<dyn TextBackend> {
    async fn transform(&self, request: &TransformRequest<'_>) -> Result<String, BackendError> {
        self.as_ref().transform(request).await
    }
}
