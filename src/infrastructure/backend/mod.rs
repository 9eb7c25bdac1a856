//! Language-model backends
//!
//! One adapter per backend kind, plus a router that picks the adapter
//! named by the request's shortcut.

mod ollama;
mod openai;

use std::time::Duration;

use async_trait::async_trait;
use serde_json::Value;

pub use ollama::{LocalApiBackend, LOCAL_TIMEOUT};
pub use openai::{HostedApiBackend, HOSTED_TIMEOUT};

use crate::application::ports::{BackendError, TextBackend};
use crate::domain::config::BackendSettings;
use crate::domain::shortcut::BackendKind;
use crate::domain::transform::TransformRequest;

/// Longest error body quoted back to the user
const MAX_DETAIL_CHARS: usize = 200;

/// Map a reqwest send error to a backend error
pub(crate) fn transport_error(
    backend: &'static str,
    timeout: Duration,
    error: reqwest::Error,
) -> BackendError {
    if error.is_timeout() {
        BackendError::Timeout {
            backend,
            secs: timeout.as_secs(),
        }
    } else {
        BackendError::RequestFailed {
            backend,
            message: error.to_string(),
        }
    }
}

/// Human-readable detail from an error response body.
///
/// Understands `{"error": {"message": ...}}` (OpenAI) and
/// `{"error": "..."}` (Ollama); anything else is quoted, truncated.
pub(crate) fn error_detail(body: &str) -> String {
    if let Ok(json) = serde_json::from_str::<Value>(body) {
        if let Some(message) = error_message(&json["error"]) {
            return message;
        }
    }

    let body = body.trim();
    if body.chars().count() > MAX_DETAIL_CHARS {
        let cut: String = body.chars().take(MAX_DETAIL_CHARS).collect();
        format!("{}...", cut)
    } else if body.is_empty() {
        "empty response body".to_string()
    } else {
        body.to_string()
    }
}

/// Message of an `error` value shaped `"..."` or `{"message": "..."}`
pub(crate) fn error_message(error: &Value) -> Option<String> {
    match error {
        Value::String(message) => Some(message.clone()),
        Value::Object(error) => error
            .get("message")
            .and_then(Value::as_str)
            .map(str::to_string),
        _ => None,
    }
}

/// Dispatches each request to the backend of its shortcut
pub struct BackendRouter<H, L>
where
    H: TextBackend,
    L: TextBackend,
{
    hosted: H,
    local: L,
}

impl<H: TextBackend, L: TextBackend> BackendRouter<H, L> {
    pub fn new(hosted: H, local: L) -> Self {
        Self { hosted, local }
    }
}

impl BackendRouter<HostedApiBackend, LocalApiBackend> {
    /// Router over the HTTP backends
    pub fn from_settings(settings: &BackendSettings) -> Self {
        Self::new(
            HostedApiBackend::new(settings),
            LocalApiBackend::new(settings),
        )
    }
}

#[async_trait]
impl<H: TextBackend, L: TextBackend> TextBackend for BackendRouter<H, L> {
    async fn transform(&self, request: &TransformRequest<'_>) -> Result<String, BackendError> {
        match request.shortcut().backend() {
            BackendKind::HostedApi => self.hosted.transform(request).await,
            BackendKind::LocalApi => self.local.transform(request).await,
        }
    }
}
