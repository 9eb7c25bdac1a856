//! Ollama generate-API backend

use std::time::Duration;

use async_trait::async_trait;
use serde_json::{Map, Value};
use tracing::{debug, warn};

use crate::application::ports::{BackendError, TextBackend};
use crate::domain::config::BackendSettings;
use crate::domain::transform::TransformRequest;

use super::{error_detail, error_message, transport_error};

/// Request timeout for the local API; local models can be slow to load
pub const LOCAL_TIMEOUT: Duration = Duration::from_secs(60);

const BACKEND: &str = "Ollama";

const PROTECTED_KEYS: &[&str] = &["prompt", "stream"];

/// Local generate-API backend (Ollama)
pub struct LocalApiBackend {
    base_url: String,
    timeout: Duration,
    client: reqwest::Client,
}

impl LocalApiBackend {
    /// Create a backend from resolved settings
    pub fn new(settings: &BackendSettings) -> Self {
        Self {
            base_url: settings.local_base_url().to_string(),
            timeout: LOCAL_TIMEOUT,
            client: reqwest::Client::new(),
        }
    }

    /// Override the request timeout
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    fn endpoint(&self) -> String {
        format!("{}/api/generate", self.base_url)
    }

    /// Prompt and text joined into a single generate prompt
    fn full_prompt(prompt: &str, text: &str) -> String {
        format!("{}\n\nText to process:\n{}", prompt, text)
    }

    /// `{model, prompt, stream: false, ...options}`.
    /// Options may not override `prompt` or `stream`.
    fn build_body(request: &TransformRequest<'_>) -> Value {
        let shortcut = request.shortcut();

        let mut body = Map::new();
        body.insert("model".to_string(), Value::from(shortcut.model()));
        body.insert(
            "prompt".to_string(),
            Value::from(Self::full_prompt(shortcut.prompt(), request.text())),
        );
        body.insert("stream".to_string(), Value::Bool(false));

        for (key, value) in shortcut.options() {
            if PROTECTED_KEYS.contains(&key.as_str()) {
                warn!(
                    shortcut = shortcut.id(),
                    option = %key,
                    "ignoring option that would replace the request content"
                );
                continue;
            }
            body.insert(key.clone(), value.clone());
        }

        Value::Object(body)
    }
}

#[async_trait]
impl TextBackend for LocalApiBackend {
    async fn transform(&self, request: &TransformRequest<'_>) -> Result<String, BackendError> {
        if self.base_url.is_empty() {
            return Err(BackendError::MissingBaseUrl { backend: BACKEND });
        }

        let body = Self::build_body(request);
        debug!(
            model = request.shortcut().model(),
            chars = request.char_count(),
            "sending generate request"
        );

        let response = self
            .client
            .post(self.endpoint())
            .timeout(self.timeout)
            .json(&body)
            .send()
            .await
            .map_err(|e| transport_error(BACKEND, self.timeout, e))?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            return Err(BackendError::HttpStatus {
                backend: BACKEND,
                status: status.as_u16(),
                detail: error_detail(&text),
            });
        }

        let parsed: Value = response.json().await.map_err(|e| BackendError::ParseError {
            backend: BACKEND,
            message: e.to_string(),
        })?;

        // Any `error` key fails the run, even a null one
        if let Some(error) = parsed.get("error") {
            return Err(BackendError::Upstream {
                backend: BACKEND,
                message: error_message(error).unwrap_or_else(|| error.to_string()),
            });
        }

        // A missing `response` field is treated as empty output
        let text = parsed
            .get("response")
            .and_then(Value::as_str)
            .unwrap_or_default();
        Ok(text.trim().to_string())
    }
}
