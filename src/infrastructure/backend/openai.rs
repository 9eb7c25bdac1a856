//! OpenAI-compatible chat-completions backend

use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::{debug, warn};

use crate::application::ports::{BackendError, TextBackend};
use crate::domain::config::BackendSettings;
use crate::domain::transform::TransformRequest;

use super::{error_detail, transport_error};

/// Request timeout for the hosted API
pub const HOSTED_TIMEOUT: Duration = Duration::from_secs(30);

const BACKEND: &str = "OpenAI";

/// Option keys that would clobber the request's own content
const PROTECTED_KEYS: &[&str] = &["messages"];

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: Option<ChoiceMessage>,
}

#[derive(Debug, Deserialize)]
struct ChoiceMessage {
    content: Option<String>,
}

/// Hosted chat-completions backend (OpenAI or any compatible server)
pub struct HostedApiBackend {
    api_key: Option<String>,
    base_url: String,
    timeout: Duration,
    client: reqwest::Client,
}

impl HostedApiBackend {
    /// Create a backend from resolved settings
    pub fn new(settings: &BackendSettings) -> Self {
        Self {
            api_key: settings.hosted_api_key().map(str::to_string),
            base_url: settings.hosted_base_url().to_string(),
            timeout: HOSTED_TIMEOUT,
            client: reqwest::Client::new(),
        }
    }

    /// Override the request timeout
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    fn endpoint(&self) -> String {
        format!("{}/chat/completions", self.base_url)
    }

    /// `{model, messages: [system, user], ...options}`.
    /// Options may override `model` but never `messages`.
    fn build_body(request: &TransformRequest<'_>) -> Value {
        let shortcut = request.shortcut();
        let messages = [
            ChatMessage {
                role: "system",
                content: shortcut.prompt(),
            },
            ChatMessage {
                role: "user",
                content: request.text(),
            },
        ];

        let mut body = Map::new();
        body.insert("model".to_string(), Value::from(shortcut.model()));
        body.insert("messages".to_string(), serde_json::json!(messages));

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

    fn extract_text(response: ChatCompletionResponse) -> Option<String> {
        response
            .choices
            .into_iter()
            .next()?
            .message?
            .content
    }
}

#[async_trait]
impl TextBackend for HostedApiBackend {
    async fn transform(&self, request: &TransformRequest<'_>) -> Result<String, BackendError> {
        // Fail before any network traffic when no usable key is configured
        let api_key = self.api_key.as_deref().ok_or(BackendError::MissingApiKey)?;
        if self.base_url.is_empty() {
            return Err(BackendError::MissingBaseUrl { backend: BACKEND });
        }

        let body = Self::build_body(request);
        debug!(
            model = request.shortcut().model(),
            chars = request.char_count(),
            "sending chat completion request"
        );

        let response = self
            .client
            .post(self.endpoint())
            .bearer_auth(api_key)
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

        let parsed: ChatCompletionResponse =
            response.json().await.map_err(|e| BackendError::ParseError {
                backend: BACKEND,
                message: e.to_string(),
            })?;

        let text = Self::extract_text(parsed).ok_or_else(|| BackendError::ParseError {
            backend: BACKEND,
            message: "response has no choices[0].message.content".to_string(),
        })?;

        Ok(text.trim().to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::shortcut::{BackendKind, BackendOptions, ShortcutDefinition};
    use serde_json::json;

    fn shortcut(options: BackendOptions) -> ShortcutDefinition {
        ShortcutDefinition::new(
            "grammar",
            "ctrl+e".parse().unwrap(),
            BackendKind::HostedApi,
            "gpt-4o",
            "Fix grammar.",
            options,
        )
    }

    #[test]
    fn body_has_system_and_user_messages() {
        let shortcut = shortcut(BackendOptions::new());
        let request = TransformRequest::new("teh cat", &shortcut);

        let body = HostedApiBackend::build_body(&request);

        assert_eq!(
            body,
            json!({
                "model": "gpt-4o",
                "messages": [
                    {"role": "system", "content": "Fix grammar."},
                    {"role": "user", "content": "teh cat"}
                ]
            })
        );
    }

    #[test]
    fn options_merge_at_top_level() {
        let mut options = BackendOptions::new();
        options.insert("temperature".to_string(), json!(0.3));
        options.insert("model".to_string(), json!("gpt-4o-mini"));
        options.insert("messages".to_string(), json!([]));
        let shortcut = shortcut(options);
        let request = TransformRequest::new("x", &shortcut);

        let body = HostedApiBackend::build_body(&request);

        assert_eq!(body["temperature"], json!(0.3));
        assert_eq!(body["model"], json!("gpt-4o-mini"));
        assert_eq!(body["messages"].as_array().unwrap().len(), 2);
    }

    #[test]
    fn endpoint_appends_path() {
        let settings = BackendSettings::new(None, "http://localhost:8080/v1/", "http://x");
        let backend = HostedApiBackend::new(&settings);
        assert_eq!(backend.endpoint(), "http://localhost:8080/v1/chat/completions");
    }

    #[test]
    fn extract_text_takes_first_choice() {
        let response: ChatCompletionResponse = serde_json::from_value(json!({
            "choices": [
                {"message": {"content": "first"}},
                {"message": {"content": "second"}}
            ]
        }))
        .unwrap();
        assert_eq!(HostedApiBackend::extract_text(response).as_deref(), Some("first"));

        let empty: ChatCompletionResponse = serde_json::from_value(json!({})).unwrap();
        assert!(HostedApiBackend::extract_text(empty).is_none());
    }
}
