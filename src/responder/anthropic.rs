use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::consts::{API_KEY_ENV, DEFAULT_MODEL};

use super::{Responder, ResponderError};

const API_URL: &str = "https://api.anthropic.com/v1/messages";
const API_VERSION: &str = "2023-06-01";
const MAX_TOKENS: u32 = 1024;
const SYSTEM_PROMPT: &str = "You are a helpful assistant. Answer the user's message \
directly and concisely, in the language the message is written in.";

/// A responder that calls the Anthropic Messages API.
pub struct AnthropicResponder {
    client: reqwest::Client,
    model: String,
    api_url: String,
    key_var: String,
}

impl AnthropicResponder {
    pub fn new(model: Option<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            model: model.unwrap_or_else(|| DEFAULT_MODEL.to_string()),
            api_url: API_URL.to_string(),
            key_var: API_KEY_ENV.to_string(),
        }
    }

    /// Send requests somewhere other than the public endpoint (`--api-url`).
    pub fn with_api_url(mut self, url: impl Into<String>) -> Self {
        self.api_url = url.into();
        self
    }

    /// Read the key from a different environment variable.
    pub fn with_key_var(mut self, var: impl Into<String>) -> Self {
        self.key_var = var.into();
        self
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    /// Looked up on every call so a key exported after startup is picked up.
    fn api_key(&self) -> Result<String, ResponderError> {
        match std::env::var(&self.key_var) {
            Ok(key) if !key.trim().is_empty() => Ok(key),
            _ => Err(ResponderError::MissingCredential {
                var: self.key_var.clone(),
            }),
        }
    }

    fn extract_text(resp: ApiResponse) -> Result<String, ResponderError> {
        let text: String = resp
            .content
            .iter()
            .filter_map(|block| {
                if block.content_type == "text" {
                    block.text.as_deref()
                } else {
                    None
                }
            })
            .collect::<Vec<_>>()
            .join("");

        if text.trim().is_empty() {
            return Err(ResponderError::Malformed(
                "response contained no text".to_string(),
            ));
        }

        if let Some(usage) = resp.usage {
            debug!(
                input_tokens = usage.input_tokens,
                output_tokens = usage.output_tokens,
                "anthropic usage"
            );
        }

        Ok(text)
    }
}

#[async_trait]
impl Responder for AnthropicResponder {
    async fn respond(&self, question: &str) -> Result<String, ResponderError> {
        let api_key = self.api_key()?;

        let messages = [Message {
            role: "user",
            content: question,
        }];
        let body = ApiRequest {
            model: &self.model,
            max_tokens: MAX_TOKENS,
            system: SYSTEM_PROMPT,
            messages: &messages,
        };

        let resp = self
            .client
            .post(&self.api_url)
            .header("anthropic-version", API_VERSION)
            .header("content-type", "application/json")
            .header("x-api-key", &api_key)
            .json(&body)
            .send()
            .await?;

        if !resp.status().is_success() {
            let status = resp.status().as_u16();
            let body = resp.text().await.unwrap_or_default();
            return Err(ResponderError::Rejected { status, body });
        }

        let api_resp: ApiResponse = resp
            .json()
            .await
            .map_err(|e| ResponderError::Malformed(e.to_string()))?;

        Self::extract_text(api_resp)
    }
}

// --- API types ---

#[derive(Serialize)]
struct ApiRequest<'a> {
    model: &'a str,
    max_tokens: u32,
    system: &'a str,
    messages: &'a [Message<'a>],
}

#[derive(Serialize)]
struct Message<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Deserialize)]
struct ApiResponse {
    content: Vec<ContentBlock>,
    usage: Option<Usage>,
}

#[derive(Deserialize)]
struct ContentBlock {
    #[serde(rename = "type")]
    content_type: String,
    text: Option<String>,
}

#[derive(Deserialize)]
struct Usage {
    input_tokens: u64,
    output_tokens: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(json: &str) -> ApiResponse {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn default_model_used_when_none() {
        let r = AnthropicResponder::new(None);
        assert_eq!(r.model(), DEFAULT_MODEL);
    }

    #[test]
    fn explicit_model_kept() {
        let r = AnthropicResponder::new(Some("claude-opus-4".to_string()));
        assert_eq!(r.model(), "claude-opus-4");
    }

    #[tokio::test]
    async fn missing_key_fails_before_network() {
        // Unroutable URL: if a request were attempted the error would be Network.
        let r = AnthropicResponder::new(None)
            .with_api_url("http://127.0.0.1:9/v1/messages")
            .with_key_var("LASTWORD_TEST_KEY_THAT_IS_NEVER_SET");
        let err = r.respond("hi").await.unwrap_err();
        assert_eq!(
            err,
            ResponderError::MissingCredential {
                var: "LASTWORD_TEST_KEY_THAT_IS_NEVER_SET".to_string()
            }
        );
    }

    #[test]
    fn extract_joins_text_blocks() {
        let resp = parse(
            r#"{
                "content": [
                    {"type": "text", "text": "Hi "},
                    {"type": "tool_use", "id": "x"},
                    {"type": "text", "text": "there"}
                ],
                "usage": {"input_tokens": 3, "output_tokens": 2}
            }"#,
        );
        assert_eq!(AnthropicResponder::extract_text(resp).unwrap(), "Hi there");
    }

    #[test]
    fn extract_without_usage() {
        let resp = parse(r#"{"content": [{"type": "text", "text": "ok"}]}"#);
        assert_eq!(AnthropicResponder::extract_text(resp).unwrap(), "ok");
    }

    #[test]
    fn extract_empty_content_is_malformed() {
        let resp = parse(r#"{"content": []}"#);
        assert!(matches!(
            AnthropicResponder::extract_text(resp),
            Err(ResponderError::Malformed(_))
        ));
    }

    #[test]
    fn request_serializes_single_user_message() {
        let messages = [Message {
            role: "user",
            content: "Привет",
        }];
        let body = ApiRequest {
            model: "m",
            max_tokens: MAX_TOKENS,
            system: SYSTEM_PROMPT,
            messages: &messages,
        };
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["model"], "m");
        assert_eq!(json["messages"][0]["role"], "user");
        assert_eq!(json["messages"][0]["content"], "Привет");
    }
}
