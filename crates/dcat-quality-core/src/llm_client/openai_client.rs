/*
Copyright 2024, Zep Software, Inc.

Licensed under the Apache License, Version 2.0 (the "License");
you may not use this file except in compliance with the License.
You may obtain a copy of the License at

    http://www.apache.org/licenses/LICENSE-2.0

Unless required by applicable law or agreed to in writing, software
distributed under the License is distributed on an "AS IS" BASIS,
WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
See the License for the specific language governing permissions and
limitations under the License.
*/

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use tracing::debug;

use super::client::LlmClient;
use super::config::LlmConfig;
use super::models::{ChatRequest, TokenUsage};
use crate::errors::{LlmError, LlmResult};

#[derive(Debug, Deserialize)]
struct OpenAiChoice {
    message: OpenAiResponseMessage,
    #[serde(default)]
    finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct OpenAiResponseMessage {
    #[serde(default)]
    content: Option<String>,
    #[serde(default)]
    refusal: Option<String>,
}

#[derive(Debug, Deserialize)]
struct OpenAiChatResponse {
    #[serde(default)]
    choices: Vec<OpenAiChoice>,
    #[serde(default)]
    usage: Option<TokenUsage>,
    #[serde(default)]
    error: Option<OpenAiError>,
}

#[derive(Debug, Deserialize)]
struct OpenAiErrorBody {
    error: OpenAiError,
}

#[derive(Debug, Deserialize)]
struct OpenAiError {
    message: String,
    #[serde(rename = "type", default)]
    error_type: Option<String>,
}

/// Chat-completions client for OpenAI-compatible endpoints.
///
/// A missing API key is not a construction error; every call then fails with
/// [`LlmError::Authentication`].
pub struct OpenAiClient {
    http_client: Client,
    base_url: String,
    api_key: Option<String>,
}

impl OpenAiClient {
    pub fn new(config: &LlmConfig) -> LlmResult<Self> {
        let http_client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| LlmError::InvalidConfig {
                message: format!("Failed to create HTTP client: {}", e),
            })?;

        Ok(Self {
            http_client,
            base_url: config.base_url().to_string(),
            api_key: config.api_key.clone().filter(|k| !k.trim().is_empty()),
        })
    }

    fn endpoint(&self) -> String {
        format!("{}/chat/completions", self.base_url)
    }
}

fn map_transport_error(e: reqwest::Error) -> LlmError {
    if e.is_timeout() {
        LlmError::Timeout {
            message: e.to_string(),
        }
    } else {
        LlmError::Http(e)
    }
}

fn status_error(status: StatusCode, body: &str) -> LlmError {
    let message = serde_json::from_str::<OpenAiErrorBody>(body)
        .map(|b| match b.error.error_type {
            Some(kind) => format!("{} ({})", b.error.message, kind),
            None => b.error.message,
        })
        .unwrap_or_else(|_| body.to_string());

    match status {
        StatusCode::TOO_MANY_REQUESTS => LlmError::RateLimit { message },
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => LlmError::Authentication { message },
        StatusCode::REQUEST_TIMEOUT | StatusCode::GATEWAY_TIMEOUT => LlmError::Timeout { message },
        _ => LlmError::Api {
            status: status.as_u16(),
            message,
        },
    }
}

/// First choice's content from a decoded response body
fn first_choice_content(response: OpenAiChatResponse) -> LlmResult<String> {
    if let Some(error) = response.error {
        return Err(LlmError::Api {
            status: StatusCode::OK.as_u16(),
            message: error.message,
        });
    }

    if let Some(usage) = &response.usage {
        debug!(
            "Token usage: {} prompt, {} completion",
            usage.prompt_tokens, usage.completion_tokens
        );
    }

    let choice = response
        .choices
        .into_iter()
        .next()
        .ok_or_else(|| LlmError::EmptyResponse {
            message: "No choices in response".to_string(),
        })?;

    if let Some(refusal) = choice.message.refusal {
        return Err(LlmError::Refusal { message: refusal });
    }

    choice.message.content.ok_or_else(|| LlmError::EmptyResponse {
        message: format!(
            "No content in response (finish reason: {})",
            choice.finish_reason.as_deref().unwrap_or("unknown")
        ),
    })
}

#[async_trait]
impl LlmClient for OpenAiClient {
    async fn chat_completion(&self, request: &ChatRequest) -> LlmResult<String> {
        let api_key = self
            .api_key
            .as_deref()
            .ok_or_else(|| LlmError::Authentication {
                message: "OpenAI API key is not configured".to_string(),
            })?;

        let response = self
            .http_client
            .post(self.endpoint())
            .bearer_auth(api_key)
            .json(request)
            .send()
            .await
            .map_err(map_transport_error)?;

        let status = response.status();
        let body = response.text().await.map_err(map_transport_error)?;

        if !status.is_success() {
            return Err(status_error(status, &body));
        }

        let chat_response: OpenAiChatResponse =
            serde_json::from_str(&body).map_err(|e| LlmError::MalformedBody {
                message: format!("Failed to parse JSON response: {}", e),
            })?;

        first_choice_content(chat_response)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm_client::client::LlmGateway;
    use crate::llm_client::models::Message;
    use std::sync::Arc;
    use std::time::Duration;
    use tokio::net::TcpListener;

    fn request() -> ChatRequest {
        ChatRequest {
            model: "gpt-4o".to_string(),
            temperature: 0.5,
            max_tokens: 4096,
            messages: vec![Message::system("sys"), Message::user("prompt")],
        }
    }

    fn decode(body: &str) -> LlmResult<String> {
        first_choice_content(serde_json::from_str(body).unwrap())
    }

    #[test]
    fn test_request_wire_format() {
        let json = serde_json::to_value(request()).unwrap();
        assert_eq!(json["model"], "gpt-4o");
        assert_eq!(json["max_tokens"], 4096);
        assert_eq!(json["messages"][0]["role"], "system");
        assert_eq!(json["messages"][1]["role"], "user");
        assert_eq!(json["messages"][1]["content"], "prompt");
    }

    #[test]
    fn test_first_choice_content() {
        let body = r#"{
            "choices": [
                {"message": {"role": "assistant", "content": "erste"}, "finish_reason": "stop"},
                {"message": {"role": "assistant", "content": "zweite"}, "finish_reason": "stop"}
            ],
            "usage": {"prompt_tokens": 10, "completion_tokens": 5, "total_tokens": 15}
        }"#;
        assert_eq!(decode(body).unwrap(), "erste");
    }

    #[test]
    fn test_empty_choices_and_missing_content() {
        assert!(matches!(
            decode(r#"{"choices": []}"#),
            Err(LlmError::EmptyResponse { .. })
        ));
        assert!(matches!(
            decode(r#"{"choices": [{"message": {"content": null}, "finish_reason": "length"}]}"#),
            Err(LlmError::EmptyResponse { .. })
        ));
    }

    #[test]
    fn test_refusal() {
        let body = r#"{"choices": [{"message": {"content": null, "refusal": "nein"}}]}"#;
        assert!(matches!(decode(body), Err(LlmError::Refusal { .. })));
    }

    #[test]
    fn test_status_error_mapping() {
        let body = r#"{"error": {"message": "quota exceeded", "type": "insufficient_quota"}}"#;
        match status_error(StatusCode::TOO_MANY_REQUESTS, body) {
            LlmError::RateLimit { message } => {
                assert_eq!(message, "quota exceeded (insufficient_quota)")
            }
            other => panic!("unexpected {:?}", other),
        }
        assert!(matches!(
            status_error(StatusCode::UNAUTHORIZED, "denied"),
            LlmError::Authentication { .. }
        ));
        assert!(matches!(
            status_error(StatusCode::BAD_GATEWAY, "<html>"),
            LlmError::Api { status: 502, .. }
        ));
    }

    #[tokio::test]
    async fn test_missing_api_key_fails_at_call_time() {
        let client = OpenAiClient::new(&LlmConfig::default()).unwrap();
        assert!(matches!(
            client.chat_completion(&request()).await,
            Err(LlmError::Authentication { .. })
        ));

        let gateway = LlmGateway::new(Arc::new(client), &LlmConfig::default());
        assert_eq!(gateway.complete("prompt").await, None);
    }

    #[tokio::test]
    async fn test_hanging_endpoint_times_out() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            let mut open = Vec::new();
            while let Ok((socket, _)) = listener.accept().await {
                open.push(socket);
            }
        });

        let config = LlmConfig::default()
            .with_api_key("sk-test".to_string())
            .with_base_url(format!("http://{}/v1", addr))
            .with_timeout(Duration::from_millis(200));
        let client = OpenAiClient::new(&config).unwrap();

        assert!(matches!(
            client.chat_completion(&request()).await,
            Err(LlmError::Timeout { .. })
        ));

        let gateway = LlmGateway::new(Arc::new(client), &config);
        assert_eq!(gateway.complete("prompt").await, None);
    }
}
