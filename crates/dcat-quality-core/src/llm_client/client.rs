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

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, error};

use super::config::LlmConfig;
use super::models::{ChatRequest, Message};
use crate::errors::LlmResult;

/// Transport to a chat-completion endpoint
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LlmClient: Send + Sync {
    /// Send one request and return the first choice's message content
    async fn chat_completion(&self, request: &ChatRequest) -> LlmResult<String>;
}

/// Boundary between the analysis code and the completion endpoint.
///
/// Every call sends the configured system instruction followed by the prompt
/// as the user message. Transport failures are logged and turned into `None`;
/// callers treat `None` as an ordinary outcome. No retries.
#[derive(Clone)]
pub struct LlmGateway {
    client: Arc<dyn LlmClient>,
    system_message: String,
    model: String,
    temperature: f32,
    max_tokens: u32,
}

impl LlmGateway {
    pub fn new(client: Arc<dyn LlmClient>, config: &LlmConfig) -> Self {
        Self {
            client,
            system_message: config.persona.message().to_string(),
            model: config.model.clone(),
            temperature: config.temperature,
            max_tokens: config.max_tokens,
        }
    }

    pub fn with_system_message(mut self, system_message: impl Into<String>) -> Self {
        self.system_message = system_message.into();
        self
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    pub fn request_for(&self, prompt: &str) -> ChatRequest {
        ChatRequest {
            model: self.model.clone(),
            temperature: self.temperature,
            max_tokens: self.max_tokens,
            messages: vec![
                Message::system(self.system_message.clone()),
                Message::user(prompt),
            ],
        }
    }

    /// Reply text, or `None` if the call failed for any reason
    pub async fn complete(&self, prompt: &str) -> Option<String> {
        let request = self.request_for(prompt);
        debug!(
            "Sending completion request to {} ({} prompt bytes)",
            self.model,
            prompt.len()
        );

        match self.client.chat_completion(&request).await {
            Ok(reply) => Some(reply),
            Err(e) => {
                error!("Completion request to {} failed: {}", self.model, e);
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::LlmError;
    use crate::prompts::system::{SystemPersona, STATISTICS_OFFICE_SYSTEM_MESSAGE};
    use mockall::predicate::*;

    fn gateway(mock: MockLlmClient) -> LlmGateway {
        LlmGateway::new(Arc::new(mock), &LlmConfig::default())
    }

    #[tokio::test]
    async fn test_complete_returns_reply_text() {
        let mut mock = MockLlmClient::new();
        mock.expect_chat_completion()
            .times(1)
            .returning(|_| Ok("<dateninhalt>Gut.</dateninhalt>".to_string()));

        let reply = gateway(mock).complete("Analysiere").await;
        assert_eq!(reply.as_deref(), Some("<dateninhalt>Gut.</dateninhalt>"));
    }

    #[tokio::test]
    async fn test_complete_sends_system_then_user_message() {
        let expected = ChatRequest {
            model: "gpt-4o".to_string(),
            temperature: 0.5,
            max_tokens: 4096,
            messages: vec![
                Message::system("You are a helpful assistant."),
                Message::user("Titel: Kühe"),
            ],
        };
        let mut mock = MockLlmClient::new();
        mock.expect_chat_completion()
            .with(eq(expected))
            .times(1)
            .returning(|_| Ok(String::new()));

        assert_eq!(gateway(mock).complete("Titel: Kühe").await, Some(String::new()));
    }

    #[tokio::test]
    async fn test_timeout_becomes_none() {
        let mut mock = MockLlmClient::new();
        mock.expect_chat_completion().times(1).returning(|_| {
            Err(LlmError::Timeout {
                message: "no response after 120s".to_string(),
            })
        });

        assert_eq!(gateway(mock).complete("Analysiere").await, None);
    }

    #[tokio::test]
    async fn test_auth_failure_becomes_none_without_retry() {
        let mut mock = MockLlmClient::new();
        mock.expect_chat_completion().times(1).returning(|_| {
            Err(LlmError::Authentication {
                message: "invalid api key".to_string(),
            })
        });

        assert_eq!(gateway(mock).complete("Analysiere").await, None);
    }

    #[test]
    fn test_persona_selects_system_message() {
        let config = LlmConfig::default().with_persona(SystemPersona::StatisticsOffice);
        let gateway = LlmGateway::new(Arc::new(MockLlmClient::new()), &config);
        let request = gateway.request_for("x");
        assert_eq!(request.messages[0].content, STATISTICS_OFFICE_SYSTEM_MESSAGE);
        assert_eq!(request.messages[1], Message::user("x"));
    }

    #[test]
    fn test_custom_system_message_and_parameters() {
        let config = LlmConfig::default()
            .with_model("gpt-4o-mini".to_string())
            .with_temperature(0.0)
            .with_max_tokens(512);
        let gateway = LlmGateway::new(Arc::new(MockLlmClient::new()), &config)
            .with_system_message("Sei kritisch.");
        let request = gateway.request_for("x");
        assert_eq!(request.model, "gpt-4o-mini");
        assert_eq!(request.temperature, 0.0);
        assert_eq!(request.max_tokens, 512);
        assert_eq!(request.messages[0], Message::system("Sei kritisch."));
    }
}
