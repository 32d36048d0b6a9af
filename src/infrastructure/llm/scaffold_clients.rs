use std::time::Duration;

use crate::application::ports::{ChatModel, ChatModelError, LlmClient, LlmClientError};
use crate::domain::{Message, MessageRole};

/// Offline stand-in for the chat backend: echoes the newest user turn.
pub struct ScaffoldChatModel {
    delay: Duration,
}

impl ScaffoldChatModel {
    pub fn new(delay: Duration) -> Self {
        Self { delay }
    }
}

#[async_trait::async_trait]
impl ChatModel for ScaffoldChatModel {
    async fn reply(&self, history: &[Message]) -> Result<String, ChatModelError> {
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }

        let last_user = history
            .iter()
            .rev()
            .find(|m| m.role == MessageRole::User)
            .map(|m| m.content.as_str())
            .unwrap_or_default();

        Ok(format!("Echo: {}", last_user))
    }
}

/// Offline stand-in for the completion API: returns a fixed analysis.
pub struct ScaffoldLlmClient {
    delay: Duration,
}

impl ScaffoldLlmClient {
    pub fn new(delay: Duration) -> Self {
        Self { delay }
    }
}

#[async_trait::async_trait]
impl LlmClient for ScaffoldLlmClient {
    async fn complete(&self, _system_prompt: &str, input: &str) -> Result<String, LlmClientError> {
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }

        Ok(format!(
            "Key findings: scaffold analysis of {} characters of report text.\nClassification: Normal",
            input.chars().count()
        ))
    }
}
