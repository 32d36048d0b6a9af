use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::application::ports::{ChatModel, ChatModelError};
use crate::domain::{Message, MessageRole};
use crate::infrastructure::http::{RetryPolicy, send_with_retry};

/// Gemini `generateContent` chat backend. The API is stateless, so the full
/// history is resent on every call.
pub struct GeminiChatModel {
    client: Client,
    base_url: String,
    api_key: String,
    model: String,
    system_instruction: Option<String>,
    retry: RetryPolicy,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest<'a> {
    contents: Vec<Content<'a>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    system_instruction: Option<SystemInstruction<'a>>,
}

#[derive(Serialize)]
struct Content<'a> {
    role: &'static str,
    parts: Vec<Part<'a>>,
}

#[derive(Serialize)]
struct SystemInstruction<'a> {
    parts: Vec<Part<'a>>,
}

#[derive(Serialize)]
struct Part<'a> {
    text: &'a str,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
    #[serde(default)]
    prompt_feedback: Option<PromptFeedback>,
}

#[derive(Deserialize)]
struct Candidate {
    #[serde(default)]
    content: Option<CandidateContent>,
}

#[derive(Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Deserialize)]
struct CandidatePart {
    #[serde(default)]
    text: Option<String>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct PromptFeedback {
    #[serde(default)]
    block_reason: Option<String>,
}

fn wire_role(role: MessageRole) -> &'static str {
    match role {
        MessageRole::User => "user",
        MessageRole::Assistant => "model",
    }
}

impl GeminiChatModel {
    pub fn new(
        client: Client,
        base_url: &str,
        api_key: String,
        model: String,
        system_instruction: Option<String>,
        retry: RetryPolicy,
    ) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key,
            model,
            system_instruction,
            retry,
        }
    }
}

#[async_trait]
impl ChatModel for GeminiChatModel {
    #[tracing::instrument(skip(self, history), fields(model = %self.model, turns = history.len()))]
    async fn reply(&self, history: &[Message]) -> Result<String, ChatModelError> {
        let request_body = GenerateContentRequest {
            contents: history
                .iter()
                .map(|m| Content {
                    role: wire_role(m.role),
                    parts: vec![Part { text: &m.content }],
                })
                .collect(),
            system_instruction: self.system_instruction.as_deref().map(|text| SystemInstruction {
                parts: vec![Part { text }],
            }),
        };

        let url = format!("{}/models/{}:generateContent", self.base_url, self.model);
        let response = send_with_retry(&self.retry, || {
            self.client
                .post(&url)
                .header("x-goog-api-key", &self.api_key)
                .json(&request_body)
        })
        .await
        .map_err(|e| ChatModelError::ApiRequestFailed(e.to_string()))?;

        if response.status() == reqwest::StatusCode::TOO_MANY_REQUESTS {
            return Err(ChatModelError::RateLimited);
        }

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(ChatModelError::ApiRequestFailed(format!(
                "HTTP {}: {}",
                status, body
            )));
        }

        let generated: GenerateContentResponse = response
            .json()
            .await
            .map_err(|e| ChatModelError::InvalidResponse(e.to_string()))?;

        if let Some(reason) = generated.prompt_feedback.and_then(|f| f.block_reason) {
            return Err(ChatModelError::Blocked(reason));
        }

        let text: String = generated
            .candidates
            .into_iter()
            .next()
            .and_then(|c| c.content)
            .map(|c| c.parts.into_iter().filter_map(|p| p.text).collect::<String>())
            .unwrap_or_default();

        if text.trim().is_empty() {
            return Err(ChatModelError::InvalidResponse(
                "no text in first candidate".to_string(),
            ));
        }

        Ok(text)
    }
}
