use async_trait::async_trait;

use crate::domain::Message;

/// Generative chat endpoint. Receives the whole conversation so far, ending
/// with the newest user turn, and returns the assistant reply.
#[async_trait]
pub trait ChatModel: Send + Sync {
    async fn reply(&self, history: &[Message]) -> Result<String, ChatModelError>;
}

#[derive(Debug, thiserror::Error)]
pub enum ChatModelError {
    #[error("api request failed: {0}")]
    ApiRequestFailed(String),
    #[error("rate limited")]
    RateLimited,
    #[error("invalid response: {0}")]
    InvalidResponse(String),
    #[error("reply blocked: {0}")]
    Blocked(String),
}
