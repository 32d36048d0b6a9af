use std::sync::Arc;

use crate::application::ports::{
    ChatModel, ChatModelError, ConversationRepository, RepositoryError,
};
use crate::domain::{Conversation, ConversationId, Message, MessageRole};

#[derive(Debug, Clone, PartialEq)]
pub struct ChatReply {
    pub session_id: ConversationId,
    pub reply: String,
}

/// Multi-turn chat. Each session keeps its own history of alternating
/// user/assistant turns; the model sees a bounded window of it that starts
/// with a user turn and ends with the new message.
pub struct ChatService {
    chat_model: Arc<dyn ChatModel>,
    conversation_repository: Arc<dyn ConversationRepository>,
    max_history_messages: usize,
}

impl ChatService {
    pub fn new(
        chat_model: Arc<dyn ChatModel>,
        conversation_repository: Arc<dyn ConversationRepository>,
        max_history_messages: usize,
    ) -> Self {
        Self {
            chat_model,
            conversation_repository,
            max_history_messages: max_history_messages.max(1),
        }
    }

    #[tracing::instrument(skip(self, text), fields(session_id = tracing::field::Empty))]
    pub async fn send(
        &self,
        session: Option<ConversationId>,
        text: &str,
    ) -> Result<ChatReply, ChatError> {
        if text.trim().is_empty() {
            return Err(ChatError::EmptyMessage);
        }

        let session_id = self.resolve_session(session).await?;
        tracing::Span::current().record("session_id", tracing::field::display(session_id));

        let user_turn = Message::user(session_id, text);
        let history = self.history_with(session_id, &user_turn).await?;

        let reply = self.chat_model.reply(&history).await.map_err(|e| {
            tracing::error!(error = %e, "Chat backend failed");
            ChatError::Backend(e)
        })?;

        // A turn is stored only together with its reply.
        for message in [user_turn, Message::assistant(session_id, reply.clone())] {
            self.conversation_repository
                .append_message(&message)
                .await
                .map_err(ChatError::Repository)?;
        }

        tracing::info!(turns = history.len() + 1, "Chat reply recorded");

        Ok(ChatReply { session_id, reply })
    }

    /// The newest stored turns plus `pending`, capped at the history limit
    /// and never opening with an assistant turn.
    async fn history_with(
        &self,
        session_id: ConversationId,
        pending: &Message,
    ) -> Result<Vec<Message>, ChatError> {
        let mut history = self
            .conversation_repository
            .get_messages(session_id, self.max_history_messages - 1)
            .await
            .map_err(ChatError::Repository)?;

        let first_user = history
            .iter()
            .position(|m| m.role == MessageRole::User)
            .unwrap_or(history.len());
        history.drain(..first_user);
        history.push(pending.clone());
        Ok(history)
    }

    async fn resolve_session(
        &self,
        requested: Option<ConversationId>,
    ) -> Result<ConversationId, ChatError> {
        if let Some(id) = requested {
            let existing = self
                .conversation_repository
                .get_conversation(id)
                .await
                .map_err(ChatError::Repository)?;
            if existing.is_some() {
                return Ok(id);
            }
            tracing::debug!(requested = %id, "Unknown or expired session, starting a new one");
        }

        let conversation = Conversation::new();
        self.conversation_repository
            .create_conversation(&conversation)
            .await
            .map_err(ChatError::Repository)?;

        tracing::info!(session_id = %conversation.id, "Chat session started");
        Ok(conversation.id)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ChatError {
    #[error("message must not be empty")]
    EmptyMessage,
    #[error("chat backend: {0}")]
    Backend(ChatModelError),
    #[error("conversation store: {0}")]
    Repository(RepositoryError),
}
