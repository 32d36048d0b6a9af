use std::collections::HashMap;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::RwLock;
use tracing::instrument;

use crate::application::ports::{ConversationRepository, RepositoryError};
use crate::domain::{Conversation, ConversationId, Message};

/// Process-local conversation store keyed by session id.
#[derive(Default)]
pub struct InMemoryConversationRepository {
    conversations: RwLock<HashMap<ConversationId, Conversation>>,
}

impl InMemoryConversationRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.conversations.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.conversations.read().await.is_empty()
    }
}

#[async_trait]
impl ConversationRepository for InMemoryConversationRepository {
    #[instrument(skip(self, conversation), fields(conversation_id = %conversation.id))]
    async fn create_conversation(
        &self,
        conversation: &Conversation,
    ) -> Result<(), RepositoryError> {
        let mut conversations = self.conversations.write().await;
        if conversations.contains_key(&conversation.id) {
            return Err(RepositoryError::DuplicateConversation(conversation.id));
        }
        conversations.insert(conversation.id, conversation.clone());
        Ok(())
    }

    async fn get_conversation(
        &self,
        id: ConversationId,
    ) -> Result<Option<Conversation>, RepositoryError> {
        Ok(self.conversations.read().await.get(&id).cloned())
    }

    #[instrument(skip(self, message), fields(conversation_id = %message.conversation_id, role = %message.role))]
    async fn append_message(&self, message: &Message) -> Result<(), RepositoryError> {
        let mut conversations = self.conversations.write().await;
        let conversation = conversations
            .get_mut(&message.conversation_id)
            .ok_or_else(|| RepositoryError::ConversationNotFound(message.conversation_id))?;
        conversation.push(message.clone());
        Ok(())
    }

    async fn get_messages(
        &self,
        conversation_id: ConversationId,
        limit: usize,
    ) -> Result<Vec<Message>, RepositoryError> {
        let conversations = self.conversations.read().await;
        let conversation = conversations
            .get(&conversation_id)
            .ok_or_else(|| RepositoryError::ConversationNotFound(conversation_id))?;

        let skip = conversation.messages.len().saturating_sub(limit);
        Ok(conversation.messages[skip..].to_vec())
    }

    async fn evict_idle(&self, cutoff: DateTime<Utc>) -> Result<usize, RepositoryError> {
        let mut conversations = self.conversations.write().await;
        let before = conversations.len();
        conversations.retain(|_, conversation| !conversation.is_idle_since(cutoff));
        Ok(before - conversations.len())
    }
}
