use crate::domain::ConversationId;

#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("conversation not found: {0}")]
    ConversationNotFound(ConversationId),
    #[error("conversation already exists: {0}")]
    DuplicateConversation(ConversationId),
}
