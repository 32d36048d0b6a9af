use super::{ConversationId, Message};
use chrono::{DateTime, Utc};

#[derive(Debug, Clone)]
pub struct Conversation {
    pub id: ConversationId,
    pub messages: Vec<Message>,
    pub created_at: DateTime<Utc>,
    pub last_active_at: DateTime<Utc>,
}

impl Conversation {
    pub fn new() -> Self {
        let now = Utc::now();
        Self {
            id: ConversationId::new(),
            messages: Vec::new(),
            created_at: now,
            last_active_at: now,
        }
    }

    pub fn push(&mut self, message: Message) {
        self.last_active_at = message.created_at.max(self.last_active_at);
        self.messages.push(message);
    }

    pub fn is_idle_since(&self, cutoff: DateTime<Utc>) -> bool {
        self.last_active_at < cutoff
    }
}

impl Default for Conversation {
    fn default() -> Self {
        Self::new()
    }
}
