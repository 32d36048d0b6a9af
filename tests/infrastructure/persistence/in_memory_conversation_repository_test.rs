use chrono::{Duration, Utc};

use medlens::application::ports::{ConversationRepository, RepositoryError};
use medlens::domain::{Conversation, ConversationId, Message};
use medlens::infrastructure::persistence::InMemoryConversationRepository;

#[tokio::test]
async fn given_created_conversation_when_fetching_then_found() {
    let repository = InMemoryConversationRepository::new();
    let conversation = Conversation::new();

    repository.create_conversation(&conversation).await.unwrap();

    let found = repository.get_conversation(conversation.id).await.unwrap();
    assert_eq!(found.map(|c| c.id), Some(conversation.id));
}

#[tokio::test]
async fn given_duplicate_id_when_creating_then_constraint_violation() {
    let repository = InMemoryConversationRepository::new();
    let conversation = Conversation::new();
    repository.create_conversation(&conversation).await.unwrap();

    let result = repository.create_conversation(&conversation).await;

    assert!(matches!(result, Err(RepositoryError::DuplicateConversation(_))));
}

#[tokio::test]
async fn given_unknown_conversation_when_appending_then_not_found() {
    let repository = InMemoryConversationRepository::new();

    let result = repository
        .append_message(&Message::user(ConversationId::new(), "hi"))
        .await;

    assert!(matches!(result, Err(RepositoryError::ConversationNotFound(_))));
}

#[tokio::test]
async fn given_long_history_when_limiting_then_newest_returned_oldest_first() {
    let repository = InMemoryConversationRepository::new();
    let conversation = Conversation::new();
    repository.create_conversation(&conversation).await.unwrap();
    for i in 0..5 {
        repository
            .append_message(&Message::user(conversation.id, format!("m{i}")))
            .await
            .unwrap();
    }

    let messages = repository.get_messages(conversation.id, 2).await.unwrap();

    let contents: Vec<_> = messages.iter().map(|m| m.content.as_str()).collect();
    assert_eq!(contents, vec!["m3", "m4"]);
}

#[tokio::test]
async fn given_mixed_activity_when_evicting_then_only_idle_removed() {
    let repository = InMemoryConversationRepository::new();
    let mut idle = Conversation::new();
    idle.last_active_at = Utc::now() - Duration::hours(3);
    let active = Conversation::new();
    repository.create_conversation(&idle).await.unwrap();
    repository.create_conversation(&active).await.unwrap();

    let evicted = repository
        .evict_idle(Utc::now() - Duration::hours(1))
        .await
        .unwrap();

    assert_eq!(evicted, 1);
    assert!(repository.get_conversation(idle.id).await.unwrap().is_none());
    assert!(repository.get_conversation(active.id).await.unwrap().is_some());
}
