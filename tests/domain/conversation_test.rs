use chrono::{Duration, Utc};

use medlens::domain::{Conversation, Message, MessageRole};

#[test]
fn given_new_conversation_when_pushing_message_then_history_grows() {
    let mut conversation = Conversation::new();
    conversation.push(Message::user(conversation.id, "Hello"));
    conversation.push(Message::assistant(conversation.id, "Hi there"));

    assert_eq!(conversation.messages.len(), 2);
    assert_eq!(conversation.messages[0].role, MessageRole::User);
    assert_eq!(conversation.messages[1].role, MessageRole::Assistant);
}

#[test]
fn given_recent_activity_when_checking_idle_then_not_idle() {
    let conversation = Conversation::new();
    assert!(!conversation.is_idle_since(Utc::now() - Duration::minutes(5)));
    assert!(conversation.is_idle_since(Utc::now() + Duration::minutes(5)));
}

#[test]
fn given_gemini_role_name_when_parsing_role_then_assistant() {
    assert_eq!("model".parse::<MessageRole>(), Ok(MessageRole::Assistant));
    assert_eq!("USER".parse::<MessageRole>(), Ok(MessageRole::User));
    assert!("system".parse::<MessageRole>().is_err());
}
