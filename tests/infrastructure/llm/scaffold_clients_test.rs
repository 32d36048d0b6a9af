use std::time::Duration;

use medlens::application::ports::{ChatModel, LlmClient};
use medlens::domain::{ConversationId, Message, ReportStatus};
use medlens::infrastructure::llm::{ScaffoldChatModel, ScaffoldLlmClient};

#[tokio::test]
async fn given_history_when_scaffold_replies_then_echoes_last_user_turn() {
    let id = ConversationId::new();
    let history = vec![
        Message::user(id, "first"),
        Message::assistant(id, "Echo: first"),
        Message::user(id, "second"),
    ];

    let reply = ScaffoldChatModel::new(Duration::ZERO)
        .reply(&history)
        .await
        .unwrap();

    assert_eq!(reply, "Echo: second");
}

#[tokio::test]
async fn given_report_when_scaffold_completes_then_answer_carries_classification() {
    let answer = ScaffoldLlmClient::new(Duration::ZERO)
        .complete("prompt", "abc")
        .await
        .unwrap();

    assert!(answer.contains("3 characters"));
    assert_eq!(
        ReportStatus::from_completion(&answer),
        Some(ReportStatus::Normal)
    );
}
