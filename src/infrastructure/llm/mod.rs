mod gemini_chat_model;
mod openai_client;
mod scaffold_clients;

pub use gemini_chat_model::GeminiChatModel;
pub use openai_client::OpenAiCompletionClient;
pub use scaffold_clients::{ScaffoldChatModel, ScaffoldLlmClient};
