mod analyze;
mod chat;
mod error;
mod health;
mod upload;

pub use analyze::{AnalyzeRequest, AnalyzeResponse, analyze_handler};
pub use chat::{ChatRequest, ChatResponse, SESSION_ID_HEADER, chat_handler};
pub use error::ErrorResponse;
pub use health::health_handler;
pub use upload::{
    DocumentUploadResponse, ImageUploadResponse, upload_document_handler, upload_image_handler,
};
