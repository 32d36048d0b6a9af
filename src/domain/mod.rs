mod analysis;
mod conversation;
mod conversation_id;
mod document;
mod extracted_document;
mod message;
mod message_id;
mod message_role;
mod storage_path;
mod upload_category;
mod uploaded_file;

pub use analysis::{AnalysisResult, DiseaseCode, ReportStatus};
pub use conversation::Conversation;
pub use conversation_id::ConversationId;
pub use document::{Document, DocumentFormat, DocumentId};
pub use extracted_document::{ExtractedDocument, ExtractionStatus};
pub use message::Message;
pub use message_id::MessageId;
pub use message_role::MessageRole;
pub use storage_path::{InvalidStoragePath, StoragePath};
pub use upload_category::UploadCategory;
pub use uploaded_file::{UploadedFile, file_extension, sanitize_filename};
