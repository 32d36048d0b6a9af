mod analysis_service;
mod chat_service;
mod session_reaper;
mod upload_service;

pub use analysis_service::{
    AnalysisConfig, AnalysisError, AnalysisService, ClassificationFailurePolicy,
    DEFAULT_ANALYSIS_PROMPT, classification_query,
};
pub use chat_service::{ChatError, ChatReply, ChatService};
pub use session_reaper::SessionReaper;
pub use upload_service::{AcceptedName, UploadError, UploadService};
