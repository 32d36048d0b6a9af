use std::sync::Arc;

use crate::application::ports::{FileLoader, LlmClient};
use crate::application::services::{AnalysisService, ChatService, UploadService};

pub struct AppState<F, L: ?Sized>
where
    F: FileLoader,
    L: LlmClient,
{
    pub upload_service: Arc<UploadService>,
    pub analysis_service: Arc<AnalysisService<F, L>>,
    pub chat_service: Arc<ChatService>,
}

impl<F, L: ?Sized> Clone for AppState<F, L>
where
    F: FileLoader,
    L: LlmClient,
{
    fn clone(&self) -> Self {
        Self {
            upload_service: Arc::clone(&self.upload_service),
            analysis_service: Arc::clone(&self.analysis_service),
            chat_service: Arc::clone(&self.chat_service),
        }
    }
}
