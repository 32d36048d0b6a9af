use async_trait::async_trait;

use crate::domain::Document;

/// Produces plain text from the raw bytes of one document format.
#[async_trait]
pub trait FileLoader: Send + Sync {
    async fn extract_text(
        &self,
        data: &[u8],
        document: &Document,
    ) -> Result<String, FileLoaderError>;
}

#[derive(Debug, thiserror::Error)]
pub enum FileLoaderError {
    #[error("unsupported format: {0}")]
    UnsupportedFormat(String),
    #[error("extraction failed for {file}: {reason}")]
    ExtractionFailed { file: String, reason: String },
}

impl FileLoaderError {
    pub fn extraction(document: &Document, reason: impl Into<String>) -> Self {
        Self::ExtractionFailed {
            file: document.filename.clone(),
            reason: reason.into(),
        }
    }
}
