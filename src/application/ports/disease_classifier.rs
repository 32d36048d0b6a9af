use async_trait::async_trait;

use crate::domain::DiseaseCode;

/// Maps free medical text to standardized diagnostic codes.
#[async_trait]
pub trait DiseaseClassifier: Send + Sync {
    async fn classify(&self, query: &str) -> Result<Vec<DiseaseCode>, ClassifierError>;
}

#[derive(Debug, thiserror::Error)]
pub enum ClassifierError {
    #[error("authentication failed: {0}")]
    Authentication(String),
    #[error("api request failed: {0}")]
    ApiRequestFailed(String),
    #[error("invalid response: {0}")]
    InvalidResponse(String),
}
