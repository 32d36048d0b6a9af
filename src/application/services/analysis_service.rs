use std::sync::Arc;

use serde::Deserialize;

use crate::application::ports::{
    ClassifierError, DiseaseClassifier, FileLoader, FileLoaderError, LlmClient, LlmClientError,
    UploadStore, UploadStoreError,
};
use crate::domain::{
    AnalysisResult, Document, DocumentFormat, ExtractedDocument, ExtractionStatus,
    InvalidStoragePath, ReportStatus, StoragePath,
};

pub const DEFAULT_ANALYSIS_PROMPT: &str = "You are a medical document assistant. \
Read the report below and summarize the key clinical findings, abnormal values and \
recommended follow-ups in plain language. Finish with exactly one line of the form \
'Classification: Normal', 'Classification: Alert' or \
'Classification: Requires Consultation'.";

/// What to do when the diagnostic-code lookup fails while the completion
/// succeeded.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ClassificationFailurePolicy {
    /// Return the analysis with an empty code list and a degraded flag.
    #[default]
    Degrade,
    /// Fail the whole request.
    Fail,
}

#[derive(Debug, Clone)]
pub struct AnalysisConfig {
    pub system_prompt: String,
    pub max_query_chars: usize,
    pub classification_failure_policy: ClassificationFailurePolicy,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            system_prompt: DEFAULT_ANALYSIS_PROMPT.to_string(),
            max_query_chars: 200,
            classification_failure_policy: ClassificationFailurePolicy::default(),
        }
    }
}

pub struct AnalysisService<F, L>
where
    F: FileLoader,
    L: LlmClient + ?Sized,
{
    file_loader: Arc<F>,
    llm_client: Arc<L>,
    classifier: Arc<dyn DiseaseClassifier>,
    store: Arc<dyn UploadStore>,
    config: AnalysisConfig,
}

impl<F, L> AnalysisService<F, L>
where
    F: FileLoader,
    L: LlmClient + ?Sized,
{
    pub fn new(
        file_loader: Arc<F>,
        llm_client: Arc<L>,
        classifier: Arc<dyn DiseaseClassifier>,
        store: Arc<dyn UploadStore>,
        config: AnalysisConfig,
    ) -> Self {
        Self {
            file_loader,
            llm_client,
            classifier,
            store,
            config,
        }
    }

    /// Resolves a stored upload and returns its plain text.
    #[tracing::instrument(skip(self))]
    pub async fn extract(&self, raw_path: &str) -> Result<ExtractedDocument, AnalysisError> {
        let path = StoragePath::parse(raw_path)?;

        let exists = self
            .store
            .exists(&path)
            .await
            .map_err(AnalysisError::Storage)?;
        if !exists {
            return Err(AnalysisError::FileNotFound(path));
        }

        let extension = path.extension().unwrap_or_default();
        let Some(format) = DocumentFormat::from_extension(&extension) else {
            tracing::warn!(
                path = %path,
                status = %ExtractionStatus::UnsupportedFormat,
                "Refusing to extract unsupported format"
            );
            return Err(AnalysisError::UnsupportedFormat(extension));
        };

        let data = self.store.fetch(&path).await.map_err(|e| match e {
            UploadStoreError::NotFound(_) => AnalysisError::FileNotFound(path.clone()),
            other => AnalysisError::Storage(other),
        })?;

        let document = Document::new(path.file_name().to_string(), format, data.len() as u64);

        let text = match self.file_loader.extract_text(&data, &document).await {
            Ok(text) => text,
            Err(FileLoaderError::UnsupportedFormat(ext)) => {
                tracing::warn!(path = %path, status = %ExtractionStatus::UnsupportedFormat, "No extractor registered");
                return Err(AnalysisError::UnsupportedFormat(ext));
            }
            Err(source) => {
                tracing::error!(
                    path = %path,
                    status = %ExtractionStatus::ExtractionFailed,
                    error = %source,
                    "Text extraction failed"
                );
                return Err(AnalysisError::Extraction { path, source });
            }
        };

        let extracted = ExtractedDocument::success(path, text);
        tracing::info!(
            path = %extracted.source,
            status = %extracted.status,
            chars = extracted.text.len(),
            "Text extracted"
        );
        Ok(extracted)
    }

    /// Extracts a stored report, then runs the completion and the code
    /// lookup concurrently.
    #[tracing::instrument(skip(self))]
    pub async fn analyze(&self, raw_path: &str) -> Result<AnalysisResult, AnalysisError> {
        let extracted = self.extract(raw_path).await?;
        if !extracted.has_text() {
            return Err(AnalysisError::NoTextExtracted(extracted.source));
        }

        let query = classification_query(&extracted.text, self.config.max_query_chars);

        let (completion, classification) = tokio::join!(
            self.llm_client
                .complete(&self.config.system_prompt, &extracted.text),
            self.classifier.classify(&query),
        );

        let summary = completion.map_err(AnalysisError::Completion)?;

        let (disease_codes, classification_degraded) = match classification {
            Ok(codes) => (codes, false),
            Err(e) => match self.config.classification_failure_policy {
                ClassificationFailurePolicy::Degrade => {
                    tracing::warn!(error = %e, "Classification lookup failed, returning analysis without codes");
                    (Vec::new(), true)
                }
                ClassificationFailurePolicy::Fail => {
                    return Err(AnalysisError::Classification(e));
                }
            },
        };

        let status = ReportStatus::from_completion(&summary);

        tracing::info!(
            path = %extracted.source,
            status = ?status,
            codes = disease_codes.len(),
            classification_degraded,
            "Analysis complete"
        );

        Ok(AnalysisResult {
            summary,
            status,
            disease_codes,
            classification_degraded,
        })
    }
}

/// First `max_chars` characters of `text` on one line, cut back to the last
/// word boundary when the cut lands mid-word.
pub fn classification_query(text: &str, max_chars: usize) -> String {
    let flattened = text.split_whitespace().collect::<Vec<_>>().join(" ");
    if flattened.chars().count() <= max_chars {
        return flattened;
    }

    let cut: String = flattened.chars().take(max_chars).collect();
    let next_char = flattened.chars().nth(max_chars);

    if next_char.is_some_and(|c| c != ' ') {
        if let Some(boundary) = cut.rfind(' ') {
            return cut[..boundary].to_string();
        }
    }

    cut.trim_end().to_string()
}

#[derive(Debug, thiserror::Error)]
pub enum AnalysisError {
    #[error(transparent)]
    InvalidPath(#[from] InvalidStoragePath),
    #[error("file not found: {0}")]
    FileNotFound(StoragePath),
    #[error("unsupported file format: '{0}'")]
    UnsupportedFormat(String),
    #[error("storage: {0}")]
    Storage(UploadStoreError),
    #[error("extraction failed for {path}: {source}")]
    Extraction {
        path: StoragePath,
        source: FileLoaderError,
    },
    #[error("no text could be extracted from {0}")]
    NoTextExtracted(StoragePath),
    #[error("completion failed: {0}")]
    Completion(LlmClientError),
    #[error("classification failed: {0}")]
    Classification(ClassifierError),
}

