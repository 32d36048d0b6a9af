use std::io;
use std::sync::Arc;

use bytes::Bytes;
use chrono::Utc;
use futures::stream::BoxStream;

use crate::application::ports::{UploadStore, UploadStoreError};
use crate::domain::{
    DocumentId, StoragePath, UploadCategory, UploadedFile, file_extension, sanitize_filename,
};

/// Validates and persists single-file uploads.
pub struct UploadService {
    store: Arc<dyn UploadStore>,
}

/// Outcome of validating a client filename, before any byte is written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AcceptedName {
    pub original: String,
    pub sanitized: String,
    pub extension: String,
}

impl UploadService {
    pub fn new(store: Arc<dyn UploadStore>) -> Self {
        Self { store }
    }

    /// Checks presence, sanitizes, and matches the extension against the
    /// category allow-list.
    pub fn validate(
        &self,
        category: UploadCategory,
        original_filename: Option<&str>,
    ) -> Result<AcceptedName, UploadError> {
        let original = original_filename
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .ok_or(UploadError::MissingFile)?;

        let sanitized = sanitize_filename(original).ok_or(UploadError::MissingFile)?;

        let extension = file_extension(&sanitized).unwrap_or_default();
        if !category.allows(&extension) {
            return Err(UploadError::UnsupportedType {
                category,
                extension,
            });
        }

        Ok(AcceptedName {
            original: original.to_string(),
            sanitized,
            extension,
        })
    }

    #[tracing::instrument(skip(self, category, stream), fields(category = %category))]
    pub async fn receive(
        &self,
        category: UploadCategory,
        original_filename: Option<&str>,
        content_type: Option<&str>,
        stream: BoxStream<'_, Result<Bytes, io::Error>>,
    ) -> Result<UploadedFile, UploadError> {
        let accepted = self.validate(category, original_filename)?;

        let id = DocumentId::new();
        let storage_path = StoragePath::new(category, &id, &accepted.sanitized);

        let size_bytes = self
            .store
            .store(&storage_path, stream)
            .await
            .map_err(|e| match e {
                UploadStoreError::Io(io_err) if io_err.kind() == io::ErrorKind::FileTooLarge => {
                    UploadError::TooLarge
                }
                UploadStoreError::Io(io_err) => UploadError::InvalidBody(io_err.to_string()),
                other => UploadError::Storage(other),
            })?;

        tracing::info!(
            path = %storage_path,
            original = %accepted.original,
            bytes = size_bytes,
            "Upload stored"
        );

        Ok(UploadedFile {
            id,
            original_filename: accepted.original,
            sanitized_filename: accepted.sanitized,
            content_type: content_type.map(str::to_string),
            category,
            storage_path,
            size_bytes,
            stored_at: Utc::now(),
        })
    }
}

#[derive(Debug, thiserror::Error)]
pub enum UploadError {
    #[error("no file provided")]
    MissingFile,
    #[error("file type '{extension}' is not allowed for {category}")]
    UnsupportedType {
        category: UploadCategory,
        extension: String,
    },
    #[error("upload exceeds the size limit")]
    TooLarge,
    #[error("failed to read upload body: {0}")]
    InvalidBody(String),
    #[error("storage: {0}")]
    Storage(UploadStoreError),
}
