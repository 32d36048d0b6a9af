use std::io;
use std::path::{Path, PathBuf};

use bytes::Bytes;
use futures::TryStreamExt;
use futures::stream::BoxStream;
use object_store::local::LocalFileSystem;
use object_store::path::Path as ObjectKey;
use object_store::{MultipartUpload, ObjectStore, PutPayload};

use crate::application::ports::{UploadStore, UploadStoreError};
use crate::domain::StoragePath;

/// Keeps uploads as plain files below `root`, one file per storage key.
///
/// `object_store` stages multipart writes in a sibling temp file and renames it
/// into place on `complete`, so a key only appears once fully written.
pub struct LocalUploadStore {
    fs: LocalFileSystem,
    root: PathBuf,
}

fn upload_failed(error: object_store::Error) -> UploadStoreError {
    UploadStoreError::UploadFailed(error.to_string())
}

impl LocalUploadStore {
    /// Creates `root` if it does not exist yet.
    pub fn new(root: PathBuf) -> Result<Self, UploadStoreError> {
        std::fs::create_dir_all(&root)?;
        let fs = LocalFileSystem::new_with_prefix(&root).map_err(upload_failed)?;
        Ok(Self { fs, root })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn key(path: &StoragePath) -> Result<ObjectKey, UploadStoreError> {
        ObjectKey::parse(path.as_str())
            .map_err(|e| UploadStoreError::UploadFailed(format!("invalid key {}: {}", path, e)))
    }

    /// Copies every non-empty chunk into `upload` and returns the byte count.
    async fn copy_parts(
        upload: &mut dyn MultipartUpload,
        stream: &mut BoxStream<'_, Result<Bytes, io::Error>>,
    ) -> Result<u64, UploadStoreError> {
        let mut written = 0u64;
        while let Some(chunk) = stream.try_next().await? {
            if chunk.is_empty() {
                continue;
            }
            written += chunk.len() as u64;
            upload
                .put_part(PutPayload::from(chunk))
                .await
                .map_err(upload_failed)?;
        }
        Ok(written)
    }
}

#[async_trait::async_trait]
impl UploadStore for LocalUploadStore {
    #[tracing::instrument(skip(self, stream), fields(path = %path))]
    async fn store(
        &self,
        path: &StoragePath,
        mut stream: BoxStream<'_, Result<Bytes, io::Error>>,
    ) -> Result<u64, UploadStoreError> {
        let key = Self::key(path)?;
        let mut upload = self.fs.put_multipart(&key).await.map_err(upload_failed)?;

        match Self::copy_parts(upload.as_mut(), &mut stream).await {
            Ok(written) => {
                upload.complete().await.map_err(upload_failed)?;
                tracing::debug!(bytes = written, "Upload persisted");
                Ok(written)
            }
            Err(error) => {
                if let Err(abort_error) = upload.abort().await {
                    tracing::warn!(error = %abort_error, "Could not discard staged upload");
                }
                Err(error)
            }
        }
    }

    async fn fetch(&self, path: &StoragePath) -> Result<Vec<u8>, UploadStoreError> {
        let key = Self::key(path)?;
        let bytes = match self.fs.get(&key).await {
            Ok(found) => found.bytes().await,
            Err(error) => Err(error),
        }
        .map_err(|error| match error {
            object_store::Error::NotFound { .. } => UploadStoreError::NotFound(path.to_string()),
            other => UploadStoreError::DownloadFailed(other.to_string()),
        })?;

        Ok(bytes.to_vec())
    }

    async fn exists(&self, path: &StoragePath) -> Result<bool, UploadStoreError> {
        match self.fs.head(&Self::key(path)?).await {
            Ok(_) => Ok(true),
            Err(object_store::Error::NotFound { .. }) => Ok(false),
            Err(error) => Err(UploadStoreError::DownloadFailed(error.to_string())),
        }
    }
}
