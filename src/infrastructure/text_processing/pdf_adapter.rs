use std::time::Duration;

use async_trait::async_trait;
use lopdf::Document as PdfDocument;

use crate::application::ports::{FileLoader, FileLoaderError};
use crate::domain::{Document, DocumentFormat};

use super::text_sanitizer::sanitize_extracted_text;

const EXTRACTION_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Default)]
pub struct PdfAdapter;

impl PdfAdapter {
    pub fn new() -> Self {
        Self
    }

    /// One entry per page, in page order. Pages without a decodable text
    /// layer yield an empty string so indices stay aligned with page numbers.
    fn extract_pages(data: &[u8]) -> Result<Vec<String>, String> {
        let doc = PdfDocument::load_mem(data).map_err(|e| format!("failed to parse PDF: {e}"))?;

        let pages = doc
            .get_pages()
            .keys()
            .map(|&page_number| match doc.extract_text(&[page_number]) {
                Ok(text) => sanitize_extracted_text(&text),
                Err(e) => {
                    tracing::debug!(page_number, error = %e, "Page has no extractable text");
                    String::new()
                }
            })
            .collect();

        Ok(pages)
    }
}

#[async_trait]
impl FileLoader for PdfAdapter {
    #[tracing::instrument(
        skip(self, data),
        fields(
            document_id = %document.id.as_uuid(),
            filename = %document.filename,
        )
    )]
    async fn extract_text(
        &self,
        data: &[u8],
        document: &Document,
    ) -> Result<String, FileLoaderError> {
        if document.format != DocumentFormat::Pdf {
            return Err(FileLoaderError::UnsupportedFormat(
                document.format.extension().to_string(),
            ));
        }

        let owned = data.to_vec();

        let pages = tokio::time::timeout(
            EXTRACTION_TIMEOUT,
            tokio::task::spawn_blocking(move || Self::extract_pages(&owned)),
        )
        .await
        .map_err(|_| FileLoaderError::extraction(document, "PDF extraction timed out"))?
        .map_err(|e| FileLoaderError::extraction(document, format!("task join error: {e}")))?
        .map_err(|reason| FileLoaderError::extraction(document, reason))?;

        let empty_pages = pages.iter().filter(|p| p.is_empty()).count();
        tracing::info!(
            page_count = pages.len(),
            empty_pages,
            "PDF text extraction complete"
        );

        Ok(pages.join("\n"))
    }
}
