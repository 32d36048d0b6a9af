use std::io::Cursor;

use async_trait::async_trait;

use crate::application::ports::{FileLoader, FileLoaderError};
use crate::domain::{Document, DocumentFormat};

use super::text_sanitizer::sanitize_extracted_text;

/// Flattens every worksheet to tab-separated rows under a `# <sheet>` header.
/// Stored cell values are used as-is; formulas are not evaluated.
pub struct SpreadsheetAdapter;

impl SpreadsheetAdapter {
    fn render(data: &[u8]) -> Result<String, String> {
        let book = umya_spreadsheet::reader::xlsx::read_reader(Cursor::new(data), true)
            .map_err(|e| format!("failed to parse XLSX: {e}"))?;

        let mut lines = Vec::new();

        for sheet in book.get_sheet_collection() {
            lines.push(format!("# {}", sheet.get_name()));

            let (max_col, max_row) = sheet.get_highest_column_and_row();
            for row in 1..=max_row {
                let cells: Vec<String> = (1..=max_col)
                    .map(|col| sheet.get_value((col, row)))
                    .collect();
                let line = cells.join("\t");
                let line = line.trim_end_matches('\t');
                if !line.trim().is_empty() {
                    lines.push(line.to_string());
                }
            }
        }

        Ok(sanitize_extracted_text(&lines.join("\n")))
    }
}

#[async_trait]
impl FileLoader for SpreadsheetAdapter {
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
        if document.format != DocumentFormat::Xlsx {
            return Err(FileLoaderError::UnsupportedFormat(
                document.format.extension().to_string(),
            ));
        }

        let owned = data.to_vec();
        let text = tokio::task::spawn_blocking(move || Self::render(&owned))
            .await
            .map_err(|e| FileLoaderError::extraction(document, format!("task join error: {e}")))?
            .map_err(|reason| FileLoaderError::extraction(document, reason))?;

        tracing::info!(chars = text.len(), "Spreadsheet text extraction complete");

        Ok(text)
    }
}
