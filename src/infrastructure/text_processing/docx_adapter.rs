use async_trait::async_trait;
use docx_rs::{DocumentChild, Paragraph, ParagraphChild, RunChild, read_docx};

use crate::application::ports::{FileLoader, FileLoaderError};
use crate::domain::{Document, DocumentFormat};

use super::text_sanitizer::sanitize_extracted_text;

/// Word (`.docx`) text: one line per body paragraph, in document order.
pub struct DocxAdapter;

impl DocxAdapter {
    fn paragraph_text(paragraph: &Paragraph) -> String {
        let mut out = String::new();
        Self::collect_children(&paragraph.children, &mut out);
        out
    }

    fn collect_children(children: &[ParagraphChild], out: &mut String) {
        for child in children {
            match child {
                ParagraphChild::Run(run) => {
                    for run_child in &run.children {
                        match run_child {
                            RunChild::Text(text) => out.push_str(&text.text),
                            RunChild::Tab(_) => out.push('\t'),
                            RunChild::Break(_) => out.push(' '),
                            _ => {}
                        }
                    }
                }
                ParagraphChild::Hyperlink(link) => Self::collect_children(&link.children, out),
                _ => {}
            }
        }
    }
}

#[async_trait]
impl FileLoader for DocxAdapter {
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
        if document.format != DocumentFormat::Docx {
            return Err(FileLoaderError::UnsupportedFormat(
                document.format.extension().to_string(),
            ));
        }

        let docx = read_docx(data)
            .map_err(|e| FileLoaderError::extraction(document, format!("failed to parse DOCX: {e}")))?;

        let lines: Vec<String> = docx
            .document
            .children
            .iter()
            .filter_map(|child| match child {
                DocumentChild::Paragraph(paragraph) => Some(Self::paragraph_text(paragraph)),
                _ => None,
            })
            .collect();

        tracing::info!(paragraphs = lines.len(), "DOCX text extraction complete");

        Ok(sanitize_extracted_text(&lines.join("\n")))
    }
}
