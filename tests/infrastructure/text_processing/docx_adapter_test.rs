use std::io::Cursor;

use docx_rs::{Docx, Paragraph, Run};

use medlens::application::ports::{FileLoader, FileLoaderError};
use medlens::domain::{Document, DocumentFormat};
use medlens::infrastructure::text_processing::DocxAdapter;

fn build_docx(paragraphs: &[&str]) -> Vec<u8> {
    let docx = paragraphs.iter().fold(Docx::new(), |docx, text| {
        docx.add_paragraph(Paragraph::new().add_run(Run::new().add_text(*text)))
    });
    let mut cursor = Cursor::new(Vec::new());
    docx.build().pack(&mut cursor).unwrap();
    cursor.into_inner()
}

fn docx_document(size: usize) -> Document {
    Document::new("letter.docx".to_string(), DocumentFormat::Docx, size as u64)
}

#[tokio::test]
async fn given_paragraphs_when_extracting_then_one_line_each_in_order() {
    let data = build_docx(&["Discharge summary", "Patient stable.", "Follow up in 2 weeks."]);

    let text = DocxAdapter
        .extract_text(&data, &docx_document(data.len()))
        .await
        .unwrap();

    assert_eq!(
        text,
        "Discharge summary\nPatient stable.\nFollow up in 2 weeks."
    );
}

#[tokio::test]
async fn given_split_runs_when_extracting_then_runs_concatenated() {
    let paragraph = Paragraph::new()
        .add_run(Run::new().add_text("Blood "))
        .add_run(Run::new().add_text("pressure normal"));
    let mut cursor = Cursor::new(Vec::new());
    Docx::new()
        .add_paragraph(paragraph)
        .build()
        .pack(&mut cursor)
        .unwrap();
    let data = cursor.into_inner();

    let text = DocxAdapter
        .extract_text(&data, &docx_document(data.len()))
        .await
        .unwrap();

    assert_eq!(text, "Blood pressure normal");
}

#[tokio::test]
async fn given_corrupt_archive_when_extracting_then_extraction_failed() {
    let data = b"PK\x03\x04broken".to_vec();

    let result = DocxAdapter
        .extract_text(&data, &docx_document(data.len()))
        .await;

    assert!(matches!(result, Err(FileLoaderError::ExtractionFailed { .. })));
}
