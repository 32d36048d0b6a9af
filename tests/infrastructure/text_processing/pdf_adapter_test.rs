use lopdf::content::{Content, Operation};
use lopdf::{Object, Stream, dictionary};

use medlens::application::ports::{FileLoader, FileLoaderError};
use medlens::domain::{Document, DocumentFormat};
use medlens::infrastructure::text_processing::PdfAdapter;

/// Builds a PDF with one Courier text line per page. An empty string yields a
/// page with an empty content stream.
fn build_pdf(pages: &[&str]) -> Vec<u8> {
    let mut doc = lopdf::Document::with_version("1.5");
    let pages_id = doc.new_object_id();
    let font_id = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Courier",
    });
    let resources_id = doc.add_object(dictionary! {
        "Font" => dictionary! {
            "F1" => font_id,
        },
    });

    let mut kids: Vec<Object> = Vec::new();
    for text in pages {
        let operations = if text.is_empty() {
            Vec::new()
        } else {
            vec![
                Operation::new("BT", vec![]),
                Operation::new("Tf", vec!["F1".into(), 24.into()]),
                Operation::new("Td", vec![72.into(), 720.into()]),
                Operation::new("Tj", vec![Object::string_literal(*text)]),
                Operation::new("ET", vec![]),
            ]
        };
        let content = Content { operations };
        let content_id = doc.add_object(Stream::new(dictionary! {}, content.encode().unwrap()));
        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "Contents" => content_id,
        });
        kids.push(page_id.into());
    }

    let pages_dict = dictionary! {
        "Type" => "Pages",
        "Count" => kids.len() as i64,
        "Kids" => kids,
        "Resources" => resources_id,
        "MediaBox" => vec![0.into(), 0.into(), 595.into(), 842.into()],
    };
    doc.objects.insert(pages_id, Object::Dictionary(pages_dict));
    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);

    let mut buf = Vec::new();
    doc.save_to(&mut buf).unwrap();
    buf
}

fn pdf_document(size: usize) -> Document {
    Document::new("report.pdf".to_string(), DocumentFormat::Pdf, size as u64)
}

#[tokio::test]
async fn given_single_page_pdf_when_extracting_then_page_text_returned() {
    let data = build_pdf(&["Hemoglobin 13.5 g/dL"]);
    let adapter = PdfAdapter::new();

    let text = adapter
        .extract_text(&data, &pdf_document(data.len()))
        .await
        .unwrap();

    assert!(text.contains("Hemoglobin 13.5 g/dL"), "got {text:?}");
}

#[tokio::test]
async fn given_multi_page_pdf_when_extracting_then_pages_in_order() {
    let data = build_pdf(&["First page", "Second page", "Third page"]);
    let adapter = PdfAdapter::new();

    let text = adapter
        .extract_text(&data, &pdf_document(data.len()))
        .await
        .unwrap();

    let first = text.find("First page").unwrap();
    let second = text.find("Second page").unwrap();
    let third = text.find("Third page").unwrap();
    assert!(first < second && second < third);
}

#[tokio::test]
async fn given_page_without_text_when_extracting_then_blank_line_keeps_page_order() {
    let data = build_pdf(&["First", "", "Third"]);
    let adapter = PdfAdapter::new();

    let text = adapter
        .extract_text(&data, &pdf_document(data.len()))
        .await
        .unwrap();

    assert_eq!(text, "First\n\nThird");
}

#[tokio::test]
async fn given_garbage_bytes_when_extracting_then_extraction_failed() {
    let data = b"this is not a pdf".to_vec();
    let adapter = PdfAdapter::new();

    let result = adapter.extract_text(&data, &pdf_document(data.len())).await;

    match result {
        Err(FileLoaderError::ExtractionFailed { file, .. }) => assert_eq!(file, "report.pdf"),
        other => panic!("expected extraction failure, got {other:?}"),
    }
}

#[tokio::test]
async fn given_non_pdf_document_when_extracting_then_unsupported_format() {
    let adapter = PdfAdapter::new();
    let document = Document::new("sheet.xlsx".to_string(), DocumentFormat::Xlsx, 3);

    let result = adapter.extract_text(b"abc", &document).await;

    assert!(matches!(result, Err(FileLoaderError::UnsupportedFormat(_))));
}
