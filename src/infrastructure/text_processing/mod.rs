mod composite_file_loader;
mod docx_adapter;
mod pdf_adapter;
mod spreadsheet_adapter;
mod text_sanitizer;

pub use composite_file_loader::CompositeFileLoader;
pub use docx_adapter::DocxAdapter;
pub use pdf_adapter::PdfAdapter;
pub use spreadsheet_adapter::SpreadsheetAdapter;
pub use text_sanitizer::sanitize_extracted_text;
