use std::fmt;

/// Kind of upload, each with its own extension allow-list and storage prefix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UploadCategory {
    Document,
    Image,
}

const DOCUMENT_EXTENSIONS: &[&str] = &["pdf", "doc", "docx", "xlsx", "xls"];
const IMAGE_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "gif"];

impl UploadCategory {
    pub fn allowed_extensions(&self) -> &'static [&'static str] {
        match self {
            Self::Document => DOCUMENT_EXTENSIONS,
            Self::Image => IMAGE_EXTENSIONS,
        }
    }

    /// Case-insensitive membership test against the allow-list.
    pub fn allows(&self, extension: &str) -> bool {
        let extension = extension.to_ascii_lowercase();
        self.allowed_extensions().contains(&extension.as_str())
    }

    pub fn dir_name(&self) -> &'static str {
        match self {
            Self::Document => "documents",
            Self::Image => "images",
        }
    }
}

impl fmt::Display for UploadCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.dir_name())
    }
}
