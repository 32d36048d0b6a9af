use std::fmt;

use super::StoragePath;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExtractionStatus {
    Success,
    UnsupportedFormat,
    ExtractionFailed,
}

impl ExtractionStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Success => "success",
            Self::UnsupportedFormat => "unsupported_format",
            Self::ExtractionFailed => "extraction_failed",
        }
    }
}

impl fmt::Display for ExtractionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Plain text pulled out of a stored upload. Lives only for one analysis call.
#[derive(Debug, Clone, PartialEq)]
pub struct ExtractedDocument {
    pub source: StoragePath,
    pub text: String,
    pub status: ExtractionStatus,
}

impl ExtractedDocument {
    pub fn success(source: StoragePath, text: String) -> Self {
        Self {
            source,
            text,
            status: ExtractionStatus::Success,
        }
    }

    pub fn has_text(&self) -> bool {
        !self.text.trim().is_empty()
    }
}
