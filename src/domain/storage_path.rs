use std::fmt;

use super::{DocumentId, UploadCategory};

/// Relative key of a stored upload, always resolved beneath the upload root.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct StoragePath(String);

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid storage path: {0}")]
pub struct InvalidStoragePath(pub String);

impl StoragePath {
    /// Builds `<category>/<id>_<filename>`. `sanitized_filename` must already be
    /// a single safe path component.
    pub fn new(category: UploadCategory, id: &DocumentId, sanitized_filename: &str) -> Self {
        Self(format!(
            "{}/{}_{}",
            category.dir_name(),
            id.as_uuid(),
            sanitized_filename
        ))
    }

    /// Accepts a client-supplied key only if every segment is a plain name.
    pub fn parse(raw: &str) -> Result<Self, InvalidStoragePath> {
        let raw = raw.trim();
        let invalid = || InvalidStoragePath(raw.to_string());

        if raw.is_empty() || raw.starts_with('/') || raw.contains('\\') {
            return Err(invalid());
        }

        for segment in raw.split('/') {
            if segment.is_empty() || segment == "." || segment == ".." {
                return Err(invalid());
            }
            if !segment.chars().all(is_safe_char) {
                return Err(invalid());
            }
        }

        Ok(Self(raw.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn file_name(&self) -> &str {
        self.0.rsplit('/').next().unwrap_or(&self.0)
    }

    pub fn extension(&self) -> Option<String> {
        super::file_extension(self.file_name())
    }
}

pub(crate) fn is_safe_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-')
}

impl fmt::Display for StoragePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
