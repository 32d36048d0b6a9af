use chrono::{DateTime, Utc};

use super::storage_path::is_safe_char;
use super::{DocumentId, StoragePath, UploadCategory};

#[derive(Debug, Clone, PartialEq)]
pub struct UploadedFile {
    pub id: DocumentId,
    pub original_filename: String,
    pub sanitized_filename: String,
    pub content_type: Option<String>,
    pub category: UploadCategory,
    pub storage_path: StoragePath,
    pub size_bytes: u64,
    pub stored_at: DateTime<Utc>,
}

/// Reduces an untrusted client filename to a single safe path component.
///
/// Directory components are dropped (both separators), characters outside
/// `[A-Za-z0-9._-]` become `_`, dot runs collapse to one dot, and leading
/// dots and underscores are stripped. Returns `None` when nothing usable
/// remains.
pub fn sanitize_filename(raw: &str) -> Option<String> {
    let last_component = raw.rsplit(['/', '\\']).next().unwrap_or(raw).trim();

    let mut sanitized = String::with_capacity(last_component.len());
    let mut prev_was_dot = false;

    for c in last_component.chars() {
        let c = if is_safe_char(c) { c } else { '_' };
        if c == '.' {
            if prev_was_dot {
                continue;
            }
            prev_was_dot = true;
        } else {
            prev_was_dot = false;
        }
        sanitized.push(c);
    }

    let sanitized = sanitized.trim_start_matches(['.', '_']).to_string();

    let stem = sanitized.rsplit_once('.').map_or(sanitized.as_str(), |(s, _)| s);
    if stem.is_empty() {
        return None;
    }

    Some(sanitized)
}

/// Lowercase extension after the last dot, if any.
pub fn file_extension(filename: &str) -> Option<String> {
    let (stem, ext) = filename.rsplit_once('.')?;
    if stem.is_empty() || ext.is_empty() {
        return None;
    }
    Some(ext.to_ascii_lowercase())
}
