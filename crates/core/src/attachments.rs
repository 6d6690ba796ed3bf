//! Pure rules for job file attachments: MIME classification, filename
//! sanitization and object-store key derivation.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::CoreError;
use crate::types::{DbId, Timestamp};

/// Validity window for signed download URLs.
pub const SIGNED_URL_TTL: Duration = Duration::from_secs(60 * 60);

/// Filename used when sanitization leaves nothing usable.
const FALLBACK_FILENAME: &str = "upload";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FileType {
    Photo,
    Document,
}

impl FileType {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Photo => "photo",
            Self::Document => "document",
        }
    }
}

/// Classify a declared MIME type.
///
/// `image/*` is a photo, `application/*` is a document. Everything else
/// (including an empty content type) is rejected.
pub fn classify_mime(mime_type: &str) -> Result<FileType, CoreError> {
    let essence = mime_type
        .split(';')
        .next()
        .unwrap_or("")
        .trim()
        .to_ascii_lowercase();

    if essence.starts_with("image/") && essence.len() > "image/".len() {
        Ok(FileType::Photo)
    } else if essence.starts_with("application/") && essence.len() > "application/".len() {
        Ok(FileType::Document)
    } else {
        Err(CoreError::UnsupportedMediaType(format!(
            "Unsupported file type '{mime_type}'"
        )))
    }
}

/// Strip directory components from a client-supplied filename.
///
/// Both `/` and `\` separators are treated as directory boundaries so a
/// name like `..\..\etc\passwd` cannot escape the job prefix.
pub fn sanitize_filename(original: &str) -> String {
    let base = original
        .rsplit(['/', '\\'])
        .next()
        .unwrap_or("")
        .trim();

    if base.is_empty() || base.chars().all(|c| c == '.') {
        FALLBACK_FILENAME.to_string()
    } else {
        base.to_string()
    }
}

/// Lower-cased extension of a sanitized filename, without the dot.
pub fn file_extension(filename: &str) -> String {
    match filename.rsplit_once('.') {
        Some((stem, ext)) if !stem.is_empty() => ext.to_ascii_lowercase(),
        _ => String::new(),
    }
}

/// Object-store key for an upload.
///
/// `organizations/{org}/jobs/{job}/{file_type}/{micros}_{nonce}_{filename}`.
/// Two uploads of the same name in the same microsecond still differ by
/// `nonce`, so a put never replaces another upload's object.
pub fn storage_key(
    organization_id: DbId,
    job_id: DbId,
    file_type: FileType,
    uploaded_at: Timestamp,
    nonce: Uuid,
    original_filename: &str,
) -> String {
    format!(
        "organizations/{organization_id}/jobs/{job_id}/{}/{}_{}_{}",
        file_type.as_str(),
        uploaded_at.timestamp_micros(),
        nonce.simple(),
        sanitize_filename(original_filename),
    )
}
