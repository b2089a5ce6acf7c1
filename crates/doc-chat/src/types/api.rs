//! Request and response bodies for the HTTP interface

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::record::Document;

/// Acknowledgement returned for every accepted upload
pub const UPLOAD_SUCCESS_MESSAGE: &str = "File uploaded successfully";

/// POST /ask body
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AskRequest {
    /// The user's message
    #[serde(default)]
    pub message: String,
}

/// POST /ask reply
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AskResponse {
    pub reply: String,
}

/// POST /upload reply
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct UploadResponse {
    pub message: String,
    /// Characters of text extracted from the file
    pub length: usize,
}

impl UploadResponse {
    pub fn success(length: usize) -> Self {
        Self {
            message: UPLOAD_SUCCESS_MESSAGE.to_string(),
            length,
        }
    }
}

/// Entry in GET /documents
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct DocumentSummary {
    pub name: String,
    pub length: usize,
    pub ingested_at: DateTime<Utc>,
}

impl From<&Document> for DocumentSummary {
    fn from(doc: &Document) -> Self {
        Self {
            name: doc.name.clone(),
            length: doc.char_len(),
            ingested_at: doc.ingested_at,
        }
    }
}
