//! Error types for the chat service

use axum::{
    extract::multipart::MultipartError,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

/// Result type alias for chat operations
pub type Result<T> = std::result::Result<T, Error>;

/// Chat service errors
#[derive(Debug, Error)]
pub enum Error {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Upload request carried no file part
    #[error("No file uploaded")]
    NoFileProvided,

    /// Extension is not one of txt, pdf, docx, doc
    #[error("Unsupported file type: {0}")]
    UnsupportedFileType(String),

    /// PDF parsed but yielded no text (scanned, image-only or encrypted)
    #[error("Could not extract text from PDF. The file may be scanned, image-based or encrypted")]
    UnreadablePdf,

    /// PDF extractor failed
    #[error("Failed to parse PDF: {0}")]
    PdfParseFailure(String),

    /// Any other ingestion failure (Word extraction, spooling)
    #[error("File processing failed: {0}")]
    GenericIngestionFailure(String),

    /// Completion service failed; carries the upstream message
    #[error("{0}")]
    UpstreamCompletionFailure(String),

    /// Ask with an empty message
    #[error("Message must not be empty")]
    EmptyMessage,

    /// Malformed request body
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// Multipart body could not be read; keeps the status axum assigned
    #[error("Failed to read upload: {message}")]
    Multipart { message: String, status: StatusCode },

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl Error {
    /// Create an upstream completion error
    pub fn upstream(message: impl Into<String>) -> Self {
        Self::UpstreamCompletionFailure(message.into())
    }

    /// Create a generic ingestion error
    pub fn ingestion(message: impl Into<String>) -> Self {
        Self::GenericIngestionFailure(message.into())
    }

    /// Create an internal error
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }

    /// HTTP status for this error
    pub fn status(&self) -> StatusCode {
        match self {
            Error::NoFileProvided
            | Error::UnsupportedFileType(_)
            | Error::UnreadablePdf
            | Error::EmptyMessage
            | Error::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            Error::Multipart { status, .. } => *status,
            Error::Config(_)
            | Error::PdfParseFailure(_)
            | Error::GenericIngestionFailure(_)
            | Error::UpstreamCompletionFailure(_)
            | Error::Io(_)
            | Error::Json(_)
            | Error::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<MultipartError> for Error {
    fn from(err: MultipartError) -> Self {
        Error::Multipart {
            status: err.status(),
            message: err.body_text(),
        }
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = Json(json!({ "error": self.to_string() }));

        (status, body).into_response()
    }
}
