//! Core types for the chat service

pub mod api;
pub mod record;

pub use api::{AskRequest, AskResponse, DocumentSummary, UploadResponse};
pub use record::{ContextSnapshot, Document, Message, QaPair, Role};
