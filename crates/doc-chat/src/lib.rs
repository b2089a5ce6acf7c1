//! doc-chat: chat back-end with document context
//!
//! Questions are forwarded to an OpenAI-compatible completion API together
//! with every earlier question/answer exchange and the text of uploaded
//! documents. Uploads (.txt, .pdf, .docx, .doc) are reduced to plain text
//! and kept in an append-only context store.

pub mod config;
pub mod error;
pub mod generation;
pub mod ingestion;
pub mod providers;
pub mod server;
pub mod store;
pub mod types;

pub use config::ChatConfig;
pub use error::{Error, Result};
pub use generation::{CompletionGateway, ContextBudget};
pub use ingestion::DocumentIngestor;
pub use store::ContextStore;
pub use types::{Document, QaPair};
