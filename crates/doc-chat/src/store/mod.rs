//! Append-only store for past exchanges and ingested documents
//!
//! The store is created once at start-up and shared by every request.
//! Entries are never removed or rewritten; readers see insertion order.

mod json_file;
mod memory;

pub use json_file::JsonFileStore;
pub use memory::MemoryStore;

use std::sync::Arc;

use crate::config::StoreConfig;
use crate::error::Result;
use crate::types::{ContextSnapshot, Document, QaPair};

/// Backing store for conversation context
pub trait ContextStore: Send + Sync {
    /// Record a completed exchange
    fn append_exchange(&self, exchange: QaPair) -> Result<()>;

    /// Record an ingested document
    fn append_document(&self, document: Document) -> Result<()>;

    /// Copy of all exchanges and documents, in insertion order
    fn snapshot(&self) -> ContextSnapshot;

    /// All documents, in insertion order
    fn documents(&self) -> Vec<Document>;

    /// Number of recorded exchanges
    fn exchange_count(&self) -> usize;

    /// Number of ingested documents
    fn document_count(&self) -> usize;

    /// Backend name for logging
    fn name(&self) -> &str;
}

/// Open the store selected by configuration
pub fn open(config: &StoreConfig) -> Result<Arc<dyn ContextStore>> {
    let store: Arc<dyn ContextStore> = match config {
        StoreConfig::Memory => Arc::new(MemoryStore::new()),
        StoreConfig::JsonFile { path } => Arc::new(JsonFileStore::open(path)?),
    };
    Ok(store)
}
