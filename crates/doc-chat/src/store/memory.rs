//! Process-lifetime in-memory store

use parking_lot::RwLock;

use super::ContextStore;
use crate::error::Result;
use crate::types::{ContextSnapshot, Document, QaPair};

/// In-memory context store; contents are lost when the process exits
#[derive(Default)]
pub struct MemoryStore {
    data: RwLock<ContextSnapshot>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from previously recorded context
    pub fn with_snapshot(snapshot: ContextSnapshot) -> Self {
        Self {
            data: RwLock::new(snapshot),
        }
    }
}

impl ContextStore for MemoryStore {
    fn append_exchange(&self, exchange: QaPair) -> Result<()> {
        self.data.write().exchanges.push(exchange);
        Ok(())
    }

    fn append_document(&self, document: Document) -> Result<()> {
        self.data.write().documents.push(document);
        Ok(())
    }

    fn snapshot(&self) -> ContextSnapshot {
        self.data.read().clone()
    }

    fn documents(&self) -> Vec<Document> {
        self.data.read().documents.clone()
    }

    fn exchange_count(&self) -> usize {
        self.data.read().exchanges.len()
    }

    fn document_count(&self) -> usize {
        self.data.read().documents.len()
    }

    fn name(&self) -> &str {
        "memory"
    }
}
