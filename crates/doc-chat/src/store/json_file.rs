//! JSON-file backed store

use parking_lot::RwLock;
use std::fs;
use std::path::{Path, PathBuf};

use super::ContextStore;
use crate::error::{Error, Result};
use crate::types::{ContextSnapshot, Document, QaPair};

/// Context store mirrored to a JSON file after every append
///
/// The file is rewritten in full on each append. An append whose write fails
/// is rolled back, so memory and disk never disagree.
pub struct JsonFileStore {
    path: PathBuf,
    data: RwLock<ContextSnapshot>,
}

impl JsonFileStore {
    /// Open the store at `path`, loading existing contents if the file exists
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();

        let data = if path.exists() {
            let content = fs::read_to_string(&path)?;
            serde_json::from_str::<ContextSnapshot>(&content).map_err(|e| {
                Error::Config(format!("Corrupt context store {}: {}", path.display(), e))
            })?
        } else {
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                fs::create_dir_all(parent)?;
            }
            ContextSnapshot::default()
        };

        tracing::info!(
            "Loaded context store {} ({} exchanges, {} documents)",
            path.display(),
            data.exchanges.len(),
            data.documents.len()
        );

        Ok(Self {
            path,
            data: RwLock::new(data),
        })
    }

    /// Location of the backing file
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn persist(&self, data: &ContextSnapshot) -> Result<()> {
        let content = serde_json::to_string_pretty(data)?;
        fs::write(&self.path, content)?;
        Ok(())
    }
}

impl ContextStore for JsonFileStore {
    fn append_exchange(&self, exchange: QaPair) -> Result<()> {
        let mut data = self.data.write();
        data.exchanges.push(exchange);
        if let Err(e) = self.persist(&data) {
            data.exchanges.pop();
            tracing::error!("Failed to save context store: {}", e);
            return Err(e);
        }
        Ok(())
    }

    fn append_document(&self, document: Document) -> Result<()> {
        let mut data = self.data.write();
        data.documents.push(document);
        if let Err(e) = self.persist(&data) {
            data.documents.pop();
            tracing::error!("Failed to save context store: {}", e);
            return Err(e);
        }
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
        "json_file"
    }
}
