//! Application state for the chat server

use std::sync::Arc;

use crate::config::ChatConfig;
use crate::error::Result;
use crate::generation::CompletionGateway;
use crate::ingestion::{DocumentIngestor, NativeExtractor, TextExtractor};
use crate::providers::{CompletionProvider, OpenAiClient};
use crate::store::{self, ContextStore};

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    /// Configuration
    config: ChatConfig,
    /// Exchanges and documents shared by every request
    store: Arc<dyn ContextStore>,
    /// Question path
    gateway: CompletionGateway,
    /// Upload path
    ingestor: DocumentIngestor,
}

impl AppState {
    /// Create state from configuration: configured store, OpenAI client, native extractors
    pub fn new(config: ChatConfig) -> Result<Self> {
        tracing::info!("Initializing chat application state...");

        let store = store::open(&config.store)?;
        tracing::info!("Context store initialized ({})", store.name());

        let provider = Arc::new(OpenAiClient::new(&config.llm)?);
        tracing::info!(
            "Completion client initialized ({} at {})",
            config.llm.model,
            config.llm.base_url
        );

        Self::from_parts(config, store, provider, Arc::new(NativeExtractor))
    }

    /// Create state from explicit collaborators
    pub fn from_parts(
        config: ChatConfig,
        store: Arc<dyn ContextStore>,
        provider: Arc<dyn CompletionProvider>,
        extractor: Arc<dyn TextExtractor>,
    ) -> Result<Self> {
        let gateway = CompletionGateway::new(
            Arc::clone(&store),
            provider,
            config.llm.system_prompt.clone(),
            config.context.budget.clone(),
        );
        let ingestor = DocumentIngestor::new(Arc::clone(&store), extractor, config.uploads.dir.clone())?;
        tracing::info!("Uploads spooled to {}", ingestor.upload_dir().display());

        Ok(Self {
            inner: Arc::new(AppStateInner {
                config,
                store,
                gateway,
                ingestor,
            }),
        })
    }

    /// Get configuration
    pub fn config(&self) -> &ChatConfig {
        &self.inner.config
    }

    /// Get the context store
    pub fn store(&self) -> &Arc<dyn ContextStore> {
        &self.inner.store
    }

    /// Get the completion gateway
    pub fn gateway(&self) -> &CompletionGateway {
        &self.inner.gateway
    }

    /// Get the document ingestor
    pub fn ingestor(&self) -> &DocumentIngestor {
        &self.inner.ingestor
    }
}
