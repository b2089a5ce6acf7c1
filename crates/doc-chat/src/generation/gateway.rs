//! Completion gateway: stored context + new message -> completion service

use std::sync::Arc;

use super::context::{build_user_turn, ContextBudget, ContextBuilder};
use crate::error::{Error, Result};
use crate::providers::{CompletionProvider, CompletionRequest};
use crate::store::ContextStore;
use crate::types::QaPair;

/// Forwards questions upstream with the stored context and records answers
pub struct CompletionGateway {
    store: Arc<dyn ContextStore>,
    provider: Arc<dyn CompletionProvider>,
    system_prompt: String,
    budget: ContextBudget,
}

impl CompletionGateway {
    pub fn new(
        store: Arc<dyn ContextStore>,
        provider: Arc<dyn CompletionProvider>,
        system_prompt: impl Into<String>,
        budget: ContextBudget,
    ) -> Self {
        Self {
            store,
            provider,
            system_prompt: system_prompt.into(),
            budget,
        }
    }

    /// Build the request that `ask(message)` would send right now
    pub fn prepare(&self, message: &str) -> CompletionRequest {
        let snapshot = self.store.snapshot();
        let context =
            ContextBuilder::build_bounded(&self.budget, &snapshot.exchanges, &snapshot.documents);
        CompletionRequest::new(&self.system_prompt, build_user_turn(&context, message))
    }

    /// Ask the completion service and record the exchange on success
    ///
    /// Nothing is recorded when the message is empty or the call fails.
    pub async fn ask(&self, message: &str) -> Result<String> {
        if message.trim().is_empty() {
            return Err(Error::EmptyMessage);
        }

        let request = self.prepare(message);
        tracing::debug!(
            "Sending {} chars to {} ({})",
            request.user.chars().count(),
            self.provider.name(),
            self.provider.model()
        );

        let reply = self.provider.complete(&request).await?;

        self.store.append_exchange(QaPair::new(message, reply.as_str()))?;
        Ok(reply)
    }

    /// Provider in use
    pub fn provider(&self) -> &Arc<dyn CompletionProvider> {
        &self.provider
    }
}
