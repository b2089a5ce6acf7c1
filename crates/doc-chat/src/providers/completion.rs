//! Completion provider trait

use async_trait::async_trait;

use crate::error::Result;
use crate::types::Message;

/// One request to the completion service: a system turn and a user turn
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompletionRequest {
    /// Fixed instruction
    pub system: String,
    /// Context followed by the user's message
    pub user: String,
}

impl CompletionRequest {
    pub fn new(system: impl Into<String>, user: impl Into<String>) -> Self {
        Self {
            system: system.into(),
            user: user.into(),
        }
    }

    /// Turns in the order they are sent
    pub fn messages(&self) -> Vec<Message> {
        vec![Message::system(&self.system), Message::user(&self.user)]
    }
}

/// Remote chat-completion service
///
/// Implementations make exactly one attempt per call. Failures are reported
/// as `Error::UpstreamCompletionFailure` carrying the service's message.
#[async_trait]
pub trait CompletionProvider: Send + Sync {
    /// Send the request and return the reply text
    async fn complete(&self, request: &CompletionRequest) -> Result<String>;

    /// Provider name for logging
    fn name(&self) -> &str;

    /// Model identifier sent with each request
    fn model(&self) -> &str;
}
