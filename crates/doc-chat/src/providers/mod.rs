//! Completion service providers
//!
//! The gateway talks to the completion service only through
//! [`CompletionProvider`], so the remote API can be swapped or faked.

pub mod completion;
pub mod openai;

pub use completion::{CompletionProvider, CompletionRequest};
pub use openai::OpenAiClient;
