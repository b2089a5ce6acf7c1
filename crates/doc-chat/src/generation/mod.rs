//! Prompt assembly and the completion gateway

mod context;
mod gateway;

pub use context::{build_user_turn, ContextBudget, ContextBuilder};
pub use gateway::CompletionGateway;
