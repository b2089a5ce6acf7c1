//! API routes for the chat server

pub mod ask;
pub mod documents;
pub mod upload;

use axum::{
    extract::{DefaultBodyLimit, State},
    routing::{get, post},
    Json, Router,
};

use crate::server::state::AppState;

/// Build the chat routes
pub fn chat_routes(max_upload_size: usize) -> Router<AppState> {
    Router::new()
        .route("/ask", post(ask::ask))
        .route(
            "/upload",
            post(upload::upload_file).layer(DefaultBodyLimit::max(max_upload_size)),
        )
        .route("/documents", get(documents::list_documents))
}

/// Service info endpoint
pub async fn info(State(state): State<AppState>) -> Json<serde_json::Value> {
    let config = state.config();
    Json(serde_json::json!({
        "name": "doc-chat",
        "version": env!("CARGO_PKG_VERSION"),
        "description": "Chat with uploaded documents and past answers as context",
        "provider": state.gateway().provider().name(),
        "model": state.gateway().provider().model(),
        "context_budget": config.context.budget,
        "store": state.store().name(),
        "exchanges": state.store().exchange_count(),
        "documents": state.store().document_count(),
        "endpoints": {
            "POST /ask": "Ask a question with stored context",
            "POST /upload": "Upload a .txt, .pdf, .docx or .doc file as context",
            "GET /documents": "List ingested documents",
            "GET /health": "Health check"
        }
    }))
}
