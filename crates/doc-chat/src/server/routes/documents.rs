//! Document listing endpoint

use axum::{extract::State, Json};

use crate::server::state::AppState;
use crate::types::DocumentSummary;

/// GET /documents - List ingested documents in upload order
pub async fn list_documents(State(state): State<AppState>) -> Json<Vec<DocumentSummary>> {
    let documents = state
        .store()
        .documents()
        .iter()
        .map(DocumentSummary::from)
        .collect();
    Json(documents)
}
