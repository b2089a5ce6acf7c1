//! Question endpoint

use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};

use crate::error::{Error, Result};
use crate::server::state::AppState;
use crate::types::{AskRequest, AskResponse};

/// POST /ask - Answer a message using the stored context
pub async fn ask(
    State(state): State<AppState>,
    payload: std::result::Result<Json<AskRequest>, JsonRejection>,
) -> Result<Json<AskResponse>> {
    let Json(request) = payload.map_err(|e| Error::InvalidRequest(e.body_text()))?;

    tracing::info!("Received: {}", request.message);

    match state.gateway().ask(&request.message).await {
        Ok(reply) => {
            tracing::info!("Reply: {}", reply);
            Ok(Json(AskResponse { reply }))
        }
        Err(e) => {
            match &e {
                Error::EmptyMessage => tracing::warn!("Rejected empty message"),
                other => tracing::error!("Completion failed: {}", other),
            }
            Err(e)
        }
    }
}
