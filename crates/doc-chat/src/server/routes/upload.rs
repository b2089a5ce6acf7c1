//! Document upload endpoint

use axum::{
    extract::{Multipart, State},
    Json,
};

use crate::error::{Error, Result};
use crate::server::state::AppState;
use crate::types::UploadResponse;

/// POST /upload - Extract text from the uploaded file and keep it as context
///
/// The first part carrying a filename is ingested; other parts are ignored.
pub async fn upload_file(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<UploadResponse>> {
    while let Some(field) = multipart.next_field().await? {
        let filename = match field.file_name() {
            Some(name) if !name.is_empty() => name.to_string(),
            _ => continue,
        };

        let data = field.bytes().await?;
        tracing::info!("Processing upload: {} ({} bytes)", filename, data.len());

        return match state.ingestor().ingest(&filename, &data).await {
            Ok(outcome) => Ok(Json(UploadResponse::success(outcome.length))),
            Err(e) => {
                tracing::warn!("Upload '{}' rejected: {}", filename, e);
                Err(e)
            }
        };
    }

    tracing::warn!("Upload request without a file");
    Err(Error::NoFileProvided)
}
