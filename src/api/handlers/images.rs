use axum::extract::State;
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use bytes::Bytes;
use serde::Serialize;
use std::sync::Arc;

use crate::api::response::{ApiError, JSend};
use crate::blob_store::BlobStoreError;
use crate::AppState;

/// Fixed name for the stored upload. Every upload overwrites the same file,
/// so the blob directory never holds more than one.
pub const UPLOAD_FILENAME: &str = "received_image.jpg";

// ============================================================================
// Types
// ============================================================================

#[derive(Debug, Serialize)]
pub struct UploadImageResponse {
    pub detail: String,
    pub filename: String,
}

// ============================================================================
// Handlers
// ============================================================================

/// POST /images/ -- store a raw image body.
///
/// The blob is written first; the row is only recorded once the bytes are
/// safely on disk, so a row never points at a file that was not written.
pub async fn upload_image(
    State(state): State<Arc<AppState>>,
    body: Bytes,
) -> Result<Json<JSend<UploadImageResponse>>, ApiError> {
    let _guard = state.image_lock.lock().await;

    let byte_size = body.len() as u64;
    state
        .blob_store
        .put(UPLOAD_FILENAME, body)
        .await
        .map_err(|e| ApiError::internal(format!("Failed to store image: {e}")))?;

    let image = state
        .db
        .insert_image(UPLOAD_FILENAME)
        .map_err(|e| ApiError::internal(e.to_string()))?;

    tracing::debug!(image_id = image.id, byte_size, "Stored uploaded image");

    Ok(JSend::success(UploadImageResponse {
        detail: "Image uploaded".to_string(),
        filename: image.filename,
    }))
}

/// GET /images/ultima/ -- serve the latest image, then destroy the lot.
///
/// A successful read drains the slot: the whole blob directory and every
/// image row go, not just the one being served.
pub async fn fetch_latest_image(
    State(state): State<Arc<AppState>>,
) -> Result<Response, ApiError> {
    let _guard = state.image_lock.lock().await;

    let image = state
        .db
        .latest_image()
        .map_err(|e| ApiError::internal(e.to_string()))?
        .ok_or_else(|| ApiError::not_found("No images available"))?;

    // A row whose file has vanished is reported, never served as empty.
    let data = state
        .blob_store
        .get(&image.filename)
        .await
        .map_err(|e| match e {
            BlobStoreError::NotFound(_) => ApiError::not_found("Image file is missing"),
            _ => ApiError::internal(format!("Failed to retrieve image: {e}")),
        })?;

    state
        .blob_store
        .purge_all()
        .await
        .map_err(|e| ApiError::internal(format!("Failed to purge images: {e}")))?;

    let removed = state
        .db
        .clear_images()
        .map_err(|e| ApiError::internal(e.to_string()))?;

    tracing::debug!(
        image_id = image.id,
        rows_removed = removed,
        "Served and purged latest image"
    );

    let byte_size = data.len() as u64;
    let mut response = (StatusCode::OK, data).into_response();
    let headers = response.headers_mut();

    headers.insert(
        header::CONTENT_TYPE,
        mime_guess::from_path(&image.filename)
            .first_or_octet_stream()
            .as_ref()
            .parse()
            .unwrap_or(header::HeaderValue::from_static("application/octet-stream")),
    );

    headers.insert(header::CONTENT_LENGTH, header::HeaderValue::from(byte_size));

    if let Ok(value) = format!("attachment; filename=\"{}\"", image.filename).parse() {
        headers.insert(header::CONTENT_DISPOSITION, value);
    }

    Ok(response)
}
