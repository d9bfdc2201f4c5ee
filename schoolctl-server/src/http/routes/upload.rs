//! Image upload endpoint
//!
//! Accepts one multipart `file` part with an `image/*` content type and
//! stores it under a fresh UUID name. The returned path is what clients
//! put in a school's `image` field.

use std::path::Path;
use std::sync::Arc;

use axum::{
    extract::{multipart::MultipartRejection, DefaultBodyLimit, Multipart, State},
    routing::post,
    Json, Router,
};
use serde::Serialize;
use uuid::Uuid;

use crate::http::error::ApiError;
use crate::http::server::AppState;

/// URL prefix uploaded files are served under
pub const UPLOADS_PREFIX: &str = "/uploads";

/// Longest file extension kept from the original name
const MAX_EXTENSION_LEN: usize = 8;

/// Upload response
#[derive(Serialize)]
pub struct UploadResponse {
    pub success: bool,
    pub path: String,
}

/// POST /api/upload - store one image
async fn upload_image(
    State(state): State<Arc<AppState>>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<UploadResponse>, ApiError> {
    let mut multipart =
        multipart.map_err(|_| ApiError::bad_request("Expected a multipart/form-data body"))?;

    while let Some(field) = multipart.next_field().await? {
        if field.name() != Some("file") {
            continue;
        }

        let content_type = field.content_type().unwrap_or_default();
        if !content_type.starts_with("image/") {
            return Err(ApiError::bad_request("Only image files can be uploaded"));
        }

        let extension = field.file_name().and_then(safe_extension);
        let bytes = field.bytes().await?;
        if bytes.is_empty() {
            return Err(ApiError::bad_request("Uploaded file is empty"));
        }

        let file_name = match extension {
            Some(ext) => format!("{}.{}", Uuid::new_v4(), ext),
            None => Uuid::new_v4().to_string(),
        };

        store(&state.upload_dir, &file_name, &bytes)
            .await
            .map_err(|e| ApiError::Internal {
                message: "Failed to store upload",
                detail: e.to_string(),
            })?;

        tracing::info!(file = %file_name, size = bytes.len(), "image uploaded");
        return Ok(Json(UploadResponse {
            success: true,
            path: format!("{}/{}", UPLOADS_PREFIX, file_name),
        }));
    }

    Err(ApiError::bad_request("No file uploaded"))
}

/// Write `bytes` to `dir/name` via a hidden temporary file and a rename,
/// so a failed write never leaves a partial file under the public name.
async fn store(dir: &Path, name: &str, bytes: &[u8]) -> std::io::Result<()> {
    tokio::fs::create_dir_all(dir).await?;

    let partial = dir.join(format!(".{}.part", name));
    let written = async {
        tokio::fs::write(&partial, bytes).await?;
        tokio::fs::rename(&partial, dir.join(name)).await
    }
    .await;

    if written.is_err() {
        let _ = tokio::fs::remove_file(&partial).await;
    }
    written
}

/// Lower-cased extension of `name`, if it is short and alphanumeric.
fn safe_extension(name: &str) -> Option<String> {
    let ext = Path::new(name).extension()?.to_str()?;
    let ok = !ext.is_empty()
        && ext.len() <= MAX_EXTENSION_LEN
        && ext.chars().all(|c| c.is_ascii_alphanumeric());
    ok.then(|| ext.to_ascii_lowercase())
}

/// Upload routes
pub fn router(max_upload_bytes: usize) -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/upload", post(upload_image))
        .layer(DefaultBodyLimit::max(max_upload_bytes))
}
