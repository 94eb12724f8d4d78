//! Image upload route
//!
//! Accepts a single multipart image, validates type and size before
//! touching storage, and returns the public URL.

use axum::{
    extract::{Multipart, State},
    response::IntoResponse,
    Json,
};
use serde::Serialize;
use std::sync::Arc;

use crate::app::AppState;
use crate::auth::RequireAuth;
use crate::error::ApiError;
use crate::services::ImageStore;

/// Per-file limit enforced in the handler
pub const MAX_IMAGE_BYTES: usize = 5 * 1024 * 1024;

/// Request body limit, leaving headroom for multipart framing
pub const MAX_BODY_BYTES: usize = 6 * 1024 * 1024;

const ALLOWED_IMAGE_TYPES: &[(&str, &str)] = &[
    ("image/jpeg", "jpg"),
    ("image/jpg", "jpg"),
    ("image/png", "png"),
    ("image/webp", "webp"),
];

#[derive(Serialize)]
struct UploadResponse {
    url: String,
}

/// Validate content type and size, returning the file extension to store
/// under. Runs before any storage write.
fn validate_image(content_type: Option<&str>, size: usize) -> Result<&'static str, ApiError> {
    let content_type = content_type.ok_or_else(|| ApiError::bad_request("Missing content type"))?;

    let extension = ALLOWED_IMAGE_TYPES
        .iter()
        .find(|(mime, _)| *mime == content_type)
        .map(|(_, ext)| *ext)
        .ok_or_else(|| ApiError::bad_request("Only jpeg, png and webp images are allowed"))?;

    if size > MAX_IMAGE_BYTES {
        return Err(ApiError::bad_request("Image exceeds the 5MB limit"));
    }

    Ok(extension)
}

/// POST /upload/image
pub async fn upload_image(
    _auth: RequireAuth,
    State(state): State<Arc<AppState>>,
    mut multipart: Multipart,
) -> Result<impl IntoResponse, ApiError> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::bad_request(format!("Invalid multipart body: {}", e)))?
    {
        // Skip non-file fields
        if field.file_name().is_none() {
            continue;
        }

        let content_type = field.content_type().map(|s| s.to_string());
        let data = field
            .bytes()
            .await
            .map_err(|e| ApiError::bad_request(format!("Failed to read upload: {}", e)))?;

        let extension = validate_image(content_type.as_deref(), data.len())?;

        let key = ImageStore::generate_key(extension);
        let url = state.image_store.store(&key, &data).await?;

        tracing::info!(key = %key, size = data.len(), "Image uploaded");

        return Ok(Json(UploadResponse { url }));
    }

    Err(ApiError::bad_request("No image file in request"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_allowed_image_types() {
        assert_eq!(validate_image(Some("image/jpeg"), 1024).unwrap(), "jpg");
        assert_eq!(validate_image(Some("image/jpg"), 1024).unwrap(), "jpg");
        assert_eq!(validate_image(Some("image/png"), 1024).unwrap(), "png");
        assert_eq!(validate_image(Some("image/webp"), 1024).unwrap(), "webp");
    }

    #[test]
    fn rejects_disallowed_types() {
        assert!(validate_image(Some("image/gif"), 1024).is_err());
        assert!(validate_image(Some("application/pdf"), 1024).is_err());
        assert!(validate_image(None, 1024).is_err());
    }

    #[test]
    fn rejects_oversized_images() {
        assert!(validate_image(Some("image/png"), MAX_IMAGE_BYTES + 1).is_err());
        assert!(validate_image(Some("image/png"), MAX_IMAGE_BYTES).is_ok());
    }
}
