use std::io;

use axum::Json;
use axum::extract::multipart::MultipartError;
use axum::extract::{Multipart, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use futures::{StreamExt, TryStreamExt};
use serde::Serialize;

use crate::application::ports::{FileLoader, LlmClient};
use crate::application::services::UploadError;
use crate::domain::{UploadCategory, UploadedFile};
use crate::presentation::state::AppState;

use super::error::error_response;

#[derive(Debug, Serialize)]
pub struct DocumentUploadResponse {
    pub message: String,
    pub file_path: String,
}

#[derive(Debug, Serialize)]
pub struct ImageUploadResponse {
    pub message: String,
    pub filename: String,
}

#[tracing::instrument(skip(state, multipart))]
pub async fn upload_document_handler<F, L>(
    State(state): State<AppState<F, L>>,
    multipart: Multipart,
) -> impl IntoResponse
where
    F: FileLoader + 'static,
    L: LlmClient + ?Sized + 'static,
{
    match receive_field(&state, multipart, "file", UploadCategory::Document).await {
        Ok(stored) => Json(DocumentUploadResponse {
            message: "File uploaded successfully".to_string(),
            file_path: stored.storage_path.to_string(),
        })
        .into_response(),
        Err(response) => response,
    }
}

#[tracing::instrument(skip(state, multipart))]
pub async fn upload_image_handler<F, L>(
    State(state): State<AppState<F, L>>,
    multipart: Multipart,
) -> impl IntoResponse
where
    F: FileLoader + 'static,
    L: LlmClient + ?Sized + 'static,
{
    match receive_field(&state, multipart, "image", UploadCategory::Image).await {
        Ok(stored) => Json(ImageUploadResponse {
            message: "Image uploaded successfully".to_string(),
            filename: stored.storage_path.to_string(),
        })
        .into_response(),
        Err(response) => response,
    }
}

/// Skips parts until `field_name` and streams that part to storage.
async fn receive_field<F, L>(
    state: &AppState<F, L>,
    mut multipart: Multipart,
    field_name: &str,
    category: UploadCategory,
) -> Result<UploadedFile, Response>
where
    F: FileLoader + 'static,
    L: LlmClient + ?Sized + 'static,
{
    loop {
        let field = match multipart.next_field().await {
            Ok(Some(field)) => field,
            Ok(None) => {
                tracing::warn!(field = field_name, "Upload without expected part");
                return Err(error_response(StatusCode::BAD_REQUEST, "No file part"));
            }
            Err(e) if e.status() == StatusCode::PAYLOAD_TOO_LARGE => {
                return Err(upload_error_response(UploadError::TooLarge));
            }
            Err(e) => {
                tracing::warn!(error = %e, "Failed to read multipart");
                return Err(error_response(
                    StatusCode::BAD_REQUEST,
                    format!("Failed to read multipart: {}", e),
                ));
            }
        };

        if field.name() != Some(field_name) {
            continue;
        }

        let filename = field.file_name().map(str::to_string);
        let content_type = field.content_type().map(str::to_string);

        tracing::debug!(filename = ?filename, content_type = ?content_type, "Processing upload");

        let body = field.map_err(body_read_error).boxed();

        return state
            .upload_service
            .receive(category, filename.as_deref(), content_type.as_deref(), body)
            .await
            .map_err(upload_error_response);
    }
}

/// Keeps the body-limit case distinguishable once the multipart error is
/// flattened into an `io::Error`.
fn body_read_error(error: MultipartError) -> io::Error {
    if error.status() == StatusCode::PAYLOAD_TOO_LARGE {
        io::Error::new(io::ErrorKind::FileTooLarge, error)
    } else {
        io::Error::other(error)
    }
}

fn upload_error_response(error: UploadError) -> Response {
    match error {
        UploadError::MissingFile => {
            tracing::warn!("Upload without a usable filename");
            error_response(StatusCode::BAD_REQUEST, "No selected file")
        }
        UploadError::TooLarge => {
            tracing::warn!("Upload over the body size limit");
            error_response(StatusCode::PAYLOAD_TOO_LARGE, "File too large")
        }
        UploadError::UnsupportedType { .. } | UploadError::InvalidBody(_) => {
            tracing::warn!(error = %error, "Upload rejected");
            error_response(StatusCode::BAD_REQUEST, error.to_string())
        }
        UploadError::Storage(e) => {
            tracing::error!(error = %e, "Failed to store upload");
            error_response(StatusCode::INTERNAL_SERVER_ERROR, "Failed to save file")
        }
    }
}
