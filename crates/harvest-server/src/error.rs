use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

use harvest_export::ExportError;
use harvest_storage::error::StorageError;

pub const UNAUTHORIZED_MESSAGE: &str = "Invalid or missing API Key";

/// Unified API error type for all route handlers.
///
/// Storage and internal failures are logged with their detail and answered
/// with a fixed message; render failures carry their reason to the caller.
#[derive(Debug)]
pub enum ApiError {
    Unauthorized,
    InvalidPayload(String),
    Render(String),
    Upload(String),
    Presign(String),
    Internal(String),
}

#[derive(Serialize)]
struct ErrorBody {
    error: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::Unauthorized => (StatusCode::UNAUTHORIZED, UNAUTHORIZED_MESSAGE.to_string()),
            ApiError::InvalidPayload(msg) => (StatusCode::UNPROCESSABLE_ENTITY, msg),
            ApiError::Render(reason) => {
                tracing::error!(reason = %reason, "error generating PDF");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    format!("Error generating PDF: {reason}"),
                )
            }
            ApiError::Upload(detail) => {
                tracing::error!(detail = %detail, "error uploading PDF");
                (StatusCode::INTERNAL_SERVER_ERROR, "Error uploading PDF".to_string())
            }
            ApiError::Presign(detail) => {
                tracing::error!(detail = %detail, "error generating pre-signed URL");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Error generating pre-signed URL".to_string(),
                )
            }
            ApiError::Internal(msg) => {
                tracing::error!("internal error: {msg}");
                (StatusCode::INTERNAL_SERVER_ERROR, "internal server error".to_string())
            }
        };

        (status, Json(ErrorBody { error: message })).into_response()
    }
}

impl From<ExportError> for ApiError {
    fn from(e: ExportError) -> Self {
        ApiError::Render(e.to_string())
    }
}

impl From<StorageError> for ApiError {
    fn from(e: StorageError) -> Self {
        match e {
            StorageError::PutObject(detail) => ApiError::Upload(detail),
            StorageError::Presign(detail) => ApiError::Presign(detail),
            other => ApiError::Internal(other.to_string()),
        }
    }
}
