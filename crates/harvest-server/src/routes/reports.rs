use std::sync::Arc;

use axum::Json;
use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use uuid::Uuid;

use harvest_core::content::report_sections;
use harvest_core::models::report_request::{GenerateReportRequest, GenerateReportResponse};
use harvest_core::s3_keys;

use crate::error::ApiError;
use crate::state::AppState;

/// Render the report, upload it and return a pre-signed link to it.
///
/// Rendering is CPU-bound and runs on the blocking pool; each call builds
/// its own document and shares only the read-only fonts and logo.
pub async fn generate_pdf(
    State(state): State<AppState>,
    payload: Result<Json<GenerateReportRequest>, JsonRejection>,
) -> Result<Json<GenerateReportResponse>, ApiError> {
    let Json(request) = payload.map_err(|e| ApiError::InvalidPayload(e.body_text()))?;

    let sections = report_sections(&request);
    let renderer = Arc::clone(&state.renderer);
    let pdf = tokio::task::spawn_blocking(move || renderer.render(&sections))
        .await
        .map_err(|e| ApiError::Internal(format!("render task failed: {e}")))??;
    tracing::info!(size = pdf.len(), "report PDF rendered");

    let key = s3_keys::report_pdf(Uuid::new_v4());
    let size = pdf.len();
    state
        .store
        .put_report(&key, pdf, s3_keys::PDF_CONTENT_TYPE)
        .await?;
    tracing::info!(key = %key, size, "report uploaded");

    let file_url = state.store.presigned_url(&key, state.url_expiry).await?;
    tracing::info!(
        key = %key,
        expires_in_secs = state.url_expiry.as_secs(),
        "pre-signed URL generated"
    );

    Ok(Json(GenerateReportResponse::success(file_url)))
}
