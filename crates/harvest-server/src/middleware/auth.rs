use axum::extract::{Request, State};
use axum::middleware::Next;
use axum::response::Response;

use crate::error::ApiError;
use crate::state::AppState;

pub const API_KEY_HEADER: &str = "x-api-key";

/// Shared-secret check.
///
/// The `X-API-Key` header must equal the configured key exactly. Rejected
/// requests never reach the handler, so no body is parsed, nothing is
/// rendered and storage is not touched.
pub async fn require_api_key(
    State(state): State<AppState>,
    req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let supplied = req
        .headers()
        .get(API_KEY_HEADER)
        .and_then(|v| v.to_str().ok());
    let present = supplied.is_some();
    let authorized = supplied == Some(&*state.api_key);

    if !authorized {
        tracing::warn!(
            path = %req.uri().path(),
            key_present = present,
            "unauthorized access attempt"
        );
        return Err(ApiError::Unauthorized);
    }

    Ok(next.run(req).await)
}
