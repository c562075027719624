use std::sync::Arc;
use std::time::Duration;

use harvest_export::ReportRenderer;
use harvest_storage::store::ReportStore;

/// Shared application state, injected into all route handlers via Axum state.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn ReportStore>,
    pub api_key: Arc<str>,
    pub renderer: Arc<dyn ReportRenderer>,
    /// Lifetime of the download links handed back to callers.
    pub url_expiry: Duration,
}
