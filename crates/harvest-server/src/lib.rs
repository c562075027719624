//! harvest-server
//!
//! HTTP front end for report generation: authenticates the caller, renders
//! the report PDF, uploads it and hands back a pre-signed download link.

pub mod config;
pub mod error;
pub mod middleware;
pub mod routes;
pub mod state;

use std::path::Path;
use std::sync::Arc;

use axum::Router;
use axum::middleware as axum_mw;
use axum::routing::{get, post};
use eyre::WrapErr;
use tower::ServiceBuilder;
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::ServeDir;

use harvest_export::ReportAssets;
use harvest_storage::client::build_client;
use harvest_storage::store::S3ReportStore;

use config::ServerConfig;
use state::AppState;

/// Build the application router.
///
/// `/generate-pdf` sits behind the API key check; `/health` and the static
/// `/files` mount are open.
pub fn create_router(state: AppState, files_dir: &Path) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let protected = Router::new()
        .route("/generate-pdf", post(routes::reports::generate_pdf))
        .route_layer(axum_mw::from_fn_with_state(
            state.clone(),
            middleware::auth::require_api_key,
        ));

    Router::new()
        .route("/health", get(routes::health::health_check))
        .merge(protected)
        .nest_service("/files", ServeDir::new(files_dir))
        .layer(
            ServiceBuilder::new()
                .layer(axum_mw::from_fn(middleware::audit::audit_log))
                .layer(cors),
        )
        .with_state(state)
}

/// Load assets, connect storage, bind and serve until Ctrl-C.
pub async fn run(config: ServerConfig) -> eyre::Result<()> {
    let assets = ReportAssets::load(&config.assets_dir)
        .wrap_err_with(|| format!("loading report assets from {}", config.assets_dir.display()))?;

    let client = build_client(&config.storage).await?;
    let store = S3ReportStore::new(client, config.storage.bucket.clone());
    tracing::info!(
        endpoint = %config.storage.endpoint,
        bucket = %store.bucket(),
        "object storage client ready"
    );

    std::fs::create_dir_all(&config.files_dir)
        .wrap_err_with(|| format!("creating {}", config.files_dir.display()))?;

    let state = AppState {
        store: Arc::new(store),
        api_key: Arc::from(config.api_key.as_str()),
        renderer: Arc::new(assets),
        url_expiry: config.url_expiry,
    };
    let app = create_router(state, &config.files_dir);

    let listener = tokio::net::TcpListener::bind(config.bind_addr).await?;
    tracing::info!(address = %config.bind_addr, "starting server");
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("shutdown signal received, stopping server");
}
