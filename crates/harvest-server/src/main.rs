use tracing_subscriber::EnvFilter;

use harvest_server::config::ServerConfig;

#[tokio::main]
async fn main() -> eyre::Result<()> {
    // Structured JSON logging
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .json()
        .init();

    let config = ServerConfig::from_env()?;
    harvest_server::run(config).await
}
