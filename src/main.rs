//! Crop Doctor HTTP server
//!
//! Serves the crop disease analyzer over a small JSON API. Configuration
//! comes from the environment (and an optional `.env` file):
//!
//! - `PORT` (default 5000)
//! - `CROP_DOCTOR_CONFIG`: path to an analyzer configuration JSON file
//! - `CROP_DOCTOR_FILENAME_OVERRIDE`: enable or disable the "healthy"
//!   filename override
//! - `MAX_UPLOAD_BYTES` (default 10 MiB)
//! - `MAX_STORED_PREDICTIONS` (default 1000)

use std::net::SocketAddr;

use crop_doctor::api::{self, AppState, ServerConfig};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "crop_doctor=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = ServerConfig::from_env();

    tracing::info!("Crop Doctor server starting...");
    if let Some(path) = &config.analyzer_config_path {
        tracing::info!("Analyzer config: {}", path.display());
    }

    let state = AppState::from_config(&config)?;
    if state.analyzer.config().filename_override {
        tracing::warn!("filename override is enabled; uploads named \"*healthy*\" skip diagnosis");
    }

    let app = api::router(state, config.max_upload_bytes);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    tracing::info!("Server listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
