//! eartrainer-wh - Conversational webhook for the ear-training quiz
//!
//! Receives fulfillment requests from the conversational platform, runs the
//! quiz engine from eartrainer-common, and answers with SSML referencing the
//! hosted note recordings.

use anyhow::Result;
use tracing::info;

use eartrainer_wh::config::WhConfig;
use eartrainer_wh::{build_router, AppState};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing subscriber
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    // Log build identification immediately after tracing init
    info!(
        "Starting Eartrainer Webhook (eartrainer-wh) v{} [{}] built {} ({})",
        env!("CARGO_PKG_VERSION"),
        env!("GIT_HASH"),
        env!("BUILD_TIMESTAMP"),
        env!("BUILD_PROFILE")
    );

    let config = WhConfig::load()?;
    info!("Audio base URL: {}", config.audio_base_url);

    let state = AppState::new(&config);
    let app = build_router(state);

    let addr = format!("{}:{}", config.host, config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("eartrainer-wh listening on http://{}", addr);
    info!("Health check: http://{}/health", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
