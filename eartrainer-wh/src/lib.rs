//! eartrainer-wh library - conversational webhook service
//!
//! Adapts a conversational-platform fulfillment request (action name,
//! slot parameters, session contexts) to the core quiz engine and renders
//! the resulting prompt as SSML. The service keeps no state of its own;
//! session state rides in the platform contexts.

use axum::Router;
use tower_http::trace::TraceLayer;

use eartrainer_common::PitchCatalog;

pub mod api;
pub mod config;

use config::WhConfig;

/// Application state shared across HTTP handlers
#[derive(Clone)]
pub struct AppState {
    /// Pitch-to-audio-URL mapping, rooted at the configured base URL
    pub catalog: PitchCatalog,
}

impl AppState {
    /// Create new application state from loaded configuration
    pub fn new(config: &WhConfig) -> Self {
        Self {
            catalog: PitchCatalog::new(config.audio_base_url.clone()),
        }
    }
}

/// Build application router
pub fn build_router(state: AppState) -> Router {
    use axum::routing::{get, post};

    Router::new()
        .route("/", post(api::handle_fulfillment))
        .route("/health", get(api::health_check))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
