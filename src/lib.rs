pub mod adapters;
pub mod config;
pub mod domain;
pub mod services;

use {
    axum::{
        Router,
        extract::DefaultBodyLimit,
        routing::{get, post},
    },
    services::webhook_pipeline::WebhookPipeline,
    std::{sync::Arc, time::Duration},
    tower_http::timeout::TimeoutLayer,
};

#[derive(Clone)]
pub struct AppState {
    pub pipeline: Arc<WebhookPipeline>,
}

/// `request_timeout` bounds the whole webhook call, retries included.
pub fn router(state: AppState, request_timeout: Duration) -> Router {
    Router::new()
        .route("/", get(|| async { "ok" }))
        .route(
            "/webhook",
            post(adapters::webhook::bharatx_webhook_handler),
        )
        .layer(DefaultBodyLimit::max(64 * 1024)) // 64 KB; provider notifications are a few hundred bytes
        .layer(TimeoutLayer::new(request_timeout))
        .with_state(state)
}
