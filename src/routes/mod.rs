pub mod health;
pub mod send;
pub mod static_files;

use axum::{
    http::{HeaderValue, Method},
    routing::{get, post},
    Router,
};
use tower_http::{
    compression::CompressionLayer,
    cors::{AllowOrigin, Any, CorsLayer},
    trace::TraceLayer,
};

use crate::webhook::SharedWebhookService;

/// Builds the application router around the given webhook service.
///
/// Only `cors_origins` may call the API cross-origin; the embedded frontend is
/// same-origin and needs none.
pub fn app(service: SharedWebhookService, cors_origins: Vec<HeaderValue>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(AllowOrigin::list(cors_origins))
        .allow_methods([Method::GET, Method::POST])
        .allow_headers(Any);

    Router::new()
        .route("/api/health", get(health::health_check))
        .route("/api/send", post(send::send_webhook))
        .fallback(static_files::serve_static)
        .with_state(service)
        .layer(CompressionLayer::new())
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}
