//! Router assembly.

mod common;
mod products;

pub use common::common_routes;
pub use products::product_routes;

use crate::state::AppState;
use axum::extract::DefaultBodyLimit;
use axum::Router;
use tower_http::trace::TraceLayer;

/// Largest accepted request body.
pub const BODY_LIMIT_BYTES: usize = 64 * 1024;

/// Full application router: common routes, product routes, request tracing and body limit.
/// Oversized bodies are rejected by `ValidatedJson`, so the 413 carries the JSON error body.
pub fn app(state: AppState) -> Router {
    Router::new()
        .merge(common_routes())
        .merge(product_routes(state))
        .layer(DefaultBodyLimit::max(BODY_LIMIT_BYTES))
        .layer(TraceLayer::new_for_http())
}
