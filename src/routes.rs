//! HTTP routes.

use axum::{Router, routing::get, routing::post};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::state::AppState;

/// Directory served under `/static`
pub const STATIC_DIR: &str = "static";

pub fn router(state: AppState) -> Router {
  Router::new()
    .route("/", get(handlers::index))
    .route("/level", post(handlers::select_level))
    .route("/draw", post(handlers::draw_next))
    .route("/answer", post(handlers::submit_answer))
    .route("/reveal", post(handlers::reveal_answer))
    .route("/speak", get(handlers::speak))
    .route("/download", get(handlers::download))
    .nest_service("/static", ServeDir::new(STATIC_DIR))
    .layer(TraceLayer::new_for_http())
    .with_state(state)
}
