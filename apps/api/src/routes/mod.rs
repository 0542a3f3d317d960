pub mod health;

use axum::response::Html;
use axum::{
    routing::{get, post},
    Router,
};

use crate::analysis::handlers as analysis;
use crate::render::handlers as render;
use crate::state::AppState;

/// GET /
/// Serves the static landing page.
async fn index_handler() -> Html<&'static str> {
    Html(include_str!("index.html"))
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(index_handler))
        .route("/health", get(health::health_handler))
        .route("/analyze", post(analysis::handle_analyze))
        .route("/generate", post(analysis::handle_generate))
        .route(
            "/generate-cover-letter",
            post(analysis::handle_generate_cover_letter),
        )
        .route("/download", post(render::handle_download))
        .with_state(state)
}
