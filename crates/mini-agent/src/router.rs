use axum::{
    routing::{get, post},
    Router,
};
use tower_http::{
    cors::CorsLayer,
    services::ServeDir,
    trace::{DefaultMakeSpan, TraceLayer},
};
use tracing::info;

use crate::handlers;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    let static_dir = state.settings.static_dir();

    let mut router = Router::new()
        .route(
            "/",
            get(handlers::health::root).head(handlers::health::head_root),
        )
        .route("/health", get(handlers::health::health_check))
        .route("/chat", post(handlers::chat::chat_handler))
        .route(
            "/history",
            get(handlers::history::get_history).delete(handlers::history::clear_history),
        )
        .route("/info", get(handlers::info::info));

    // Remaining static assets (css, js, images) next to index.html
    if static_dir.is_dir() {
        info!("Serving static files from {}", static_dir.display());
        router = router.fallback_service(ServeDir::new(static_dir));
    }

    router
        .with_state(state)
        // CORS
        .layer(CorsLayer::permissive())
        // Tracing
        .layer(TraceLayer::new_for_http().make_span_with(DefaultMakeSpan::default()))
}
