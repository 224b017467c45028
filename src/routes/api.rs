use axum::{
    Router,
    routing::{get, post},
};
use tower_http::trace::TraceLayer;

use crate::handlers::sessions;
use crate::state::AppState;
use std::sync::Arc;

/// Create the JSON session API router (mounted under `/api`)
pub fn create_api_router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/sessions", post(sessions::create_session))
        .route(
            "/sessions/{id}",
            get(sessions::get_session).delete(sessions::delete_session),
        )
        .route("/sessions/{id}/commands", post(sessions::post_command))
        .route("/sessions/{id}/audio", get(sessions::take_audio))
        .layer(TraceLayer::new_for_http())
}
