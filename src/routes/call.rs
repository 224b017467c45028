//! Browser call page routes
//!
//! `GET /` creates a session and redirects to `GET /call/{id}`. The page's
//! buttons post to `/call/{id}/start|end|clear|message`, each of which
//! redirects back to the page.

use axum::{
    Router,
    routing::{get, post},
};
use tower_http::trace::TraceLayer;

use crate::handlers::call;
use crate::state::AppState;
use std::sync::Arc;

pub fn create_call_router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/", get(call::index))
        .route("/call/{id}", get(call::call_page))
        .route("/call/{id}/start", post(call::start_call))
        .route("/call/{id}/end", post(call::end_call))
        .route("/call/{id}/clear", post(call::clear_history))
        .route("/call/{id}/message", post(call::send_message))
        .layer(TraceLayer::new_for_http())
}
