pub mod health;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};

use crate::features::handlers;
use crate::forms::handlers as form_handlers;
use crate::state::AppState;

/// Headroom on top of the file size cap for multipart boundaries and text parts.
const MULTIPART_OVERHEAD_BYTES: usize = 64 * 1024;

pub fn build_router(state: AppState) -> Router {
    let upload_limit = state.max_upload_bytes + MULTIPART_OVERHEAD_BYTES;

    Router::new()
        .route("/health", get(health::health_handler))
        // Feature catalog
        .route("/api/v1/features", get(handlers::handle_list_features))
        .route("/api/v1/features/:feature", get(handlers::handle_get_feature))
        .route(
            "/api/v1/features/:feature/submit",
            post(handlers::handle_submit),
        )
        .route(
            "/api/v1/features/:feature/upload",
            post(handlers::handle_upload).layer(DefaultBodyLimit::max(upload_limit)),
        )
        // Forms
        .route("/api/v1/forms", post(form_handlers::handle_open_form))
        .route("/api/v1/forms/:form_id", get(form_handlers::handle_get_form))
        .with_state(state)
}
