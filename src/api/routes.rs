use axum::{
    extract::DefaultBodyLimit,
    routing::{delete, get, post, put},
    Router,
};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

use super::handlers;
use crate::AppState;

pub fn create_router(state: Arc<AppState>) -> Router {
    let upload_limit = state.config.max_upload_size as usize;

    Router::new()
        // Users and their internet credentials
        .route("/users/", get(handlers::list_users))
        .route("/users/", post(handlers::create_user))
        .route("/users/internet", put(handlers::update_user_credential))
        .route("/users/:name", delete(handlers::delete_user))
        .route("/users/:name/internet", get(handlers::get_user_credential))
        // Images (single-slot upload box)
        .route(
            "/images/",
            post(handlers::upload_image).layer(DefaultBodyLimit::max(upload_limit)),
        )
        .route("/images/ultima/", get(handlers::fetch_latest_image))
        // Internal
        .route("/_internal/health", get(handlers::health))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
