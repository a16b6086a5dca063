use std::sync::Arc;

use axum::{routing::get, Router};

use crate::features::tags::handlers;
use crate::features::tags::services::TagService;

/// Create routes for the tags feature
pub fn routes(service: Arc<TagService>) -> Router {
    Router::new()
        .route("/tags", get(handlers::list_tags).post(handlers::create_tag))
        .route("/tags/{slug}", get(handlers::get_tag))
        .with_state(service)
}
