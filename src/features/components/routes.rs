use std::sync::Arc;

use axum::{
    routing::{get, patch, post},
    Router,
};

use crate::features::categories::CategoryService;
use crate::features::components::handlers::{self, ComponentState};
use crate::features::components::services::ComponentService;

/// Create routes for the components feature
///
/// Reads are public; writes require the caller header
pub fn routes(
    component_service: Arc<ComponentService>,
    category_service: Arc<CategoryService>,
) -> Router {
    let state = ComponentState {
        component_service,
        category_service,
    };

    Router::new()
        .route(
            "/components",
            get(handlers::list_components).post(handlers::create_component),
        )
        .route(
            "/components/{slug}",
            get(handlers::get_component)
                .patch(handlers::update_component)
                .delete(handlers::delete_component),
        )
        .route("/components/{slug}/tags", post(handlers::add_component_tag))
        .route(
            "/components/{slug}/status",
            patch(handlers::update_component_status),
        )
        .route(
            "/components/{slug}/approval",
            patch(handlers::update_component_approval),
        )
        .with_state(state)
}
