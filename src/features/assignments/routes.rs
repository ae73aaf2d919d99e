use std::sync::Arc;

use axum::{
    routing::{get, patch, post},
    Router,
};

use crate::features::assignments::handlers::assignment_handler;
use crate::features::assignments::services::AssignmentService;

/// Create routes for category-characteristic links and propagation
pub fn routes(service: Arc<AssignmentService>) -> Router {
    Router::new()
        .route(
            "/api/categories/{id}/characteristics",
            get(assignment_handler::list_category_characteristics)
                .post(assignment_handler::assign_characteristic),
        )
        .route(
            "/api/categories/{id}/characteristics/copy",
            post(assignment_handler::copy_characteristics),
        )
        .route(
            "/api/categories/{id}/characteristics/{characteristic_id}",
            patch(assignment_handler::update_link)
                .delete(assignment_handler::unassign_characteristic),
        )
        .with_state(service)
}
