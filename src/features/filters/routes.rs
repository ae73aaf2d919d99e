use std::sync::Arc;

use axum::{
    routing::{get, patch, post},
    Router,
};

use crate::features::filters::handlers::filter_handler;
use crate::features::filters::services::FilterService;

/// Create routes for storefront filter definitions
pub fn routes(service: Arc<FilterService>) -> Router {
    Router::new()
        .route(
            "/api/subcategories/{id}/filters",
            get(filter_handler::list_filters).post(filter_handler::create_filter),
        )
        .route(
            "/api/filters/{id}",
            patch(filter_handler::update_filter).delete(filter_handler::delete_filter),
        )
        .route("/api/filters/{id}/toggle", post(filter_handler::toggle_filter))
        .with_state(service)
}
