use std::sync::Arc;

use axum::{routing::get, Router};

use crate::features::categories::handlers::category_handler;
use crate::features::categories::services::CategoryService;

/// Create routes for the categories feature
pub fn routes(service: Arc<CategoryService>) -> Router {
    Router::new()
        .route(
            "/api/categories",
            get(category_handler::list_categories).post(category_handler::create_category),
        )
        .route(
            "/api/categories/slug/{slug}",
            get(category_handler::get_category_by_slug),
        )
        .route(
            "/api/categories/{id}",
            get(category_handler::get_category)
                .patch(category_handler::update_category)
                .delete(category_handler::delete_category),
        )
        .with_state(service)
}
