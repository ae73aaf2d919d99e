use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};

use crate::features::products::handlers::product_handler;
use crate::features::products::services::ProductService;

/// Create routes for the product surface
pub fn routes(service: Arc<ProductService>) -> Router {
    Router::new()
        .route("/api/products", post(product_handler::create_product))
        .route(
            "/api/products/{id}",
            get(product_handler::get_product).patch(product_handler::update_product),
        )
        .with_state(service)
}
