use std::sync::Arc;

use axum::{
    routing::{get, patch},
    Router,
};

use crate::features::characteristics::handlers::{characteristic_handler, option_handler};
use crate::features::characteristics::services::{CharacteristicService, OptionService};

/// Create routes for the characteristic dictionary and its option sets
pub fn routes(
    characteristics: Arc<CharacteristicService>,
    options: Arc<OptionService>,
) -> Router {
    let dictionary = Router::new()
        .route(
            "/api/characteristics",
            get(characteristic_handler::list_characteristics)
                .post(characteristic_handler::create_characteristic),
        )
        .route(
            "/api/characteristics/{id}",
            get(characteristic_handler::get_characteristic)
                .patch(characteristic_handler::update_characteristic)
                .delete(characteristic_handler::delete_characteristic),
        )
        .with_state(characteristics);

    let option_set = Router::new()
        .route(
            "/api/characteristics/{id}/options",
            get(option_handler::list_options).post(option_handler::create_option),
        )
        .route(
            "/api/characteristics/{id}/options/{option_id}",
            patch(option_handler::update_option).delete(option_handler::delete_option),
        )
        .with_state(options);

    dictionary.merge(option_set)
}
