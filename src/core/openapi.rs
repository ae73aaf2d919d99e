use utoipa::{Modify, OpenApi};

use crate::features::assignments::{dtos as assignments_dtos, handlers::assignment_handler};
use crate::features::categories::{dtos as categories_dtos, handlers::category_handler};
use crate::features::characteristics::{
    dtos as characteristics_dtos, handlers::characteristic_handler, handlers::option_handler,
    models as characteristics_models,
};
use crate::features::filters::{
    dtos as filters_dtos, handlers::filter_handler, models as filters_models,
};
use crate::features::products::{
    dtos as products_dtos, handlers::product_handler, models as products_models,
    services::SpecReport,
};
use crate::shared::localization::{Lang, LocalizedText};
use crate::shared::types::{ApiResponse, Meta};

#[derive(OpenApi)]
#[openapi(
    paths(
        // Categories
        category_handler::list_categories,
        category_handler::get_category_by_slug,
        category_handler::get_category,
        category_handler::create_category,
        category_handler::update_category,
        category_handler::delete_category,
        // Characteristics (dictionary)
        characteristic_handler::list_characteristics,
        characteristic_handler::get_characteristic,
        characteristic_handler::create_characteristic,
        characteristic_handler::update_characteristic,
        characteristic_handler::delete_characteristic,
        // Characteristic options
        option_handler::list_options,
        option_handler::create_option,
        option_handler::update_option,
        option_handler::delete_option,
        // Assignments
        assignment_handler::list_category_characteristics,
        assignment_handler::assign_characteristic,
        assignment_handler::update_link,
        assignment_handler::unassign_characteristic,
        assignment_handler::copy_characteristics,
        // Filters
        filter_handler::list_filters,
        filter_handler::create_filter,
        filter_handler::update_filter,
        filter_handler::toggle_filter,
        filter_handler::delete_filter,
        // Products
        product_handler::create_product,
        product_handler::get_product,
        product_handler::update_product,
    ),
    components(
        schemas(
            // Shared
            Meta,
            Lang,
            LocalizedText,
            // Categories
            categories_dtos::CreateCategoryDto,
            categories_dtos::UpdateCategoryDto,
            categories_dtos::CategoryResponseDto,
            categories_dtos::CategoryTreeDto,
            ApiResponse<categories_dtos::CategoryResponseDto>,
            ApiResponse<Vec<categories_dtos::CategoryResponseDto>>,
            // Characteristics
            characteristics_models::CharacteristicKind,
            characteristics_dtos::CreateCharacteristicDto,
            characteristics_dtos::UpdateCharacteristicDto,
            characteristics_dtos::CharacteristicResponseDto,
            characteristics_dtos::CreateOptionDto,
            characteristics_dtos::UpdateOptionDto,
            characteristics_dtos::OptionResponseDto,
            ApiResponse<characteristics_dtos::CharacteristicResponseDto>,
            ApiResponse<Vec<characteristics_dtos::CharacteristicResponseDto>>,
            ApiResponse<characteristics_dtos::OptionResponseDto>,
            ApiResponse<Vec<characteristics_dtos::OptionResponseDto>>,
            // Assignments
            assignments_dtos::AssignCharacteristicDto,
            assignments_dtos::UpdateLinkDto,
            assignments_dtos::CopyLinksDto,
            assignments_dtos::CopyResultDto,
            assignments_dtos::LinkResponseDto,
            assignments_dtos::LinkedCharacteristicDto,
            assignments_dtos::LinkedOptionDto,
            ApiResponse<assignments_dtos::LinkResponseDto>,
            ApiResponse<Vec<assignments_dtos::LinkedCharacteristicDto>>,
            ApiResponse<assignments_dtos::CopyResultDto>,
            // Filters
            filters_models::FilterKind,
            filters_models::FilterSource,
            filters_dtos::CreateFilterDto,
            filters_dtos::UpdateFilterDto,
            filters_dtos::FilterResponseDto,
            ApiResponse<filters_dtos::FilterResponseDto>,
            ApiResponse<Vec<filters_dtos::FilterResponseDto>>,
            // Products
            products_models::SpecValue,
            SpecReport,
            products_dtos::CreateProductDto,
            products_dtos::UpdateProductDto,
            products_dtos::ProductResponseDto,
            ApiResponse<products_dtos::ProductResponseDto>,
        )
    ),
    tags(
        (name = "categories", description = "Hierarchical catalog categories"),
        (name = "characteristics", description = "Global characteristic dictionary"),
        (name = "characteristic-options", description = "Option sets for select/multiselect characteristics"),
        (name = "assignments", description = "Category-characteristic links and propagation"),
        (name = "filters", description = "Storefront filter definitions"),
        (name = "products", description = "Product surface with advisory spec validation"),
    )
)]
pub struct ApiDoc;

/// Injects runtime-configured title/version/description into the OpenAPI doc
pub struct SwaggerInfoModifier {
    pub title: String,
    pub version: String,
    pub description: String,
}

impl Modify for SwaggerInfoModifier {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        openapi.info.title = self.title.clone();
        openapi.info.version = self.version.clone();
        openapi.info.description = Some(self.description.clone());
    }
}
