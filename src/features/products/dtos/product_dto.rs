use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::features::products::models::{Product, SpecDocument};
use crate::features::products::services::SpecReport;
use crate::shared::localization::LocalizedText;

/// Request DTO for creating a product
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateProductDto {
    pub category_id: Uuid,

    #[validate(
        length(min = 1, max = 128, message = "Slug must be 1-128 characters"),
        regex(
            path = "*crate::shared::validation::SLUG_REGEX",
            message = "Slug must be lowercase alphanumeric with single hyphens"
        )
    )]
    pub slug: String,

    pub name: LocalizedText,

    /// Characteristic key to value map; validated advisorily against the
    /// category's link set
    #[serde(default)]
    pub specs: SpecDocument,
}

/// Request DTO for updating a product (PATCH semantics).
/// A supplied spec document replaces the stored one wholesale.
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct UpdateProductDto {
    #[validate(
        length(min = 1, max = 128, message = "Slug must be 1-128 characters"),
        regex(
            path = "*crate::shared::validation::SLUG_REGEX",
            message = "Slug must be lowercase alphanumeric with single hyphens"
        )
    )]
    pub slug: Option<String>,

    pub name: Option<LocalizedText>,

    pub specs: Option<SpecDocument>,

    pub is_active: Option<bool>,
}

/// Response DTO for a product. Writes carry the advisory validation report
/// of the spec document against the category's link set.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ProductResponseDto {
    pub id: Uuid,
    pub category_id: Uuid,
    pub slug: String,
    pub name: LocalizedText,
    pub specs: SpecDocument,
    pub is_active: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub validation: Option<SpecReport>,
}

impl ProductResponseDto {
    pub fn from_product(product: Product, validation: Option<SpecReport>) -> Self {
        Self {
            id: product.id,
            category_id: product.category_id,
            slug: product.slug,
            name: product.name.0,
            specs: product.specs.0,
            is_active: product.is_active,
            validation,
        }
    }
}
