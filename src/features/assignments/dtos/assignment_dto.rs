use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::features::assignments::models::CategoryCharacteristic;
use crate::features::characteristics::models::CharacteristicKind;
use crate::shared::localization::LocalizedText;

/// Request DTO for assigning a characteristic to a category.
///
/// Assignment is an upsert: re-assigning an already-linked pair overwrites
/// the link metadata instead of failing.
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct AssignCharacteristicDto {
    pub characteristic_id: Uuid,

    #[serde(default)]
    pub is_required: bool,

    #[serde(default)]
    pub show_in_key_specs: bool,

    #[serde(default)]
    pub order_index: i32,
}

/// Request DTO for updating link metadata (PATCH semantics)
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct UpdateLinkDto {
    pub is_required: Option<bool>,
    pub show_in_key_specs: Option<bool>,
    pub order_index: Option<i32>,
}

/// Request DTO for copying all links of a category onto another
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct CopyLinksDto {
    pub target_category_id: Uuid,
}

/// Response DTO for a bare link
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct LinkResponseDto {
    pub category_id: Uuid,
    pub characteristic_id: Uuid,
    pub is_required: bool,
    pub show_in_key_specs: bool,
    pub order_index: i32,
}

impl From<CategoryCharacteristic> for LinkResponseDto {
    fn from(link: CategoryCharacteristic) -> Self {
        Self {
            category_id: link.category_id,
            characteristic_id: link.characteristic_id,
            is_required: link.is_required,
            show_in_key_specs: link.show_in_key_specs,
            order_index: link.order_index,
        }
    }
}

/// Option entry surfaced with a linked characteristic
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct LinkedOptionDto {
    pub value: String,
    pub label: String,
    pub order_index: i32,
}

/// A category's characteristic, joined with link metadata and (for
/// select/multiselect kinds) the ordered option set
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct LinkedCharacteristicDto {
    pub characteristic_id: Uuid,
    pub key: String,
    pub label: String,
    pub name: LocalizedText,
    pub kind: CharacteristicKind,
    pub is_filterable: bool,
    pub is_required: bool,
    pub show_in_key_specs: bool,
    pub order_index: i32,
    pub options: Vec<LinkedOptionDto>,
}

/// Result of a propagation run
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct CopyResultDto {
    /// Links inserted into the target category
    pub copied: usize,
    /// Source links skipped because the target already had the pair
    pub skipped: usize,
}
