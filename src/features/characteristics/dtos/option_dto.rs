use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::features::characteristics::models::CharacteristicOption;
use crate::shared::localization::LocalizedText;

/// Request DTO for creating an option on a select/multiselect characteristic
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateOptionDto {
    /// Canonical stored value referenced by product specs
    #[validate(length(min = 1, max = 128, message = "Value must be 1-128 characters"))]
    pub value: String,

    pub label: LocalizedText,

    #[serde(default)]
    pub order_index: i32,
}

/// Request DTO for updating an option (PATCH semantics)
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct UpdateOptionDto {
    #[validate(length(min = 1, max = 128, message = "Value must be 1-128 characters"))]
    pub value: Option<String>,

    pub label: Option<LocalizedText>,

    pub order_index: Option<i32>,
}

/// Response DTO for a characteristic option
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct OptionResponseDto {
    pub id: Uuid,
    pub characteristic_id: Uuid,
    pub value: String,
    pub label: LocalizedText,
    pub order_index: i32,
}

impl From<CharacteristicOption> for OptionResponseDto {
    fn from(o: CharacteristicOption) -> Self {
        Self {
            id: o.id,
            characteristic_id: o.characteristic_id,
            value: o.value,
            label: o.label.0,
            order_index: o.order_index,
        }
    }
}
