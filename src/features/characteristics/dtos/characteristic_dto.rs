use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::features::characteristics::models::{Characteristic, CharacteristicKind};
use crate::shared::localization::LocalizedText;

/// Request DTO for creating a dictionary characteristic
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateCharacteristicDto {
    /// Machine key used in product spec documents. Immutable after creation.
    #[validate(
        length(min = 1, max = 64, message = "Key must be 1-64 characters"),
        regex(
            path = "*crate::shared::validation::KEY_REGEX",
            message = "Key must be lowercase alphanumeric with single underscores"
        )
    )]
    pub key: String,

    pub name: LocalizedText,

    pub kind: CharacteristicKind,

    #[serde(default)]
    pub is_filterable: bool,
}

/// Request DTO for updating a characteristic (PATCH semantics).
/// The machine key is deliberately absent: it cannot be renamed.
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct UpdateCharacteristicDto {
    pub name: Option<LocalizedText>,
    pub kind: Option<CharacteristicKind>,
    pub is_filterable: Option<bool>,
    pub is_active: Option<bool>,
}

/// Query params for listing characteristics
#[derive(Debug, Clone, Default, Deserialize, utoipa::IntoParams)]
pub struct CharacteristicQueryParams {
    /// Filter by active flag
    pub is_active: Option<bool>,
    /// Substring search on the machine key
    pub search: Option<String>,
}

/// Response DTO for a characteristic
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct CharacteristicResponseDto {
    pub id: Uuid,
    pub key: String,
    pub name: LocalizedText,
    pub kind: CharacteristicKind,
    pub is_filterable: bool,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Characteristic> for CharacteristicResponseDto {
    fn from(c: Characteristic) -> Self {
        Self {
            id: c.id,
            key: c.key,
            name: c.name.0,
            kind: c.kind,
            is_filterable: c.is_filterable,
            is_active: c.is_active,
            created_at: c.created_at,
            updated_at: c.updated_at,
        }
    }
}
