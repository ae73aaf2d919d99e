use chrono::{DateTime, Utc};
use sqlx::types::Json;
use sqlx::FromRow;
use uuid::Uuid;

use crate::features::characteristics::models::CharacteristicKind;
use crate::shared::localization::LocalizedText;

/// Database model for a category-characteristic link.
///
/// The (category_id, characteristic_id) pair is the primary key; the rest
/// is per-link configuration. `created_at` is the tie-break for stable
/// display ordering.
#[derive(Debug, Clone, FromRow)]
#[allow(dead_code)]
pub struct CategoryCharacteristic {
    pub category_id: Uuid,
    pub characteristic_id: Uuid,
    pub is_required: bool,
    pub show_in_key_specs: bool,
    pub order_index: i32,
    pub created_at: DateTime<Utc>,
}

/// Read model: a link joined with its characteristic's dictionary entry
#[derive(Debug, Clone, FromRow)]
pub struct LinkedCharacteristicRow {
    pub characteristic_id: Uuid,
    pub key: String,
    pub name: Json<LocalizedText>,
    pub kind: CharacteristicKind,
    pub is_filterable: bool,
    pub is_required: bool,
    pub show_in_key_specs: bool,
    pub order_index: i32,
}
