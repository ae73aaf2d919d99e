use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::types::Json;
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::shared::localization::LocalizedText;

/// Value type of a characteristic. Drives data entry widgets, filter
/// derivation and product spec validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "characteristic_kind", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum CharacteristicKind {
    Text,
    Number,
    Boolean,
    Select,
    Multiselect,
    Range,
}

impl CharacteristicKind {
    /// Kinds whose values come from an enumerated option set
    pub fn has_options(self) -> bool {
        matches!(self, Self::Select | Self::Multiselect)
    }
}

/// Database model for a dictionary characteristic.
///
/// `key` is the machine key used in product spec documents and is immutable
/// after creation; renaming it would silently orphan existing spec values.
#[derive(Debug, Clone, FromRow)]
pub struct Characteristic {
    pub id: Uuid,
    pub key: String,
    pub name: Json<LocalizedText>,
    pub kind: CharacteristicKind,
    pub is_filterable: bool,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
