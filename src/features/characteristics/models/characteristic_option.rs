use chrono::{DateTime, Utc};
use sqlx::types::Json;
use sqlx::FromRow;
use uuid::Uuid;

use crate::shared::localization::LocalizedText;

/// Database model for an enumerated option of a select/multiselect
/// characteristic. `value` is the canonical form referenced by product
/// specs; labels are resolved for presentation only.
#[derive(Debug, Clone, FromRow)]
#[allow(dead_code)]
pub struct CharacteristicOption {
    pub id: Uuid,
    pub characteristic_id: Uuid,
    pub value: String,
    pub label: Json<LocalizedText>,
    pub order_index: i32,
    pub created_at: DateTime<Utc>,
}
