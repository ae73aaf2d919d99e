use chrono::{DateTime, Utc};
use sqlx::types::Json;
use sqlx::FromRow;
use uuid::Uuid;

use crate::shared::localization::LocalizedText;

/// Database model for a catalog category.
///
/// Categories form a self-referential tree via `parent_id`; cycles are
/// rejected at the service layer when reparenting.
#[derive(Debug, Clone, FromRow)]
#[allow(dead_code)]
pub struct Category {
    pub id: Uuid,
    pub parent_id: Option<Uuid>,
    pub slug: String,
    pub name: Json<LocalizedText>,
    pub icon: Option<String>,
    pub order_index: i32,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
