use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::types::Json;
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::shared::localization::LocalizedText;

/// Storefront widget type of a filter. Independent of the source
/// characteristic's kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "filter_kind", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum FilterKind {
    Select,
    Range,
    Checkbox,
}

/// Where a filter definition comes from: derived from a linked
/// characteristic, or defined standalone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "filter_source", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum FilterSource {
    Characteristic,
    Custom,
}

/// Database model for a storefront filter definition.
///
/// `order_index` is assigned as current-max-for-subcategory + 1 at creation
/// and never reused after deletes. A characteristic-sourced filter may
/// drift from its source characteristic after creation; no sync is
/// enforced.
#[derive(Debug, Clone, FromRow)]
#[allow(dead_code)]
pub struct CategoryFilter {
    pub id: Uuid,
    pub subcategory_id: Uuid,
    pub characteristic_id: Option<Uuid>,
    pub source: FilterSource,
    pub kind: FilterKind,
    pub label: Json<LocalizedText>,
    pub is_enabled: bool,
    pub order_index: i32,
    pub min_value: Option<f64>,
    pub max_value: Option<f64>,
    pub is_multiselect: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Read model: a filter joined with its source characteristic (when any)
#[derive(Debug, Clone, FromRow)]
pub struct FilterWithCharacteristicRow {
    pub id: Uuid,
    pub subcategory_id: Uuid,
    pub characteristic_id: Option<Uuid>,
    pub source: FilterSource,
    pub kind: FilterKind,
    pub label: Json<LocalizedText>,
    pub is_enabled: bool,
    pub order_index: i32,
    pub min_value: Option<f64>,
    pub max_value: Option<f64>,
    pub is_multiselect: bool,
    pub characteristic_key: Option<String>,
    pub characteristic_name: Option<Json<LocalizedText>>,
}
