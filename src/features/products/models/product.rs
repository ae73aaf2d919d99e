use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::types::Json;
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::shared::localization::LocalizedText;

/// A single product spec value, discriminated by JSON shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(untagged)]
pub enum SpecValue {
    Boolean(bool),
    Number(f64),
    Text(String),
    Many(Vec<String>),
}

impl SpecValue {
    /// Human-readable shape name used in validation reports
    pub fn shape(&self) -> &'static str {
        match self {
            SpecValue::Boolean(_) => "boolean",
            SpecValue::Number(_) => "number",
            SpecValue::Text(_) => "text",
            SpecValue::Many(_) => "list",
        }
    }
}

/// Per-product map of characteristic key to value. Schema-on-read: nothing
/// at the storage level ties keys to the category's link set.
pub type SpecDocument = BTreeMap<String, SpecValue>;

/// Database model for a product (external collaborator surface)
#[derive(Debug, Clone, FromRow)]
#[allow(dead_code)]
pub struct Product {
    pub id: Uuid,
    pub category_id: Uuid,
    pub slug: String,
    pub name: Json<LocalizedText>,
    pub specs: Json<SpecDocument>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
