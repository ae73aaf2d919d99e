use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::features::filters::models::{CategoryFilter, FilterKind, FilterSource};
use crate::shared::localization::{Lang, LocalizedText};

/// Request DTO for creating a filter definition
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct CreateFilterDto {
    pub source: FilterSource,

    /// Required when source = characteristic, forbidden otherwise
    pub characteristic_id: Option<Uuid>,

    pub kind: FilterKind,

    /// Display label. Defaults to the source characteristic's name for
    /// characteristic-sourced filters; required for custom ones.
    pub label: Option<LocalizedText>,

    #[serde(default = "default_true")]
    pub is_enabled: bool,

    /// Advisory lower bound for range filters
    pub min_value: Option<f64>,

    /// Advisory upper bound for range filters
    pub max_value: Option<f64>,

    #[serde(default)]
    pub is_multiselect: bool,
}

fn default_true() -> bool {
    true
}

/// Request DTO for updating a filter definition (PATCH semantics).
/// `order_index` is deliberately absent: it is a creation-time counter.
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct UpdateFilterDto {
    pub kind: Option<FilterKind>,
    pub label: Option<LocalizedText>,
    pub is_enabled: Option<bool>,
    pub min_value: Option<f64>,
    pub max_value: Option<f64>,
    pub is_multiselect: Option<bool>,
}

/// Query params for listing a subcategory's filters
#[derive(Debug, Clone, Copy, Default, Deserialize, utoipa::IntoParams)]
pub struct FilterListQuery {
    /// Include disabled filters (admin view). Storefront listing omits them.
    #[serde(default)]
    pub include_disabled: bool,

    /// Display language (ru, uz or en). Defaults to ru.
    #[serde(default)]
    pub lang: Lang,
}

/// Response DTO for a filter definition
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct FilterResponseDto {
    pub id: Uuid,
    pub subcategory_id: Uuid,
    pub source: FilterSource,
    pub characteristic_id: Option<Uuid>,
    /// Machine key of the source characteristic, when characteristic-sourced
    pub characteristic_key: Option<String>,
    /// Resolved display name of the source characteristic
    pub characteristic_label: Option<String>,
    pub kind: FilterKind,
    pub name: LocalizedText,
    /// Resolved display label for the requested language
    pub label: String,
    pub is_enabled: bool,
    pub order_index: i32,
    pub min_value: Option<f64>,
    pub max_value: Option<f64>,
    pub is_multiselect: bool,
}

impl FilterResponseDto {
    pub fn from_filter(filter: CategoryFilter, lang: Lang) -> Self {
        let label = filter.label.0.resolve(lang).to_string();
        Self {
            id: filter.id,
            subcategory_id: filter.subcategory_id,
            source: filter.source,
            characteristic_id: filter.characteristic_id,
            characteristic_key: None,
            characteristic_label: None,
            kind: filter.kind,
            name: filter.label.0,
            label,
            is_enabled: filter.is_enabled,
            order_index: filter.order_index,
            min_value: filter.min_value,
            max_value: filter.max_value,
            is_multiselect: filter.is_multiselect,
        }
    }
}
