use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    Json,
};
use uuid::Uuid;

use crate::core::error::Result;
use crate::core::extractor::{Actor, AppJson};
use crate::features::filters::dtos::{
    CreateFilterDto, FilterListQuery, FilterResponseDto, UpdateFilterDto,
};
use crate::features::filters::services::FilterService;
use crate::shared::localization::LangQuery;
use crate::shared::types::ApiResponse;

/// Create a filter definition for a subcategory
#[utoipa::path(
    post,
    path = "/api/subcategories/{id}/filters",
    params(
        ("id" = Uuid, Path, description = "Subcategory ID"),
        LangQuery
    ),
    request_body = CreateFilterDto,
    responses(
        (status = 200, description = "Filter created", body = ApiResponse<FilterResponseDto>),
        (status = 400, description = "Validation error"),
        (status = 404, description = "Subcategory or characteristic not found")
    ),
    tag = "filters"
)]
pub async fn create_filter(
    State(service): State<Arc<FilterService>>,
    Path(id): Path<Uuid>,
    Query(lang): Query<LangQuery>,
    Actor(actor): Actor,
    AppJson(dto): AppJson<CreateFilterDto>,
) -> Result<Json<ApiResponse<FilterResponseDto>>> {
    let filter = service.create(&actor, id, dto, lang.lang).await?;

    Ok(Json(ApiResponse::success(Some(filter), None, None)))
}

/// List a subcategory's filters in display order
#[utoipa::path(
    get,
    path = "/api/subcategories/{id}/filters",
    params(
        ("id" = Uuid, Path, description = "Subcategory ID"),
        FilterListQuery
    ),
    responses(
        (status = 200, description = "List of filters", body = ApiResponse<Vec<FilterResponseDto>>),
        (status = 404, description = "Subcategory not found")
    ),
    tag = "filters"
)]
pub async fn list_filters(
    State(service): State<Arc<FilterService>>,
    Path(id): Path<Uuid>,
    Query(query): Query<FilterListQuery>,
) -> Result<Json<ApiResponse<Vec<FilterResponseDto>>>> {
    let filters = service
        .list_for_subcategory(id, query.include_disabled, query.lang)
        .await?;

    Ok(Json(ApiResponse::success(Some(filters), None, None)))
}

/// Update a filter definition (PATCH semantics)
#[utoipa::path(
    patch,
    path = "/api/filters/{id}",
    params(
        ("id" = Uuid, Path, description = "Filter ID"),
        LangQuery
    ),
    request_body = UpdateFilterDto,
    responses(
        (status = 200, description = "Filter updated", body = ApiResponse<FilterResponseDto>),
        (status = 404, description = "Filter not found")
    ),
    tag = "filters"
)]
pub async fn update_filter(
    State(service): State<Arc<FilterService>>,
    Path(id): Path<Uuid>,
    Query(lang): Query<LangQuery>,
    Actor(actor): Actor,
    AppJson(dto): AppJson<UpdateFilterDto>,
) -> Result<Json<ApiResponse<FilterResponseDto>>> {
    let filter = service.update(&actor, id, dto, lang.lang).await?;

    Ok(Json(ApiResponse::success(Some(filter), None, None)))
}

/// Flip a filter's enabled flag. Disabled filters stay stored but are
/// excluded from the storefront listing.
#[utoipa::path(
    post,
    path = "/api/filters/{id}/toggle",
    params(
        ("id" = Uuid, Path, description = "Filter ID"),
        LangQuery
    ),
    responses(
        (status = 200, description = "Filter toggled", body = ApiResponse<FilterResponseDto>),
        (status = 404, description = "Filter not found")
    ),
    tag = "filters"
)]
pub async fn toggle_filter(
    State(service): State<Arc<FilterService>>,
    Path(id): Path<Uuid>,
    Query(lang): Query<LangQuery>,
    Actor(actor): Actor,
) -> Result<Json<ApiResponse<FilterResponseDto>>> {
    let filter = service.toggle_enabled(&actor, id, lang.lang).await?;

    Ok(Json(ApiResponse::success(Some(filter), None, None)))
}

/// Hard-delete a filter definition
#[utoipa::path(
    delete,
    path = "/api/filters/{id}",
    params(
        ("id" = Uuid, Path, description = "Filter ID")
    ),
    responses(
        (status = 200, description = "Filter deleted"),
        (status = 404, description = "Filter not found")
    ),
    tag = "filters"
)]
pub async fn delete_filter(
    State(service): State<Arc<FilterService>>,
    Path(id): Path<Uuid>,
    Actor(actor): Actor,
) -> Result<Json<ApiResponse<()>>> {
    service.delete(&actor, id).await?;

    Ok(Json(ApiResponse::success(
        None,
        Some("Filter deleted".to_string()),
        None,
    )))
}
