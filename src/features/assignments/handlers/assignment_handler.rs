use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    Json,
};
use uuid::Uuid;

use crate::core::error::Result;
use crate::core::extractor::{Actor, AppJson};
use crate::features::assignments::dtos::{
    AssignCharacteristicDto, CopyLinksDto, CopyResultDto, LinkResponseDto,
    LinkedCharacteristicDto, UpdateLinkDto,
};
use crate::features::assignments::services::AssignmentService;
use crate::shared::localization::LangQuery;
use crate::shared::types::ApiResponse;

/// List a category's characteristics with link metadata, ordered for display
#[utoipa::path(
    get,
    path = "/api/categories/{id}/characteristics",
    params(
        ("id" = Uuid, Path, description = "Category ID"),
        LangQuery
    ),
    responses(
        (status = 200, description = "Linked characteristics", body = ApiResponse<Vec<LinkedCharacteristicDto>>),
        (status = 404, description = "Category not found")
    ),
    tag = "assignments"
)]
pub async fn list_category_characteristics(
    State(service): State<Arc<AssignmentService>>,
    Path(id): Path<Uuid>,
    Query(lang): Query<LangQuery>,
) -> Result<Json<ApiResponse<Vec<LinkedCharacteristicDto>>>> {
    let characteristics = service.list_for_category(id, lang.lang).await?;

    Ok(Json(ApiResponse::success(Some(characteristics), None, None)))
}

/// Assign a characteristic to a category (idempotent upsert)
#[utoipa::path(
    post,
    path = "/api/categories/{id}/characteristics",
    params(
        ("id" = Uuid, Path, description = "Category ID")
    ),
    request_body = AssignCharacteristicDto,
    responses(
        (status = 200, description = "Link created or updated", body = ApiResponse<LinkResponseDto>),
        (status = 404, description = "Category or characteristic not found")
    ),
    tag = "assignments"
)]
pub async fn assign_characteristic(
    State(service): State<Arc<AssignmentService>>,
    Path(id): Path<Uuid>,
    Actor(actor): Actor,
    AppJson(dto): AppJson<AssignCharacteristicDto>,
) -> Result<Json<ApiResponse<LinkResponseDto>>> {
    let link = service.assign(&actor, id, dto).await?;

    Ok(Json(ApiResponse::success(Some(link), None, None)))
}

/// Update link metadata (PATCH semantics)
#[utoipa::path(
    patch,
    path = "/api/categories/{id}/characteristics/{characteristic_id}",
    params(
        ("id" = Uuid, Path, description = "Category ID"),
        ("characteristic_id" = Uuid, Path, description = "Characteristic ID")
    ),
    request_body = UpdateLinkDto,
    responses(
        (status = 200, description = "Link updated", body = ApiResponse<LinkResponseDto>),
        (status = 404, description = "Link not found")
    ),
    tag = "assignments"
)]
pub async fn update_link(
    State(service): State<Arc<AssignmentService>>,
    Path((id, characteristic_id)): Path<(Uuid, Uuid)>,
    Actor(actor): Actor,
    AppJson(dto): AppJson<UpdateLinkDto>,
) -> Result<Json<ApiResponse<LinkResponseDto>>> {
    let link = service.update_link(&actor, id, characteristic_id, dto).await?;

    Ok(Json(ApiResponse::success(Some(link), None, None)))
}

/// Unassign a characteristic from a category.
///
/// Removing a pair that is not linked is not an error; absence is success.
#[utoipa::path(
    delete,
    path = "/api/categories/{id}/characteristics/{characteristic_id}",
    params(
        ("id" = Uuid, Path, description = "Category ID"),
        ("characteristic_id" = Uuid, Path, description = "Characteristic ID")
    ),
    responses(
        (status = 200, description = "Link removed (or was already absent)"),
    ),
    tag = "assignments"
)]
pub async fn unassign_characteristic(
    State(service): State<Arc<AssignmentService>>,
    Path((id, characteristic_id)): Path<(Uuid, Uuid)>,
    Actor(actor): Actor,
) -> Result<Json<ApiResponse<()>>> {
    service.unassign(&actor, id, characteristic_id).await?;

    Ok(Json(ApiResponse::success(
        None,
        Some("Characteristic unassigned".to_string()),
        None,
    )))
}

/// Copy all characteristic links from this category onto another.
///
/// Existing target links are never overwritten; re-running the copy adds
/// nothing. Self-copy is a no-op.
#[utoipa::path(
    post,
    path = "/api/categories/{id}/characteristics/copy",
    params(
        ("id" = Uuid, Path, description = "Source category ID")
    ),
    request_body = CopyLinksDto,
    responses(
        (status = 200, description = "Propagation result", body = ApiResponse<CopyResultDto>),
        (status = 404, description = "Source or target category not found")
    ),
    tag = "assignments"
)]
pub async fn copy_characteristics(
    State(service): State<Arc<AssignmentService>>,
    Path(id): Path<Uuid>,
    Actor(actor): Actor,
    AppJson(dto): AppJson<CopyLinksDto>,
) -> Result<Json<ApiResponse<CopyResultDto>>> {
    let result = service.copy(&actor, id, dto.target_category_id).await?;

    Ok(Json(ApiResponse::success(Some(result), None, None)))
}
