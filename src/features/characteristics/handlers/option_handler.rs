use std::sync::Arc;

use axum::{
    extract::{Path, State},
    Json,
};
use uuid::Uuid;
use validator::Validate;

use crate::core::error::{AppError, Result};
use crate::core::extractor::{Actor, AppJson};
use crate::features::characteristics::dtos::{CreateOptionDto, OptionResponseDto, UpdateOptionDto};
use crate::features::characteristics::services::OptionService;
use crate::shared::types::ApiResponse;

/// Create an option for a select/multiselect characteristic
#[utoipa::path(
    post,
    path = "/api/characteristics/{id}/options",
    params(
        ("id" = Uuid, Path, description = "Characteristic ID")
    ),
    request_body = CreateOptionDto,
    responses(
        (status = 200, description = "Option created", body = ApiResponse<OptionResponseDto>),
        (status = 400, description = "Characteristic kind does not take options"),
        (status = 404, description = "Characteristic not found"),
        (status = 409, description = "Duplicate option value")
    ),
    tag = "characteristic-options"
)]
pub async fn create_option(
    State(service): State<Arc<OptionService>>,
    Path(id): Path<Uuid>,
    Actor(actor): Actor,
    AppJson(dto): AppJson<CreateOptionDto>,
) -> Result<Json<ApiResponse<OptionResponseDto>>> {
    dto.validate()
        .map_err(|e| AppError::Validation(format!("Invalid request: {}", e)))?;

    let option = service.create(&actor, id, dto).await?;

    Ok(Json(ApiResponse::success(Some(option), None, None)))
}

/// List options of a characteristic in display order
#[utoipa::path(
    get,
    path = "/api/characteristics/{id}/options",
    params(
        ("id" = Uuid, Path, description = "Characteristic ID")
    ),
    responses(
        (status = 200, description = "List of options", body = ApiResponse<Vec<OptionResponseDto>>),
        (status = 404, description = "Characteristic not found")
    ),
    tag = "characteristic-options"
)]
pub async fn list_options(
    State(service): State<Arc<OptionService>>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<Vec<OptionResponseDto>>>> {
    let options = service.list_for_characteristic(id).await?;

    Ok(Json(ApiResponse::success(Some(options), None, None)))
}

/// Update an option (PATCH semantics)
#[utoipa::path(
    patch,
    path = "/api/characteristics/{id}/options/{option_id}",
    params(
        ("id" = Uuid, Path, description = "Characteristic ID"),
        ("option_id" = Uuid, Path, description = "Option ID")
    ),
    request_body = UpdateOptionDto,
    responses(
        (status = 200, description = "Option updated", body = ApiResponse<OptionResponseDto>),
        (status = 404, description = "Option not found")
    ),
    tag = "characteristic-options"
)]
pub async fn update_option(
    State(service): State<Arc<OptionService>>,
    Path((id, option_id)): Path<(Uuid, Uuid)>,
    Actor(actor): Actor,
    AppJson(dto): AppJson<UpdateOptionDto>,
) -> Result<Json<ApiResponse<OptionResponseDto>>> {
    dto.validate()
        .map_err(|e| AppError::Validation(format!("Invalid request: {}", e)))?;

    let option = service.update(&actor, id, option_id, dto).await?;

    Ok(Json(ApiResponse::success(Some(option), None, None)))
}

/// Delete an option
#[utoipa::path(
    delete,
    path = "/api/characteristics/{id}/options/{option_id}",
    params(
        ("id" = Uuid, Path, description = "Characteristic ID"),
        ("option_id" = Uuid, Path, description = "Option ID")
    ),
    responses(
        (status = 200, description = "Option deleted"),
        (status = 404, description = "Option not found")
    ),
    tag = "characteristic-options"
)]
pub async fn delete_option(
    State(service): State<Arc<OptionService>>,
    Path((id, option_id)): Path<(Uuid, Uuid)>,
    Actor(actor): Actor,
) -> Result<Json<ApiResponse<()>>> {
    service.delete(&actor, id, option_id).await?;

    Ok(Json(ApiResponse::success(
        None,
        Some("Option deleted".to_string()),
        None,
    )))
}
