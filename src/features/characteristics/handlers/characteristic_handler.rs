use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    Json,
};
use uuid::Uuid;
use validator::Validate;

use crate::core::error::{AppError, Result};
use crate::core::extractor::{Actor, AppJson};
use crate::features::characteristics::dtos::{
    CharacteristicQueryParams, CharacteristicResponseDto, CreateCharacteristicDto,
    UpdateCharacteristicDto,
};
use crate::features::characteristics::services::CharacteristicService;
use crate::shared::types::{ApiResponse, Meta, PaginationQuery};

/// Create a dictionary characteristic
#[utoipa::path(
    post,
    path = "/api/characteristics",
    request_body = CreateCharacteristicDto,
    responses(
        (status = 200, description = "Characteristic created", body = ApiResponse<CharacteristicResponseDto>),
        (status = 400, description = "Validation error"),
        (status = 409, description = "Duplicate machine key")
    ),
    tag = "characteristics"
)]
pub async fn create_characteristic(
    State(service): State<Arc<CharacteristicService>>,
    Actor(actor): Actor,
    AppJson(dto): AppJson<CreateCharacteristicDto>,
) -> Result<Json<ApiResponse<CharacteristicResponseDto>>> {
    dto.validate()
        .map_err(|e| AppError::Validation(format!("Invalid request: {}", e)))?;

    let characteristic = service.create(&actor, dto).await?;

    Ok(Json(ApiResponse::success(Some(characteristic), None, None)))
}

/// List dictionary characteristics
#[utoipa::path(
    get,
    path = "/api/characteristics",
    params(CharacteristicQueryParams, PaginationQuery),
    responses(
        (status = 200, description = "List of characteristics", body = ApiResponse<Vec<CharacteristicResponseDto>>),
    ),
    tag = "characteristics"
)]
pub async fn list_characteristics(
    State(service): State<Arc<CharacteristicService>>,
    Query(params): Query<CharacteristicQueryParams>,
    Query(pagination): Query<PaginationQuery>,
) -> Result<Json<ApiResponse<Vec<CharacteristicResponseDto>>>> {
    let (characteristics, total) = service.list(&params, &pagination).await?;

    Ok(Json(ApiResponse::success(
        Some(characteristics),
        None,
        Some(Meta { total }),
    )))
}

/// Get a characteristic by ID
#[utoipa::path(
    get,
    path = "/api/characteristics/{id}",
    params(
        ("id" = Uuid, Path, description = "Characteristic ID")
    ),
    responses(
        (status = 200, description = "Characteristic found", body = ApiResponse<CharacteristicResponseDto>),
        (status = 404, description = "Characteristic not found")
    ),
    tag = "characteristics"
)]
pub async fn get_characteristic(
    State(service): State<Arc<CharacteristicService>>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<CharacteristicResponseDto>>> {
    let characteristic = service.get_by_id(id).await?;

    Ok(Json(ApiResponse::success(Some(characteristic), None, None)))
}

/// Update a characteristic (PATCH semantics, key is immutable)
#[utoipa::path(
    patch,
    path = "/api/characteristics/{id}",
    params(
        ("id" = Uuid, Path, description = "Characteristic ID")
    ),
    request_body = UpdateCharacteristicDto,
    responses(
        (status = 200, description = "Characteristic updated", body = ApiResponse<CharacteristicResponseDto>),
        (status = 404, description = "Characteristic not found")
    ),
    tag = "characteristics"
)]
pub async fn update_characteristic(
    State(service): State<Arc<CharacteristicService>>,
    Path(id): Path<Uuid>,
    Actor(actor): Actor,
    AppJson(dto): AppJson<UpdateCharacteristicDto>,
) -> Result<Json<ApiResponse<CharacteristicResponseDto>>> {
    dto.validate()
        .map_err(|e| AppError::Validation(format!("Invalid request: {}", e)))?;

    let characteristic = service.update(&actor, id, dto).await?;

    Ok(Json(ApiResponse::success(Some(characteristic), None, None)))
}

/// Delete a characteristic. Its options and category links cascade away;
/// product spec values referencing its key stay untouched.
#[utoipa::path(
    delete,
    path = "/api/characteristics/{id}",
    params(
        ("id" = Uuid, Path, description = "Characteristic ID")
    ),
    responses(
        (status = 200, description = "Characteristic deleted"),
        (status = 404, description = "Characteristic not found")
    ),
    tag = "characteristics"
)]
pub async fn delete_characteristic(
    State(service): State<Arc<CharacteristicService>>,
    Path(id): Path<Uuid>,
    Actor(actor): Actor,
) -> Result<Json<ApiResponse<()>>> {
    service.delete(&actor, id).await?;

    Ok(Json(ApiResponse::success(
        None,
        Some("Characteristic deleted".to_string()),
        None,
    )))
}
