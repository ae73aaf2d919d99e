use std::sync::Arc;

use sqlx::types::Json;
use sqlx::PgPool;
use uuid::Uuid;

use crate::core::error::{handle_db_error, AppError, Result};
use crate::features::characteristics::dtos::{
    CharacteristicQueryParams, CharacteristicResponseDto, CreateCharacteristicDto,
    UpdateCharacteristicDto,
};
use crate::features::characteristics::models::Characteristic;
use crate::shared::audit::{AuditEvent, AuditSink};
use crate::shared::types::PaginationQuery;

const CHARACTERISTIC_COLUMNS: &str =
    "id, key, name, kind, is_filterable, is_active, created_at, updated_at";

/// Service for the global characteristic dictionary
pub struct CharacteristicService {
    pool: PgPool,
    audit: Arc<dyn AuditSink>,
}

impl CharacteristicService {
    pub fn new(pool: PgPool, audit: Arc<dyn AuditSink>) -> Self {
        Self { pool, audit }
    }

    /// Create a dictionary characteristic. The machine key must be unique.
    pub async fn create(
        &self,
        actor: &str,
        dto: CreateCharacteristicDto,
    ) -> Result<CharacteristicResponseDto> {
        let query = format!(
            r#"
            INSERT INTO characteristics (key, name, kind, is_filterable)
            VALUES ($1, $2, $3, $4)
            RETURNING {}
            "#,
            CHARACTERISTIC_COLUMNS
        );

        let characteristic = sqlx::query_as::<_, Characteristic>(&query)
            .bind(&dto.key)
            .bind(Json(&dto.name))
            .bind(dto.kind)
            .bind(dto.is_filterable)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| match handle_db_error(e) {
                AppError::Conflict(_) => AppError::Conflict(format!(
                    "Characteristic with key '{}' already exists",
                    dto.key
                )),
                other => other,
            })?;

        let response = CharacteristicResponseDto::from(characteristic);
        self.audit.emit(
            AuditEvent::new(actor, "characteristic", response.id, "create").with_after(&response),
        );

        Ok(response)
    }

    /// Get characteristic by ID
    pub async fn get_by_id(&self, id: Uuid) -> Result<CharacteristicResponseDto> {
        let query = format!(
            "SELECT {} FROM characteristics WHERE id = $1",
            CHARACTERISTIC_COLUMNS
        );

        let characteristic = sqlx::query_as::<_, Characteristic>(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(AppError::Database)?
            .ok_or_else(|| AppError::NotFound(format!("Characteristic {} not found", id)))?;

        Ok(characteristic.into())
    }

    /// List characteristics with pagination and filters
    pub async fn list(
        &self,
        params: &CharacteristicQueryParams,
        pagination: &PaginationQuery,
    ) -> Result<(Vec<CharacteristicResponseDto>, i64)> {
        let mut conditions = Vec::new();

        if let Some(is_active) = params.is_active {
            conditions.push(format!("is_active = {}", is_active));
        }

        let search_pattern = params.search.as_ref().map(|s| format!("%{}%", s));

        if let Some(ref search) = search_pattern {
            // WITH SEARCH: $1 for search, $2 for limit, $3 for offset
            conditions.push("key ILIKE $1".to_string());
            let where_clause = format!("WHERE {}", conditions.join(" AND "));

            let count_query = format!("SELECT COUNT(*) FROM characteristics {}", where_clause);
            let total: i64 = sqlx::query_scalar(&count_query)
                .bind(search)
                .fetch_one(&self.pool)
                .await
                .map_err(AppError::Database)?;

            let query = format!(
                "SELECT {} FROM characteristics {} ORDER BY key LIMIT $2 OFFSET $3",
                CHARACTERISTIC_COLUMNS, where_clause
            );

            let characteristics: Vec<Characteristic> = sqlx::query_as(&query)
                .bind(search)
                .bind(pagination.limit())
                .bind(pagination.offset())
                .fetch_all(&self.pool)
                .await
                .map_err(AppError::Database)?;

            Ok((
                characteristics.into_iter().map(Into::into).collect(),
                total,
            ))
        } else {
            let where_clause = if conditions.is_empty() {
                String::new()
            } else {
                format!("WHERE {}", conditions.join(" AND "))
            };

            let count_query = format!("SELECT COUNT(*) FROM characteristics {}", where_clause);
            let total: i64 = sqlx::query_scalar(&count_query)
                .fetch_one(&self.pool)
                .await
                .map_err(AppError::Database)?;

            let query = format!(
                "SELECT {} FROM characteristics {} ORDER BY key LIMIT $1 OFFSET $2",
                CHARACTERISTIC_COLUMNS, where_clause
            );

            let characteristics: Vec<Characteristic> = sqlx::query_as(&query)
                .bind(pagination.limit())
                .bind(pagination.offset())
                .fetch_all(&self.pool)
                .await
                .map_err(AppError::Database)?;

            Ok((
                characteristics.into_iter().map(Into::into).collect(),
                total,
            ))
        }
    }

    /// Update a characteristic (PATCH semantics, key is immutable)
    pub async fn update(
        &self,
        actor: &str,
        id: Uuid,
        dto: UpdateCharacteristicDto,
    ) -> Result<CharacteristicResponseDto> {
        let before = self.get_by_id(id).await?;

        let query = format!(
            r#"
            UPDATE characteristics
            SET name = COALESCE($1, name),
                kind = COALESCE($2, kind),
                is_filterable = COALESCE($3, is_filterable),
                is_active = COALESCE($4, is_active),
                updated_at = NOW()
            WHERE id = $5
            RETURNING {}
            "#,
            CHARACTERISTIC_COLUMNS
        );

        let characteristic = sqlx::query_as::<_, Characteristic>(&query)
            .bind(dto.name.as_ref().map(Json))
            .bind(dto.kind)
            .bind(dto.is_filterable)
            .bind(dto.is_active)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(handle_db_error)?
            .ok_or_else(|| AppError::NotFound(format!("Characteristic {} not found", id)))?;

        let response = CharacteristicResponseDto::from(characteristic);
        self.audit.emit(
            AuditEvent::new(actor, "characteristic", id, "update")
                .with_before(&before)
                .with_after(&response),
        );

        Ok(response)
    }

    /// Delete a characteristic.
    ///
    /// Options and category links cascade away; product spec values keyed by
    /// the deleted key are left in place, stale keys are tolerated.
    pub async fn delete(&self, actor: &str, id: Uuid) -> Result<()> {
        let before = self.get_by_id(id).await?;

        let result = sqlx::query("DELETE FROM characteristics WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(AppError::Database)?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!(
                "Characteristic {} not found",
                id
            )));
        }

        self.audit
            .emit(AuditEvent::new(actor, "characteristic", id, "delete").with_before(&before));

        Ok(())
    }
}
