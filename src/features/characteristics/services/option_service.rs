use std::sync::Arc;

use sqlx::types::Json;
use sqlx::PgPool;
use uuid::Uuid;

use crate::core::error::{handle_db_error, AppError, Result};
use crate::features::characteristics::dtos::{CreateOptionDto, OptionResponseDto, UpdateOptionDto};
use crate::features::characteristics::models::{Characteristic, CharacteristicOption};
use crate::shared::audit::{AuditEvent, AuditSink};

const OPTION_COLUMNS: &str = "id, characteristic_id, value, label, order_index, created_at";

/// Service for the option sets of select/multiselect characteristics
pub struct OptionService {
    pool: PgPool,
    audit: Arc<dyn AuditSink>,
}

impl OptionService {
    pub fn new(pool: PgPool, audit: Arc<dyn AuditSink>) -> Self {
        Self { pool, audit }
    }

    async fn fetch_characteristic(&self, id: Uuid) -> Result<Characteristic> {
        sqlx::query_as::<_, Characteristic>(
            "SELECT id, key, name, kind, is_filterable, is_active, created_at, updated_at \
             FROM characteristics WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(AppError::Database)?
        .ok_or_else(|| AppError::NotFound(format!("Characteristic {} not found", id)))
    }

    /// Create an option. Only meaningful for select/multiselect kinds.
    pub async fn create(
        &self,
        actor: &str,
        characteristic_id: Uuid,
        dto: CreateOptionDto,
    ) -> Result<OptionResponseDto> {
        let characteristic = self.fetch_characteristic(characteristic_id).await?;
        if !characteristic.kind.has_options() {
            return Err(AppError::Validation(format!(
                "Characteristic '{}' is not select/multiselect and cannot have options",
                characteristic.key
            )));
        }

        let query = format!(
            r#"
            INSERT INTO characteristic_options (characteristic_id, value, label, order_index)
            VALUES ($1, $2, $3, $4)
            RETURNING {}
            "#,
            OPTION_COLUMNS
        );

        let option = sqlx::query_as::<_, CharacteristicOption>(&query)
            .bind(characteristic_id)
            .bind(&dto.value)
            .bind(Json(&dto.label))
            .bind(dto.order_index)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| match handle_db_error(e) {
                AppError::Conflict(_) => AppError::Conflict(format!(
                    "Option '{}' already exists for characteristic '{}'",
                    dto.value, characteristic.key
                )),
                other => other,
            })?;

        let response = OptionResponseDto::from(option);
        self.audit.emit(
            AuditEvent::new(actor, "characteristic_option", response.id, "create")
                .with_after(&response),
        );

        Ok(response)
    }

    /// List options for a characteristic, in display order
    pub async fn list_for_characteristic(
        &self,
        characteristic_id: Uuid,
    ) -> Result<Vec<OptionResponseDto>> {
        // Listing options of a nonexistent characteristic is a caller error,
        // not an empty result.
        self.fetch_characteristic(characteristic_id).await?;

        let query = format!(
            "SELECT {} FROM characteristic_options \
             WHERE characteristic_id = $1 ORDER BY order_index, created_at",
            OPTION_COLUMNS
        );

        let options: Vec<CharacteristicOption> = sqlx::query_as(&query)
            .bind(characteristic_id)
            .fetch_all(&self.pool)
            .await
            .map_err(AppError::Database)?;

        Ok(options.into_iter().map(Into::into).collect())
    }

    /// Update an option (PATCH semantics)
    pub async fn update(
        &self,
        actor: &str,
        characteristic_id: Uuid,
        option_id: Uuid,
        dto: UpdateOptionDto,
    ) -> Result<OptionResponseDto> {
        let query = format!(
            r#"
            UPDATE characteristic_options
            SET value = COALESCE($1, value),
                label = COALESCE($2, label),
                order_index = COALESCE($3, order_index)
            WHERE id = $4 AND characteristic_id = $5
            RETURNING {}
            "#,
            OPTION_COLUMNS
        );

        let option = sqlx::query_as::<_, CharacteristicOption>(&query)
            .bind(dto.value.as_deref())
            .bind(dto.label.as_ref().map(Json))
            .bind(dto.order_index)
            .bind(option_id)
            .bind(characteristic_id)
            .fetch_optional(&self.pool)
            .await
            .map_err(handle_db_error)?
            .ok_or_else(|| {
                AppError::NotFound(format!(
                    "Option {} not found for characteristic {}",
                    option_id, characteristic_id
                ))
            })?;

        let response = OptionResponseDto::from(option);
        self.audit.emit(
            AuditEvent::new(actor, "characteristic_option", option_id, "update")
                .with_after(&response),
        );

        Ok(response)
    }

    /// Delete an option
    pub async fn delete(&self, actor: &str, characteristic_id: Uuid, option_id: Uuid) -> Result<()> {
        let result = sqlx::query(
            "DELETE FROM characteristic_options WHERE id = $1 AND characteristic_id = $2",
        )
        .bind(option_id)
        .bind(characteristic_id)
        .execute(&self.pool)
        .await
        .map_err(AppError::Database)?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!(
                "Option {} not found for characteristic {}",
                option_id, characteristic_id
            )));
        }

        self.audit
            .emit(AuditEvent::new(actor, "characteristic_option", option_id, "delete"));

        Ok(())
    }
}
