use std::sync::Arc;

use sqlx::types::Json;
use sqlx::PgPool;
use uuid::Uuid;

use crate::core::error::{handle_db_error, AppError, Result};
use crate::features::characteristics::models::Characteristic;
use crate::features::filters::dtos::{CreateFilterDto, FilterResponseDto, UpdateFilterDto};
use crate::features::filters::models::{
    CategoryFilter, FilterSource, FilterWithCharacteristicRow,
};
use crate::shared::audit::{AuditEvent, AuditSink};
use crate::shared::localization::Lang;

const FILTER_COLUMNS: &str = "id, subcategory_id, characteristic_id, source, kind, label, \
     is_enabled, order_index, min_value, max_value, is_multiselect, created_at, updated_at";

/// Next display position for a subcategory's filter list: one past the
/// current maximum. Deleted positions are never reused.
pub(crate) fn next_order_index(current_max: Option<i32>) -> i32 {
    current_max.unwrap_or(0) + 1
}

/// Service for storefront filter definitions
pub struct FilterService {
    pool: PgPool,
    audit: Arc<dyn AuditSink>,
}

impl FilterService {
    pub fn new(pool: PgPool, audit: Arc<dyn AuditSink>) -> Self {
        Self { pool, audit }
    }

    async fn ensure_subcategory_exists(&self, id: Uuid) -> Result<()> {
        let exists: bool =
            sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM categories WHERE id = $1)")
                .bind(id)
                .fetch_one(&self.pool)
                .await
                .map_err(AppError::Database)?;

        if !exists {
            return Err(AppError::NotFound(format!("Subcategory {} not found", id)));
        }
        Ok(())
    }

    /// Create a filter definition for a subcategory.
    ///
    /// The display position is assigned inside the transaction as one past
    /// the subcategory's current maximum (1 for the first filter).
    pub async fn create(
        &self,
        actor: &str,
        subcategory_id: Uuid,
        dto: CreateFilterDto,
        lang: Lang,
    ) -> Result<FilterResponseDto> {
        self.ensure_subcategory_exists(subcategory_id).await?;

        let label = match dto.source {
            FilterSource::Characteristic => {
                let characteristic_id = dto.characteristic_id.ok_or_else(|| {
                    AppError::Validation(
                        "characteristic_id is required for characteristic-sourced filters"
                            .to_string(),
                    )
                })?;

                let characteristic = sqlx::query_as::<_, Characteristic>(
                    "SELECT id, key, name, kind, is_filterable, is_active, created_at, updated_at \
                     FROM characteristics WHERE id = $1",
                )
                .bind(characteristic_id)
                .fetch_optional(&self.pool)
                .await
                .map_err(AppError::Database)?
                .ok_or_else(|| {
                    AppError::NotFound(format!("Characteristic {} not found", characteristic_id))
                })?;

                // Label defaults to the characteristic's name; it may drift
                // afterwards, no sync is enforced.
                dto.label.clone().unwrap_or(characteristic.name.0)
            }
            FilterSource::Custom => {
                if dto.characteristic_id.is_some() {
                    return Err(AppError::Validation(
                        "characteristic_id must be absent for custom filters".to_string(),
                    ));
                }
                match dto.label.clone() {
                    Some(label) if !label.is_empty() => label,
                    _ => {
                        return Err(AppError::Validation(
                            "label is required for custom filters".to_string(),
                        ))
                    }
                }
            }
        };

        if let (Some(min), Some(max)) = (dto.min_value, dto.max_value) {
            if min > max {
                return Err(AppError::Validation(format!(
                    "min_value {} must not exceed max_value {}",
                    min, max
                )));
            }
        }

        let mut tx = self.pool.begin().await.map_err(AppError::Database)?;

        let current_max: Option<i32> = sqlx::query_scalar(
            "SELECT MAX(order_index) FROM category_filters WHERE subcategory_id = $1",
        )
        .bind(subcategory_id)
        .fetch_one(&mut *tx)
        .await
        .map_err(AppError::Database)?;

        let insert_query = format!(
            r#"
            INSERT INTO category_filters
                (subcategory_id, characteristic_id, source, kind, label,
                 is_enabled, order_index, min_value, max_value, is_multiselect)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            RETURNING {}
            "#,
            FILTER_COLUMNS
        );

        let filter = sqlx::query_as::<_, CategoryFilter>(&insert_query)
            .bind(subcategory_id)
            .bind(dto.characteristic_id)
            .bind(dto.source)
            .bind(dto.kind)
            .bind(Json(&label))
            .bind(dto.is_enabled)
            .bind(next_order_index(current_max))
            .bind(dto.min_value)
            .bind(dto.max_value)
            .bind(dto.is_multiselect)
            .fetch_one(&mut *tx)
            .await
            .map_err(handle_db_error)?;

        tx.commit().await.map_err(AppError::Database)?;

        let response = FilterResponseDto::from_filter(filter, lang);
        self.audit.emit(
            AuditEvent::new(actor, "category_filter", response.id, "create").with_after(&response),
        );

        Ok(response)
    }

    /// List a subcategory's filters ascending by display position.
    ///
    /// The storefront listing excludes disabled filters; the admin view
    /// passes `include_disabled` to see everything.
    pub async fn list_for_subcategory(
        &self,
        subcategory_id: Uuid,
        include_disabled: bool,
        lang: Lang,
    ) -> Result<Vec<FilterResponseDto>> {
        self.ensure_subcategory_exists(subcategory_id).await?;

        let enabled_clause = if include_disabled {
            ""
        } else {
            "AND f.is_enabled = TRUE"
        };

        let query = format!(
            r#"
            SELECT f.id, f.subcategory_id, f.characteristic_id, f.source, f.kind, f.label,
                   f.is_enabled, f.order_index, f.min_value, f.max_value, f.is_multiselect,
                   c.key AS characteristic_key, c.name AS characteristic_name
            FROM category_filters f
            LEFT JOIN characteristics c ON c.id = f.characteristic_id
            WHERE f.subcategory_id = $1 {}
            ORDER BY f.order_index ASC, f.created_at ASC
            "#,
            enabled_clause
        );

        let rows: Vec<FilterWithCharacteristicRow> = sqlx::query_as(&query)
            .bind(subcategory_id)
            .fetch_all(&self.pool)
            .await
            .map_err(AppError::Database)?;

        Ok(rows
            .into_iter()
            .map(|row| {
                let label = row.label.0.resolve(lang).to_string();
                let characteristic_label = row
                    .characteristic_name
                    .as_ref()
                    .map(|name| name.0.resolve(lang).to_string());
                FilterResponseDto {
                    id: row.id,
                    subcategory_id: row.subcategory_id,
                    source: row.source,
                    characteristic_id: row.characteristic_id,
                    characteristic_key: row.characteristic_key,
                    characteristic_label,
                    kind: row.kind,
                    name: row.label.0,
                    label,
                    is_enabled: row.is_enabled,
                    order_index: row.order_index,
                    min_value: row.min_value,
                    max_value: row.max_value,
                    is_multiselect: row.is_multiselect,
                }
            })
            .collect())
    }

    /// Update a filter definition (PATCH semantics)
    pub async fn update(
        &self,
        actor: &str,
        id: Uuid,
        dto: UpdateFilterDto,
        lang: Lang,
    ) -> Result<FilterResponseDto> {
        if let (Some(min), Some(max)) = (dto.min_value, dto.max_value) {
            if min > max {
                return Err(AppError::Validation(format!(
                    "min_value {} must not exceed max_value {}",
                    min, max
                )));
            }
        }

        let query = format!(
            r#"
            UPDATE category_filters
            SET kind = COALESCE($1, kind),
                label = COALESCE($2, label),
                is_enabled = COALESCE($3, is_enabled),
                min_value = COALESCE($4, min_value),
                max_value = COALESCE($5, max_value),
                is_multiselect = COALESCE($6, is_multiselect),
                updated_at = NOW()
            WHERE id = $7
            RETURNING {}
            "#,
            FILTER_COLUMNS
        );

        let filter = sqlx::query_as::<_, CategoryFilter>(&query)
            .bind(dto.kind)
            .bind(dto.label.as_ref().map(Json))
            .bind(dto.is_enabled)
            .bind(dto.min_value)
            .bind(dto.max_value)
            .bind(dto.is_multiselect)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(handle_db_error)?
            .ok_or_else(|| AppError::NotFound(format!("Filter {} not found", id)))?;

        let response = FilterResponseDto::from_filter(filter, lang);
        self.audit.emit(
            AuditEvent::new(actor, "category_filter", id, "update").with_after(&response),
        );

        Ok(response)
    }

    /// Flip a filter's enabled flag without deleting the row
    pub async fn toggle_enabled(&self, actor: &str, id: Uuid, lang: Lang) -> Result<FilterResponseDto> {
        let query = format!(
            r#"
            UPDATE category_filters
            SET is_enabled = NOT is_enabled, updated_at = NOW()
            WHERE id = $1
            RETURNING {}
            "#,
            FILTER_COLUMNS
        );

        let filter = sqlx::query_as::<_, CategoryFilter>(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(AppError::Database)?
            .ok_or_else(|| AppError::NotFound(format!("Filter {} not found", id)))?;

        let response = FilterResponseDto::from_filter(filter, lang);
        self.audit.emit(
            AuditEvent::new(actor, "category_filter", id, "toggle_enabled").with_after(&response),
        );

        Ok(response)
    }

    /// Hard-delete a filter definition. Its display position is never
    /// handed out again.
    pub async fn delete(&self, actor: &str, id: Uuid) -> Result<()> {
        let result = sqlx::query("DELETE FROM category_filters WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(AppError::Database)?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Filter {} not found", id)));
        }

        self.audit
            .emit(AuditEvent::new(actor, "category_filter", id, "delete"));

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_filter_gets_position_one() {
        assert_eq!(next_order_index(None), 1);
    }

    #[test]
    fn test_position_is_one_past_current_max() {
        assert_eq!(next_order_index(Some(1)), 2);
        assert_eq!(next_order_index(Some(7)), 8);
    }

    #[test]
    fn test_positions_are_monotonic_and_never_reused() {
        // Simulate create, create, delete-first, create: the third filter
        // must get 3, not the freed 1.
        let mut max = None;
        let first = next_order_index(max);
        max = Some(first);
        let second = next_order_index(max);
        max = Some(second); // deleting `first` does not lower the max
        let third = next_order_index(max);

        assert_eq!((first, second, third), (1, 2, 3));
    }
}
