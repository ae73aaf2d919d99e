use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use sqlx::PgPool;
use uuid::Uuid;

use crate::core::error::{handle_db_error, AppError, Result};
use crate::features::assignments::dtos::{
    AssignCharacteristicDto, CopyResultDto, LinkResponseDto, LinkedCharacteristicDto,
    LinkedOptionDto, UpdateLinkDto,
};
use crate::features::assignments::models::{CategoryCharacteristic, LinkedCharacteristicRow};
use crate::features::characteristics::models::CharacteristicOption;
use crate::shared::audit::{AuditEvent, AuditSink};
use crate::shared::localization::Lang;

const LINK_COLUMNS: &str =
    "category_id, characteristic_id, is_required, show_in_key_specs, order_index, created_at";

/// Split a source category's links into those that can be copied onto the
/// target and the count of collisions. Existing target links are never
/// overwritten, which is what makes propagation idempotent.
pub(crate) fn partition_copyable<'a>(
    source: &'a [CategoryCharacteristic],
    existing_target: &HashSet<Uuid>,
) -> (Vec<&'a CategoryCharacteristic>, usize) {
    let (copyable, colliding): (Vec<&CategoryCharacteristic>, Vec<&CategoryCharacteristic>) =
        source
            .iter()
            .partition(|link| !existing_target.contains(&link.characteristic_id));

    (copyable, colliding.len())
}

/// Service for category-characteristic links and their propagation
pub struct AssignmentService {
    pool: PgPool,
    audit: Arc<dyn AuditSink>,
}

impl AssignmentService {
    pub fn new(pool: PgPool, audit: Arc<dyn AuditSink>) -> Self {
        Self { pool, audit }
    }

    async fn ensure_category_exists(&self, id: Uuid) -> Result<()> {
        let exists: bool =
            sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM categories WHERE id = $1)")
                .bind(id)
                .fetch_one(&self.pool)
                .await
                .map_err(AppError::Database)?;

        if !exists {
            return Err(AppError::NotFound(format!("Category {} not found", id)));
        }
        Ok(())
    }

    async fn ensure_characteristic_exists(&self, id: Uuid) -> Result<()> {
        let exists: bool =
            sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM characteristics WHERE id = $1)")
                .bind(id)
                .fetch_one(&self.pool)
                .await
                .map_err(AppError::Database)?;

        if !exists {
            return Err(AppError::NotFound(format!(
                "Characteristic {} not found",
                id
            )));
        }
        Ok(())
    }

    /// Assign a characteristic to a category (upsert).
    ///
    /// A single atomic statement: inserts the link or overwrites its
    /// metadata when the pair already exists, so re-assignment is
    /// race-safe and idempotent.
    pub async fn assign(
        &self,
        actor: &str,
        category_id: Uuid,
        dto: AssignCharacteristicDto,
    ) -> Result<LinkResponseDto> {
        self.ensure_category_exists(category_id).await?;
        self.ensure_characteristic_exists(dto.characteristic_id)
            .await?;

        let query = format!(
            r#"
            INSERT INTO category_characteristics
                (category_id, characteristic_id, is_required, show_in_key_specs, order_index)
            VALUES ($1, $2, $3, $4, $5)
            ON CONFLICT (category_id, characteristic_id) DO UPDATE
            SET is_required = EXCLUDED.is_required,
                show_in_key_specs = EXCLUDED.show_in_key_specs,
                order_index = EXCLUDED.order_index
            RETURNING {}
            "#,
            LINK_COLUMNS
        );

        let link = sqlx::query_as::<_, CategoryCharacteristic>(&query)
            .bind(category_id)
            .bind(dto.characteristic_id)
            .bind(dto.is_required)
            .bind(dto.show_in_key_specs)
            .bind(dto.order_index)
            .fetch_one(&self.pool)
            .await
            .map_err(handle_db_error)?;

        let response = LinkResponseDto::from(link);
        self.audit.emit(
            AuditEvent::new(actor, "category_characteristic", category_id, "assign")
                .with_after(&response),
        );

        Ok(response)
    }

    /// Update link metadata (PATCH semantics)
    pub async fn update_link(
        &self,
        actor: &str,
        category_id: Uuid,
        characteristic_id: Uuid,
        dto: UpdateLinkDto,
    ) -> Result<LinkResponseDto> {
        let query = format!(
            r#"
            UPDATE category_characteristics
            SET is_required = COALESCE($1, is_required),
                show_in_key_specs = COALESCE($2, show_in_key_specs),
                order_index = COALESCE($3, order_index)
            WHERE category_id = $4 AND characteristic_id = $5
            RETURNING {}
            "#,
            LINK_COLUMNS
        );

        let link = sqlx::query_as::<_, CategoryCharacteristic>(&query)
            .bind(dto.is_required)
            .bind(dto.show_in_key_specs)
            .bind(dto.order_index)
            .bind(category_id)
            .bind(characteristic_id)
            .fetch_optional(&self.pool)
            .await
            .map_err(AppError::Database)?
            .ok_or_else(|| {
                AppError::NotFound(format!(
                    "Characteristic {} is not assigned to category {}",
                    characteristic_id, category_id
                ))
            })?;

        let response = LinkResponseDto::from(link);
        self.audit.emit(
            AuditEvent::new(actor, "category_characteristic", category_id, "update_link")
                .with_after(&response),
        );

        Ok(response)
    }

    /// Remove a characteristic from a category.
    ///
    /// Absence is success: unassigning a pair that was never linked (or was
    /// already removed) leaves state unchanged and does not error.
    pub async fn unassign(
        &self,
        actor: &str,
        category_id: Uuid,
        characteristic_id: Uuid,
    ) -> Result<()> {
        let result = sqlx::query(
            "DELETE FROM category_characteristics \
             WHERE category_id = $1 AND characteristic_id = $2",
        )
        .bind(category_id)
        .bind(characteristic_id)
        .execute(&self.pool)
        .await
        .map_err(AppError::Database)?;

        if result.rows_affected() > 0 {
            self.audit.emit(AuditEvent::new(
                actor,
                "category_characteristic",
                category_id,
                "unassign",
            ));
        }

        Ok(())
    }

    /// List a category's characteristics with link metadata.
    ///
    /// Ordered ascending by order_index with insertion order as the
    /// tie-break; select/multiselect entries carry their ordered options.
    pub async fn list_for_category(
        &self,
        category_id: Uuid,
        lang: Lang,
    ) -> Result<Vec<LinkedCharacteristicDto>> {
        self.ensure_category_exists(category_id).await?;

        let rows: Vec<LinkedCharacteristicRow> = sqlx::query_as(
            r#"
            SELECT cc.characteristic_id, c.key, c.name, c.kind, c.is_filterable,
                   cc.is_required, cc.show_in_key_specs, cc.order_index
            FROM category_characteristics cc
            JOIN characteristics c ON c.id = cc.characteristic_id
            WHERE cc.category_id = $1
            ORDER BY cc.order_index ASC, cc.created_at ASC
            "#,
        )
        .bind(category_id)
        .fetch_all(&self.pool)
        .await
        .map_err(AppError::Database)?;

        let option_owners: Vec<Uuid> = rows
            .iter()
            .filter(|row| row.kind.has_options())
            .map(|row| row.characteristic_id)
            .collect();

        let mut options_by_characteristic: HashMap<Uuid, Vec<CharacteristicOption>> =
            HashMap::new();
        if !option_owners.is_empty() {
            let options: Vec<CharacteristicOption> = sqlx::query_as(
                "SELECT id, characteristic_id, value, label, order_index, created_at \
                 FROM characteristic_options \
                 WHERE characteristic_id = ANY($1) \
                 ORDER BY order_index, created_at",
            )
            .bind(&option_owners)
            .fetch_all(&self.pool)
            .await
            .map_err(AppError::Database)?;

            for option in options {
                options_by_characteristic
                    .entry(option.characteristic_id)
                    .or_default()
                    .push(option);
            }
        }

        Ok(rows
            .into_iter()
            .map(|row| {
                let options = options_by_characteristic
                    .remove(&row.characteristic_id)
                    .unwrap_or_default()
                    .into_iter()
                    .map(|o| LinkedOptionDto {
                        value: o.value,
                        label: o.label.0.resolve(lang).to_string(),
                        order_index: o.order_index,
                    })
                    .collect();

                LinkedCharacteristicDto {
                    characteristic_id: row.characteristic_id,
                    key: row.key,
                    label: row.name.0.resolve(lang).to_string(),
                    name: row.name.0,
                    kind: row.kind,
                    is_filterable: row.is_filterable,
                    is_required: row.is_required,
                    show_in_key_specs: row.show_in_key_specs,
                    order_index: row.order_index,
                    options,
                }
            })
            .collect())
    }

    /// Copy every link of the source category onto the target category.
    ///
    /// Link metadata is preserved verbatim; pairs the target already has
    /// are skipped, never overwritten, so re-running the copy is a no-op.
    /// The whole operation runs in one transaction: all eligible rows are
    /// inserted or none are.
    pub async fn copy(
        &self,
        actor: &str,
        source_category_id: Uuid,
        target_category_id: Uuid,
    ) -> Result<CopyResultDto> {
        self.ensure_category_exists(source_category_id).await?;

        // Self-copy is a no-op by construction.
        if source_category_id == target_category_id {
            return Ok(CopyResultDto {
                copied: 0,
                skipped: 0,
            });
        }

        self.ensure_category_exists(target_category_id).await?;

        let mut tx = self.pool.begin().await.map_err(AppError::Database)?;

        let source_query = format!(
            "SELECT {} FROM category_characteristics WHERE category_id = $1",
            LINK_COLUMNS
        );
        let source_links: Vec<CategoryCharacteristic> = sqlx::query_as(&source_query)
            .bind(source_category_id)
            .fetch_all(&mut *tx)
            .await
            .map_err(AppError::Database)?;

        let existing_target: HashSet<Uuid> = sqlx::query_scalar(
            "SELECT characteristic_id FROM category_characteristics WHERE category_id = $1",
        )
        .bind(target_category_id)
        .fetch_all(&mut *tx)
        .await
        .map_err(AppError::Database)?
        .into_iter()
        .collect();

        let (copyable, skipped) = partition_copyable(&source_links, &existing_target);

        let mut copied = 0usize;
        for link in copyable {
            // ON CONFLICT DO NOTHING backstops a concurrent assign between
            // the read above and this insert.
            let result = sqlx::query(
                r#"
                INSERT INTO category_characteristics
                    (category_id, characteristic_id, is_required, show_in_key_specs, order_index)
                VALUES ($1, $2, $3, $4, $5)
                ON CONFLICT (category_id, characteristic_id) DO NOTHING
                "#,
            )
            .bind(target_category_id)
            .bind(link.characteristic_id)
            .bind(link.is_required)
            .bind(link.show_in_key_specs)
            .bind(link.order_index)
            .execute(&mut *tx)
            .await
            .map_err(AppError::Database)?;

            copied += result.rows_affected() as usize;
        }

        tx.commit().await.map_err(AppError::Database)?;

        let result = CopyResultDto { copied, skipped };
        self.audit.emit(
            AuditEvent::new(actor, "category_characteristic", target_category_id, "copy")
                .with_after(&serde_json::json!({
                    "source_category_id": source_category_id,
                    "copied": result.copied,
                    "skipped": result.skipped,
                })),
        );

        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn link(characteristic_id: Uuid, is_required: bool, order_index: i32) -> CategoryCharacteristic {
        CategoryCharacteristic {
            category_id: Uuid::new_v4(),
            characteristic_id,
            is_required,
            show_in_key_specs: false,
            order_index,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_partition_copies_everything_into_empty_target() {
        let cpu = Uuid::new_v4();
        let ram = Uuid::new_v4();
        let source = vec![link(cpu, true, 0), link(ram, false, 3)];

        let (copyable, skipped) = partition_copyable(&source, &HashSet::new());

        assert_eq!(copyable.len(), 2);
        assert_eq!(skipped, 0);
        // Metadata travels verbatim
        assert!(copyable[0].is_required);
        assert_eq!(copyable[1].order_index, 3);
    }

    #[test]
    fn test_partition_skips_existing_pairs() {
        let cpu = Uuid::new_v4();
        let ram = Uuid::new_v4();
        let source = vec![link(cpu, true, 0), link(ram, false, 1)];
        let existing: HashSet<Uuid> = [cpu].into_iter().collect();

        let (copyable, skipped) = partition_copyable(&source, &existing);

        assert_eq!(copyable.len(), 1);
        assert_eq!(copyable[0].characteristic_id, ram);
        assert_eq!(skipped, 1);
    }

    #[test]
    fn test_partition_second_run_copies_nothing() {
        let cpu = Uuid::new_v4();
        let ram = Uuid::new_v4();
        let source = vec![link(cpu, true, 0), link(ram, false, 1)];

        // After a first run the target holds every source pair.
        let after_first_run: HashSet<Uuid> =
            source.iter().map(|l| l.characteristic_id).collect();
        let (copyable, skipped) = partition_copyable(&source, &after_first_run);

        assert!(copyable.is_empty());
        assert_eq!(skipped, 2);
    }

    #[test]
    fn test_partition_of_empty_source_is_empty() {
        let existing: HashSet<Uuid> = [Uuid::new_v4()].into_iter().collect();

        let (copyable, skipped) = partition_copyable(&[], &existing);

        assert!(copyable.is_empty());
        assert_eq!(skipped, 0);
    }
}
