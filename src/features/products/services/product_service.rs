use std::collections::HashMap;
use std::sync::Arc;

use sqlx::types::Json;
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use crate::core::error::{handle_db_error, AppError, Result};
use crate::features::characteristics::models::CharacteristicKind;
use crate::features::products::dtos::{CreateProductDto, ProductResponseDto, UpdateProductDto};
use crate::features::products::models::{Product, SpecDocument};
use crate::features::products::services::spec_validator::{validate_specs, SpecReport, SpecRule};
use crate::shared::audit::{AuditEvent, AuditSink};

const PRODUCT_COLUMNS: &str =
    "id, category_id, slug, name, specs, is_active, created_at, updated_at";

#[derive(Debug, FromRow)]
struct SpecRuleRow {
    characteristic_id: Uuid,
    key: String,
    kind: CharacteristicKind,
    is_required: bool,
}

/// Service for the product surface: minimal CRUD plus advisory spec
/// validation against the owning category's link set.
pub struct ProductService {
    pool: PgPool,
    audit: Arc<dyn AuditSink>,
}

impl ProductService {
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

    /// Resolve the category's link set into validation rules
    async fn fetch_rules(&self, category_id: Uuid) -> Result<Vec<SpecRule>> {
        let rows: Vec<SpecRuleRow> = sqlx::query_as(
            r#"
            SELECT cc.characteristic_id, c.key, c.kind, cc.is_required
            FROM category_characteristics cc
            JOIN characteristics c ON c.id = cc.characteristic_id
            WHERE cc.category_id = $1
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

        let mut values_by_characteristic: HashMap<Uuid, Vec<String>> = HashMap::new();
        if !option_owners.is_empty() {
            let values: Vec<(Uuid, String)> = sqlx::query_as(
                "SELECT characteristic_id, value FROM characteristic_options \
                 WHERE characteristic_id = ANY($1)",
            )
            .bind(&option_owners)
            .fetch_all(&self.pool)
            .await
            .map_err(AppError::Database)?;

            for (characteristic_id, value) in values {
                values_by_characteristic
                    .entry(characteristic_id)
                    .or_default()
                    .push(value);
            }
        }

        Ok(rows
            .into_iter()
            .map(|row| SpecRule {
                allowed_values: values_by_characteristic
                    .remove(&row.characteristic_id)
                    .unwrap_or_default(),
                key: row.key,
                kind: row.kind,
                is_required: row.is_required,
            })
            .collect())
    }

    async fn validate_against_category(
        &self,
        category_id: Uuid,
        slug: &str,
        specs: &SpecDocument,
    ) -> Result<SpecReport> {
        let rules = self.fetch_rules(category_id).await?;
        let report = validate_specs(&rules, specs);

        // Findings are advisory: the write goes through regardless.
        if !report.is_clean() {
            tracing::warn!(
                "Product '{}' spec document has issues: missing_required={:?} unknown_keys={:?} kind_mismatches={:?}",
                slug,
                report.missing_required,
                report.unknown_keys,
                report.kind_mismatches,
            );
        }

        Ok(report)
    }

    /// Create a product, reporting (not enforcing) spec validation findings
    pub async fn create(&self, actor: &str, dto: CreateProductDto) -> Result<ProductResponseDto> {
        self.ensure_category_exists(dto.category_id).await?;

        let report = self
            .validate_against_category(dto.category_id, &dto.slug, &dto.specs)
            .await?;

        let query = format!(
            r#"
            INSERT INTO products (category_id, slug, name, specs)
            VALUES ($1, $2, $3, $4)
            RETURNING {}
            "#,
            PRODUCT_COLUMNS
        );

        let product = sqlx::query_as::<_, Product>(&query)
            .bind(dto.category_id)
            .bind(&dto.slug)
            .bind(Json(&dto.name))
            .bind(Json(&dto.specs))
            .fetch_one(&self.pool)
            .await
            .map_err(|e| match handle_db_error(e) {
                AppError::Conflict(_) => {
                    AppError::Conflict(format!("Product with slug '{}' already exists", dto.slug))
                }
                other => other,
            })?;

        let response = ProductResponseDto::from_product(product, Some(report));
        self.audit
            .emit(AuditEvent::new(actor, "product", response.id, "create").with_after(&response));

        Ok(response)
    }

    /// Get a product by ID
    pub async fn get_by_id(&self, id: Uuid) -> Result<ProductResponseDto> {
        let query = format!("SELECT {} FROM products WHERE id = $1", PRODUCT_COLUMNS);

        let product = sqlx::query_as::<_, Product>(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(AppError::Database)?
            .ok_or_else(|| AppError::NotFound(format!("Product {} not found", id)))?;

        Ok(ProductResponseDto::from_product(product, None))
    }

    /// Update a product (PATCH semantics; a supplied spec document replaces
    /// the stored one wholesale and is re-validated)
    pub async fn update(
        &self,
        actor: &str,
        id: Uuid,
        dto: UpdateProductDto,
    ) -> Result<ProductResponseDto> {
        let existing_query = format!("SELECT {} FROM products WHERE id = $1", PRODUCT_COLUMNS);
        let existing = sqlx::query_as::<_, Product>(&existing_query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(AppError::Database)?
            .ok_or_else(|| AppError::NotFound(format!("Product {} not found", id)))?;

        let specs_to_validate = dto.specs.as_ref().unwrap_or(&existing.specs.0);
        let slug = dto.slug.as_deref().unwrap_or(&existing.slug);
        let report = self
            .validate_against_category(existing.category_id, slug, specs_to_validate)
            .await?;

        let query = format!(
            r#"
            UPDATE products
            SET slug = COALESCE($1, slug),
                name = COALESCE($2, name),
                specs = COALESCE($3, specs),
                is_active = COALESCE($4, is_active),
                updated_at = NOW()
            WHERE id = $5
            RETURNING {}
            "#,
            PRODUCT_COLUMNS
        );

        let product = sqlx::query_as::<_, Product>(&query)
            .bind(dto.slug.as_deref())
            .bind(dto.name.as_ref().map(Json))
            .bind(dto.specs.as_ref().map(Json))
            .bind(dto.is_active)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(handle_db_error)?
            .ok_or_else(|| AppError::NotFound(format!("Product {} not found", id)))?;

        let response = ProductResponseDto::from_product(product, Some(report));
        self.audit
            .emit(AuditEvent::new(actor, "product", id, "update").with_after(&response));

        Ok(response)
    }
}
