use std::collections::HashMap;
use std::sync::Arc;

use sqlx::types::Json;
use sqlx::PgPool;
use uuid::Uuid;

use crate::core::error::{handle_db_error, AppError, Result};
use crate::features::categories::dtos::{
    CategoryResponseDto, CategoryTreeDto, CreateCategoryDto, UpdateCategoryDto,
};
use crate::features::categories::models::Category;
use crate::shared::audit::{AuditEvent, AuditSink};

const CATEGORY_COLUMNS: &str =
    "id, parent_id, slug, name, icon, order_index, is_active, created_at, updated_at";

/// Walk the ancestor chain of `new_parent_id` and report whether attaching
/// `category_id` under it would close a loop. Self-parenting counts as a
/// cycle. The arena maps category id to parent id.
pub(crate) fn would_create_cycle(
    arena: &HashMap<Uuid, Option<Uuid>>,
    category_id: Uuid,
    new_parent_id: Uuid,
) -> bool {
    if category_id == new_parent_id {
        return true;
    }

    let mut current = Some(new_parent_id);
    let mut hops = 0;
    while let Some(id) = current {
        if id == category_id {
            return true;
        }
        // Guard against a corrupt chain longer than the arena itself.
        hops += 1;
        if hops > arena.len() {
            return true;
        }
        current = arena.get(&id).copied().flatten();
    }

    false
}

/// Service for category tree operations
pub struct CategoryService {
    pool: PgPool,
    audit: Arc<dyn AuditSink>,
}

impl CategoryService {
    pub fn new(pool: PgPool, audit: Arc<dyn AuditSink>) -> Self {
        Self { pool, audit }
    }

    /// List all active categories (flat list)
    pub async fn list(&self) -> Result<Vec<CategoryResponseDto>> {
        let categories = self.fetch_active().await?;

        Ok(categories.into_iter().map(|c| c.into()).collect())
    }

    /// List all active categories as tree structure
    pub async fn list_tree(&self) -> Result<Vec<CategoryTreeDto>> {
        let categories = self.fetch_active().await?;

        Ok(CategoryTreeDto::build_tree(categories))
    }

    async fn fetch_active(&self) -> Result<Vec<Category>> {
        let query = format!(
            "SELECT {} FROM categories WHERE is_active = TRUE ORDER BY order_index, slug",
            CATEGORY_COLUMNS
        );

        sqlx::query_as::<_, Category>(&query)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to list categories: {:?}", e);
                AppError::Database(e)
            })
    }

    /// Get category by slug
    pub async fn get_by_slug(&self, slug: &str) -> Result<CategoryResponseDto> {
        let query = format!("SELECT {} FROM categories WHERE slug = $1", CATEGORY_COLUMNS);

        let category = sqlx::query_as::<_, Category>(&query)
            .bind(slug)
            .fetch_optional(&self.pool)
            .await
            .map_err(AppError::Database)?;

        category
            .map(|c| c.into())
            .ok_or_else(|| AppError::NotFound(format!("Category '{}' not found", slug)))
    }

    pub async fn get_by_id(&self, id: Uuid) -> Result<CategoryResponseDto> {
        let query = format!("SELECT {} FROM categories WHERE id = $1", CATEGORY_COLUMNS);

        let category = sqlx::query_as::<_, Category>(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(AppError::Database)?;

        category
            .map(|c| c.into())
            .ok_or_else(|| AppError::NotFound(format!("Category {} not found", id)))
    }

    /// Create a category
    pub async fn create(&self, actor: &str, dto: CreateCategoryDto) -> Result<CategoryResponseDto> {
        if let Some(parent_id) = dto.parent_id {
            // Surface a NotFound for a missing parent instead of an FK error
            self.get_by_id(parent_id).await?;
        }

        let query = format!(
            r#"
            INSERT INTO categories (parent_id, slug, name, icon, order_index)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING {}
            "#,
            CATEGORY_COLUMNS
        );

        let category = sqlx::query_as::<_, Category>(&query)
            .bind(dto.parent_id)
            .bind(&dto.slug)
            .bind(Json(&dto.name))
            .bind(dto.icon.as_deref())
            .bind(dto.order_index)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| match handle_db_error(e) {
                AppError::Conflict(_) => {
                    AppError::Conflict(format!("Category with slug '{}' already exists", dto.slug))
                }
                other => other,
            })?;

        let response = CategoryResponseDto::from(category);
        self.audit
            .emit(AuditEvent::new(actor, "category", response.id, "create").with_after(&response));

        Ok(response)
    }

    /// Update a category (PATCH semantics). Reparenting walks the proposed
    /// parent's ancestors and rejects the update when it would close a loop.
    pub async fn update(
        &self,
        actor: &str,
        id: Uuid,
        dto: UpdateCategoryDto,
    ) -> Result<CategoryResponseDto> {
        let before = self.get_by_id(id).await?;

        if let Some(new_parent_id) = dto.parent_id {
            let arena: HashMap<Uuid, Option<Uuid>> =
                sqlx::query_as::<_, (Uuid, Option<Uuid>)>("SELECT id, parent_id FROM categories")
                    .fetch_all(&self.pool)
                    .await
                    .map_err(AppError::Database)?
                    .into_iter()
                    .collect();

            if !arena.contains_key(&new_parent_id) {
                return Err(AppError::NotFound(format!(
                    "Parent category {} not found",
                    new_parent_id
                )));
            }

            if would_create_cycle(&arena, id, new_parent_id) {
                return Err(AppError::Validation(format!(
                    "Reparenting category {} under {} would create a cycle",
                    id, new_parent_id
                )));
            }
        }

        let query = format!(
            r#"
            UPDATE categories
            SET parent_id = COALESCE($1, parent_id),
                slug = COALESCE($2, slug),
                name = COALESCE($3, name),
                icon = COALESCE($4, icon),
                order_index = COALESCE($5, order_index),
                is_active = COALESCE($6, is_active),
                updated_at = NOW()
            WHERE id = $7
            RETURNING {}
            "#,
            CATEGORY_COLUMNS
        );

        let category = sqlx::query_as::<_, Category>(&query)
            .bind(dto.parent_id)
            .bind(dto.slug.as_deref())
            .bind(dto.name.as_ref().map(Json))
            .bind(dto.icon.as_deref())
            .bind(dto.order_index)
            .bind(dto.is_active)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(handle_db_error)?
            .ok_or_else(|| AppError::NotFound(format!("Category {} not found", id)))?;

        let response = CategoryResponseDto::from(category);
        self.audit.emit(
            AuditEvent::new(actor, "category", id, "update")
                .with_before(&before)
                .with_after(&response),
        );

        Ok(response)
    }

    /// Delete a category. Its links and filters cascade away; the delete is
    /// rejected while products still reference the category.
    pub async fn delete(&self, actor: &str, id: Uuid) -> Result<()> {
        let before = self.get_by_id(id).await?;

        let product_count: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM products WHERE category_id = $1")
                .bind(id)
                .fetch_one(&self.pool)
                .await
                .map_err(AppError::Database)?;

        if product_count > 0 {
            return Err(AppError::Referential(format!(
                "Category '{}' still has {} product(s) and cannot be deleted",
                before.slug, product_count
            )));
        }

        let result = sqlx::query("DELETE FROM categories WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(handle_db_error)?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Category {} not found", id)));
        }

        self.audit
            .emit(AuditEvent::new(actor, "category", id, "delete").with_before(&before));

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn arena(edges: &[(Uuid, Option<Uuid>)]) -> HashMap<Uuid, Option<Uuid>> {
        edges.iter().copied().collect()
    }

    #[test]
    fn test_self_parent_is_a_cycle() {
        let a = Uuid::new_v4();
        let arena = arena(&[(a, None)]);

        assert!(would_create_cycle(&arena, a, a));
    }

    #[test]
    fn test_reparenting_under_own_descendant_is_a_cycle() {
        let root = Uuid::new_v4();
        let child = Uuid::new_v4();
        let grandchild = Uuid::new_v4();
        let arena = arena(&[(root, None), (child, Some(root)), (grandchild, Some(child))]);

        assert!(would_create_cycle(&arena, root, grandchild));
        assert!(would_create_cycle(&arena, root, child));
    }

    #[test]
    fn test_reparenting_to_sibling_is_allowed() {
        let root = Uuid::new_v4();
        let left = Uuid::new_v4();
        let right = Uuid::new_v4();
        let arena = arena(&[(root, None), (left, Some(root)), (right, Some(root))]);

        assert!(!would_create_cycle(&arena, left, right));
        assert!(!would_create_cycle(&arena, left, root));
    }
}
