use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::features::categories::models::Category;
use crate::shared::localization::LocalizedText;

/// Request DTO for creating a category
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateCategoryDto {
    pub parent_id: Option<Uuid>,

    #[validate(
        length(min = 1, max = 128, message = "Slug must be 1-128 characters"),
        regex(
            path = "*crate::shared::validation::SLUG_REGEX",
            message = "Slug must be lowercase alphanumeric with single hyphens"
        )
    )]
    pub slug: String,

    pub name: LocalizedText,

    pub icon: Option<String>,

    #[serde(default)]
    pub order_index: i32,
}

/// Request DTO for updating a category (PATCH semantics)
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct UpdateCategoryDto {
    /// New parent. Reparenting is rejected when it would create a cycle.
    pub parent_id: Option<Uuid>,

    #[validate(
        length(min = 1, max = 128, message = "Slug must be 1-128 characters"),
        regex(
            path = "*crate::shared::validation::SLUG_REGEX",
            message = "Slug must be lowercase alphanumeric with single hyphens"
        )
    )]
    pub slug: Option<String>,

    pub name: Option<LocalizedText>,

    pub icon: Option<String>,

    pub order_index: Option<i32>,

    pub is_active: Option<bool>,
}

/// Response DTO for a category
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CategoryResponseDto {
    pub id: Uuid,
    pub parent_id: Option<Uuid>,
    pub slug: String,
    pub name: LocalizedText,
    pub icon: Option<String>,
    pub order_index: i32,
    pub is_active: bool,
}

impl From<Category> for CategoryResponseDto {
    fn from(c: Category) -> Self {
        Self {
            id: c.id,
            parent_id: c.parent_id,
            slug: c.slug,
            name: c.name.0,
            icon: c.icon,
            order_index: c.order_index,
            is_active: c.is_active,
        }
    }
}

/// Response DTO for category tree (hierarchical structure)
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[schema(no_recursion)]
pub struct CategoryTreeDto {
    pub id: Uuid,
    pub slug: String,
    pub name: LocalizedText,
    pub icon: Option<String>,
    pub order_index: i32,
    pub children: Vec<CategoryTreeDto>,
}

impl CategoryTreeDto {
    /// Build tree from flat list of categories
    pub fn build_tree(categories: Vec<Category>) -> Vec<CategoryTreeDto> {
        // Get root categories (parent_id is None)
        let roots: Vec<&Category> = categories
            .iter()
            .filter(|c| c.parent_id.is_none())
            .collect();

        // Build tree recursively
        roots
            .into_iter()
            .map(|root| Self::build_node(root, &categories))
            .collect()
    }

    fn build_node(category: &Category, all_categories: &[Category]) -> CategoryTreeDto {
        let children: Vec<CategoryTreeDto> = all_categories
            .iter()
            .filter(|c| c.parent_id == Some(category.id))
            .map(|child| Self::build_node(child, all_categories))
            .collect();

        CategoryTreeDto {
            id: category.id,
            slug: category.slug.clone(),
            name: category.name.0.clone(),
            icon: category.icon.clone(),
            order_index: category.order_index,
            children,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use sqlx::types::Json;

    fn category(id: Uuid, parent_id: Option<Uuid>, slug: &str) -> Category {
        Category {
            id,
            parent_id,
            slug: slug.to_string(),
            name: Json(LocalizedText::default()),
            icon: None,
            order_index: 0,
            is_active: true,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_build_tree_nests_children_under_roots() {
        let root = Uuid::new_v4();
        let child = Uuid::new_v4();
        let grandchild = Uuid::new_v4();

        let tree = CategoryTreeDto::build_tree(vec![
            category(root, None, "office"),
            category(child, Some(root), "printers"),
            category(grandchild, Some(child), "laser-printers"),
        ]);

        assert_eq!(tree.len(), 1);
        assert_eq!(tree[0].slug, "office");
        assert_eq!(tree[0].children.len(), 1);
        assert_eq!(tree[0].children[0].children[0].slug, "laser-printers");
    }

    #[test]
    fn test_build_tree_multiple_roots() {
        let tree = CategoryTreeDto::build_tree(vec![
            category(Uuid::new_v4(), None, "office"),
            category(Uuid::new_v4(), None, "furniture"),
        ]);

        assert_eq!(tree.len(), 2);
        assert!(tree.iter().all(|node| node.children.is_empty()));
    }
}
