use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::features::categories::models::Category;
use crate::shared::validation::validate_not_blank;

/// Request DTO for creating a category
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateCategoryDto {
    /// Display name; the slug is derived from it
    #[validate(
        length(min = 1, max = 100),
        custom(function = "validate_not_blank")
    )]
    pub name: String,
}

/// Response DTO for category
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CategoryResponseDto {
    pub id: Uuid,
    pub slug: String,
    pub name: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Category> for CategoryResponseDto {
    fn from(c: Category) -> Self {
        Self {
            id: c.id,
            slug: c.slug,
            name: c.name,
            created_at: c.created_at,
            updated_at: c.updated_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_category_dto_validation() {
        assert!(CreateCategoryDto {
            name: "UI Kit".to_string()
        }
        .validate()
        .is_ok());
        assert!(CreateCategoryDto {
            name: "  ".to_string()
        }
        .validate()
        .is_err());
        assert!(CreateCategoryDto {
            name: "x".repeat(101)
        }
        .validate()
        .is_err());
        assert!(CreateCategoryDto {
            name: "UI\u{0}Kit".to_string()
        }
        .validate()
        .is_err());
    }

    #[test]
    fn test_response_hides_soft_delete_marker() {
        let now = Utc::now();
        let dto = CategoryResponseDto::from(Category {
            id: Uuid::new_v4(),
            slug: "ui-kit".to_string(),
            name: "UI Kit".to_string(),
            created_at: now,
            updated_at: now,
        });
        let json = serde_json::to_value(&dto).unwrap();
        assert_eq!(json["slug"], "ui-kit");
        assert!(json.get("deleted_at").is_none());
    }
}
