use sqlx::PgPool;
use uuid::Uuid;

use crate::core::error::{map_db_error, AppError, Result};
use crate::features::categories::dtos::CategoryResponseDto;
use crate::features::categories::models::Category;
use crate::shared::slug::slugify;

const CATEGORY_COLUMNS: &str = "id, slug, name, created_at, updated_at";

/// Service for category operations
pub struct CategoryService {
    pool: PgPool,
}

impl CategoryService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Create a category, deriving its slug from the name
    pub async fn create(&self, name: &str) -> Result<CategoryResponseDto> {
        let name = name.trim();
        let slug = slugify(name);

        let category = sqlx::query_as::<_, Category>(&format!(
            r#"
            INSERT INTO categories (slug, name)
            VALUES ($1, $2)
            RETURNING {CATEGORY_COLUMNS}
            "#
        ))
        .bind(&slug)
        .bind(name)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| map_db_error(e, "category"))?;

        tracing::info!("Created category: {} ({})", category.slug, category.id);
        Ok(category.into())
    }

    /// List all live categories ordered by name
    pub async fn list(&self) -> Result<Vec<CategoryResponseDto>> {
        let categories = sqlx::query_as::<_, Category>(&format!(
            r#"
            SELECT {CATEGORY_COLUMNS}
            FROM categories
            WHERE deleted_at IS NULL
            ORDER BY name ASC
            "#
        ))
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to list categories: {:?}", e);
            AppError::Database(e)
        })?;

        Ok(categories.into_iter().map(|c| c.into()).collect())
    }

    /// Get category by slug
    pub async fn get_by_slug(&self, slug: &str) -> Result<CategoryResponseDto> {
        self.find_by_slug(slug)
            .await?
            .map(|c| c.into())
            .ok_or_else(|| AppError::NotFound(format!("Category '{}' not found", slug)))
    }

    /// Resolve a category slug to its id, used by the component filter
    pub async fn resolve_id(&self, slug: &str) -> Result<Uuid> {
        self.find_by_slug(slug)
            .await?
            .map(|c| c.id)
            .ok_or_else(|| AppError::NotFound(format!("Category '{}' not found", slug)))
    }

    async fn find_by_slug(&self, slug: &str) -> Result<Option<Category>> {
        sqlx::query_as::<_, Category>(&format!(
            r#"
            SELECT {CATEGORY_COLUMNS}
            FROM categories
            WHERE slug = $1 AND deleted_at IS NULL
            "#
        ))
        .bind(slug)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to get category by slug: {:?}", e);
            AppError::Database(e)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[sqlx::test(migrator = "crate::core::database::MIGRATOR")]
    #[ignore = "requires a Postgres DATABASE_URL"]
    async fn create_derives_slug_and_rejects_duplicates(pool: PgPool) {
        let service = CategoryService::new(pool);

        let created = service.create("  Form Controls ").await.unwrap();
        assert_eq!(created.slug, "form-controls");
        assert_eq!(created.name, "Form Controls");

        let err = service.create("form controls").await.unwrap_err();
        assert!(matches!(err, AppError::Conflict(_)));
    }

    #[sqlx::test(migrator = "crate::core::database::MIGRATOR")]
    #[ignore = "requires a Postgres DATABASE_URL"]
    async fn list_is_name_ascending(pool: PgPool) {
        let service = CategoryService::new(pool);
        service.create("Zeta").await.unwrap();
        service.create("Alpha").await.unwrap();
        service.create("Mid").await.unwrap();

        let names: Vec<String> = service
            .list()
            .await
            .unwrap()
            .into_iter()
            .map(|c| c.name)
            .collect();
        assert_eq!(names, vec!["Alpha", "Mid", "Zeta"]);
    }

    #[sqlx::test(migrator = "crate::core::database::MIGRATOR")]
    #[ignore = "requires a Postgres DATABASE_URL"]
    async fn unknown_slug_is_not_found(pool: PgPool) {
        let service = CategoryService::new(pool);
        assert!(matches!(
            service.get_by_slug("missing").await,
            Err(AppError::NotFound(_))
        ));
        assert!(matches!(
            service.resolve_id("missing").await,
            Err(AppError::NotFound(_))
        ));
    }
}
