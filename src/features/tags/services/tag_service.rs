use sqlx::PgPool;

use crate::core::error::{map_db_error, AppError, Result};
use crate::features::tags::dtos::TagResponseDto;
use crate::features::tags::models::Tag;
use crate::shared::slug::slugify;

const TAG_COLUMNS: &str = "id, slug, name, created_at, updated_at";

/// Service for tag operations
pub struct TagService {
    pool: PgPool,
}

impl TagService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Create a tag, deriving its slug from the name
    pub async fn create(&self, name: &str) -> Result<TagResponseDto> {
        let name = name.trim();
        let slug = slugify(name);

        let tag = sqlx::query_as::<_, Tag>(&format!(
            r#"
            INSERT INTO tags (slug, name)
            VALUES ($1, $2)
            RETURNING {TAG_COLUMNS}
            "#
        ))
        .bind(&slug)
        .bind(name)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| map_db_error(e, "tag"))?;

        tracing::info!("Created tag: {} ({})", tag.slug, tag.id);
        Ok(tag.into())
    }

    /// List all live tags ordered by name
    pub async fn list(&self) -> Result<Vec<TagResponseDto>> {
        let tags = sqlx::query_as::<_, Tag>(&format!(
            r#"
            SELECT {TAG_COLUMNS}
            FROM tags
            WHERE deleted_at IS NULL
            ORDER BY name ASC
            "#
        ))
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to list tags: {:?}", e);
            AppError::Database(e)
        })?;

        Ok(tags.into_iter().map(|t| t.into()).collect())
    }

    /// Get tag by slug
    pub async fn get_by_slug(&self, slug: &str) -> Result<TagResponseDto> {
        sqlx::query_as::<_, Tag>(&format!(
            r#"
            SELECT {TAG_COLUMNS}
            FROM tags
            WHERE slug = $1 AND deleted_at IS NULL
            "#
        ))
        .bind(slug)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to get tag by slug: {:?}", e);
            AppError::Database(e)
        })?
        .map(|t| t.into())
        .ok_or_else(|| AppError::NotFound(format!("Tag '{}' not found", slug)))
    }
}
