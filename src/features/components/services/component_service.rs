use std::collections::HashMap;

use sqlx::{PgConnection, PgPool};
use uuid::Uuid;

use crate::core::error::{map_db_error, AppError, Result};
use crate::features::components::dtos::{
    ComponentResponseDto, CreateComponentDto, UpdateComponentDto,
};
use crate::features::components::models::{
    ApprovalStatus, ComponentRow, ComponentStatus, ComponentTag, ModerationState, NewComponent,
};
use crate::features::components::services::component_query::{
    build_list_query, ComponentFilter, COMPONENT_SELECT,
};
use crate::features::tags::dtos::TagResponseDto;
use crate::shared::slug::slugify;
use crate::shared::types::Pagination;

/// Service for component operations
pub struct ComponentService {
    pool: PgPool,
}

impl ComponentService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Create a component owned by `user_id` and return it populated
    pub async fn create(
        &self,
        dto: CreateComponentDto,
        user_id: Uuid,
    ) -> Result<ComponentResponseDto> {
        let name = dto.name.trim().to_string();
        let new = NewComponent {
            slug: slugify(&name),
            name,
            description: dto.description,
            category_id: dto.category_id,
            code_jsx: dto.code_jsx,
            code_css: dto.code_css,
            props_definition: dto.props_definition,
            user_id,
        };

        let mut tx = self.pool.begin().await?;

        let id: Uuid = sqlx::query_scalar(
            r#"
            INSERT INTO components (
                slug, name, description, category_id,
                code_jsx, code_css, props_definition, user_id
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING id
            "#,
        )
        .bind(&new.slug)
        .bind(&new.name)
        .bind(&new.description)
        .bind(new.category_id)
        .bind(&new.code_jsx)
        .bind(&new.code_css)
        .bind(&new.props_definition)
        .bind(new.user_id)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| map_db_error(e, "component"))?;

        let component = fetch_populated_by_id(&mut tx, id).await?;
        tx.commit().await?;

        tracing::info!("Created component: {} ({})", component.slug, component.id);
        Ok(component)
    }

    /// List one page of live components matching `filter`, newest first
    pub async fn list(
        &self,
        filter: &ComponentFilter,
        pagination: &Pagination,
    ) -> Result<Vec<ComponentResponseDto>> {
        let mut conn = self.pool.acquire().await?;

        let rows = build_list_query(filter, pagination)
            .build_query_as::<ComponentRow>()
            .fetch_all(&mut *conn)
            .await
            .map_err(|e| {
                tracing::error!("Failed to list components: {:?}", e);
                AppError::Database(e)
            })?;

        populate(&mut conn, rows).await
    }

    /// Get a live component by slug
    pub async fn get_by_slug(&self, slug: &str) -> Result<ComponentResponseDto> {
        let mut conn = self.pool.acquire().await?;
        let row = fetch_row_by_slug(&mut conn, slug)
            .await?
            .ok_or_else(|| component_not_found(slug))?;

        populate_one(&mut conn, row).await
    }

    /// Apply a partial update. A new name regenerates the slug.
    pub async fn update(
        &self,
        slug: &str,
        dto: UpdateComponentDto,
    ) -> Result<ComponentResponseDto> {
        if dto.is_empty() {
            return self.get_by_slug(slug).await;
        }

        let name = dto.name.as_deref().map(str::trim);
        let new_slug = name.map(slugify);

        let mut tx = self.pool.begin().await?;

        let id: Uuid = sqlx::query_scalar(
            r#"
            UPDATE components
            SET name = COALESCE($1, name),
                slug = COALESCE($2, slug),
                description = COALESCE($3, description),
                updated_at = NOW()
            WHERE slug = $4 AND deleted_at IS NULL
            RETURNING id
            "#,
        )
        .bind(name)
        .bind(&new_slug)
        .bind(&dto.description)
        .bind(slug)
        .fetch_optional(&mut *tx)
        .await
        .map_err(|e| map_db_error(e, "component"))?
        .ok_or_else(|| component_not_found(slug))?;

        let component = fetch_populated_by_id(&mut tx, id).await?;
        tx.commit().await?;

        tracing::info!("Updated component: {} ({})", component.slug, component.id);
        Ok(component)
    }

    /// Soft-delete a live component
    pub async fn delete(&self, slug: &str) -> Result<()> {
        let result = sqlx::query(
            r#"
            UPDATE components
            SET deleted_at = NOW(), updated_at = NOW()
            WHERE slug = $1 AND deleted_at IS NULL
            "#,
        )
        .bind(slug)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to delete component: {:?}", e);
            AppError::Database(e)
        })?;

        if result.rows_affected() == 0 {
            return Err(component_not_found(slug));
        }

        tracing::info!("Soft-deleted component: {}", slug);
        Ok(())
    }

    /// Attach a tag. Attaching an already present tag changes nothing.
    pub async fn add_tag(&self, slug: &str, tag_id: Uuid) -> Result<ComponentResponseDto> {
        let mut tx = self.pool.begin().await?;

        let component_id: Uuid = sqlx::query_scalar(
            "SELECT id FROM components WHERE slug = $1 AND deleted_at IS NULL",
        )
        .bind(slug)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or_else(|| component_not_found(slug))?;

        let tag_exists: Option<Uuid> =
            sqlx::query_scalar("SELECT id FROM tags WHERE id = $1 AND deleted_at IS NULL")
                .bind(tag_id)
                .fetch_optional(&mut *tx)
                .await?;
        if tag_exists.is_none() {
            return Err(AppError::NotFound(format!("Tag '{}' not found", tag_id)));
        }

        let inserted = sqlx::query(
            r#"
            INSERT INTO component_tags (component_id, tag_id)
            VALUES ($1, $2)
            ON CONFLICT DO NOTHING
            "#,
        )
        .bind(component_id)
        .bind(tag_id)
        .execute(&mut *tx)
        .await
        .map_err(|e| map_db_error(e, "component tag"))?;

        if inserted.rows_affected() == 0 {
            tracing::debug!("Tag {} already attached to component {}", tag_id, slug);
        }

        let component = fetch_populated_by_id(&mut tx, component_id).await?;
        tx.commit().await?;

        Ok(component)
    }

    /// Move a component to another publication status
    pub async fn update_status(
        &self,
        slug: &str,
        next: ComponentStatus,
    ) -> Result<ComponentResponseDto> {
        let mut tx = self.pool.begin().await?;
        let state = lock_moderation_state(&mut tx, slug).await?;

        if !state.status.can_transition_to(next) {
            return Err(AppError::Conflict(format!(
                "Cannot transition status from '{}' to '{}'",
                state.status, next
            )));
        }

        sqlx::query("UPDATE components SET status = $1, updated_at = NOW() WHERE id = $2")
            .bind(next)
            .bind(state.id)
            .execute(&mut *tx)
            .await?;

        let component = fetch_populated_by_id(&mut tx, state.id).await?;
        tx.commit().await?;

        tracing::info!(
            "Component {} status {} -> {}",
            component.slug,
            state.status,
            next
        );
        Ok(component)
    }

    /// Record a review decision or reopen one.
    ///
    /// Approving or rejecting stores `reviewer_id`; returning to pending clears it.
    pub async fn update_approval(
        &self,
        slug: &str,
        next: ApprovalStatus,
        reviewer_id: Uuid,
    ) -> Result<ComponentResponseDto> {
        let mut tx = self.pool.begin().await?;
        let state = lock_moderation_state(&mut tx, slug).await?;

        if !state.approval_status.can_transition_to(next) {
            return Err(AppError::Conflict(format!(
                "Cannot transition approval status from '{}' to '{}'",
                state.approval_status, next
            )));
        }

        let reviewer = next.requires_reviewer().then_some(reviewer_id);

        sqlx::query(
            r#"
            UPDATE components
            SET approval_status = $1, reviewer_id = $2, updated_at = NOW()
            WHERE id = $3
            "#,
        )
        .bind(next)
        .bind(reviewer)
        .bind(state.id)
        .execute(&mut *tx)
        .await?;

        let component = fetch_populated_by_id(&mut tx, state.id).await?;
        tx.commit().await?;

        tracing::info!(
            "Component {} approval {} -> {}",
            component.slug,
            state.approval_status,
            next
        );
        Ok(component)
    }
}

fn component_not_found(slug: &str) -> AppError {
    AppError::NotFound(format!("Component '{}' not found", slug))
}

async fn lock_moderation_state(conn: &mut PgConnection, slug: &str) -> Result<ModerationState> {
    sqlx::query_as::<_, ModerationState>(
        r#"
        SELECT id, status, approval_status
        FROM components
        WHERE slug = $1 AND deleted_at IS NULL
        FOR UPDATE
        "#,
    )
    .bind(slug)
    .fetch_optional(conn)
    .await?
    .ok_or_else(|| component_not_found(slug))
}

async fn fetch_row_by_slug(conn: &mut PgConnection, slug: &str) -> Result<Option<ComponentRow>> {
    sqlx::query_as::<_, ComponentRow>(&format!("{COMPONENT_SELECT} AND c.slug = $1"))
        .bind(slug)
        .fetch_optional(conn)
        .await
        .map_err(|e| {
            tracing::error!("Failed to get component by slug: {:?}", e);
            AppError::Database(e)
        })
}

async fn fetch_populated_by_id(conn: &mut PgConnection, id: Uuid) -> Result<ComponentResponseDto> {
    let row = sqlx::query_as::<_, ComponentRow>(&format!("{COMPONENT_SELECT} AND c.id = $1"))
        .bind(id)
        .fetch_optional(&mut *conn)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Component {} not found", id)))?;

    populate_one(conn, row).await
}

async fn populate_one(conn: &mut PgConnection, row: ComponentRow) -> Result<ComponentResponseDto> {
    let mut populated = populate(conn, vec![row]).await?;
    populated
        .pop()
        .ok_or_else(|| AppError::Internal("Component vanished while loading tags".to_string()))
}

/// Attach tags to each row, loading them for the whole batch in one query
async fn populate(
    conn: &mut PgConnection,
    rows: Vec<ComponentRow>,
) -> Result<Vec<ComponentResponseDto>> {
    if rows.is_empty() {
        return Ok(Vec::new());
    }

    let ids: Vec<Uuid> = rows.iter().map(|r| r.id).collect();
    let links = sqlx::query_as::<_, ComponentTag>(
        r#"
        SELECT ct.component_id, t.id, t.slug, t.name, t.created_at, t.updated_at
        FROM component_tags ct
        JOIN tags t ON t.id = ct.tag_id
        WHERE ct.component_id = ANY($1) AND t.deleted_at IS NULL
        ORDER BY t.name ASC
        "#,
    )
    .bind(&ids)
    .fetch_all(conn)
    .await
    .map_err(|e| {
        tracing::error!("Failed to load component tags: {:?}", e);
        AppError::Database(e)
    })?;

    let mut tags_by_component: HashMap<Uuid, Vec<TagResponseDto>> = HashMap::new();
    for link in links {
        tags_by_component
            .entry(link.component_id)
            .or_default()
            .push(link.tag.into());
    }

    Ok(rows
        .into_iter()
        .map(|row| {
            let tags = tags_by_component.remove(&row.id).unwrap_or_default();
            ComponentResponseDto::from_row(row, tags)
        })
        .collect())
}
