use sqlx::{Postgres, QueryBuilder};
use uuid::Uuid;

use crate::features::components::models::{ApprovalStatus, ComponentStatus};
use crate::shared::types::Pagination;

/// Select list shared by every component read; category columns are aliased
/// to match `ComponentRow`.
pub(crate) const COMPONENT_SELECT: &str = r#"
    SELECT
        c.id, c.slug, c.name, c.description, c.category_id,
        c.code_jsx, c.code_css, c.props_definition, c.user_id,
        c.status, c.approval_status, c.reviewer_id,
        c.created_at, c.updated_at,
        cat.slug AS category_slug,
        cat.name AS category_name,
        cat.created_at AS category_created_at,
        cat.updated_at AS category_updated_at
    FROM components c
    JOIN categories cat ON cat.id = c.category_id
    WHERE c.deleted_at IS NULL
"#;

/// Resolved list filters. Dimensions combine with AND.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ComponentFilter {
    /// Lowercased tag names; a component matches if it carries any of them
    pub tag_names: Vec<String>,
    pub category_id: Option<Uuid>,
    pub status: Option<ComponentStatus>,
    pub approval: Option<ApprovalStatus>,
    pub search: Option<String>,
}

impl ComponentFilter {
    /// Split a comma-separated tag list into distinct, lowercased, non-empty names
    pub fn parse_tags(raw: Option<&str>) -> Vec<String> {
        let mut names: Vec<String> = Vec::new();
        for name in raw
            .unwrap_or_default()
            .split(',')
            .map(|t| t.trim().to_lowercase())
            .filter(|t| !t.is_empty())
        {
            if !names.contains(&name) {
                names.push(name);
            }
        }
        names
    }

    /// Blank search text means no search
    pub fn parse_search(raw: Option<&str>) -> Option<String> {
        raw.map(str::trim)
            .filter(|q| !q.is_empty())
            .map(str::to_string)
    }
}

/// Escape LIKE metacharacters so user text matches literally
pub fn escape_like(input: &str) -> String {
    let mut escaped = String::with_capacity(input.len());
    for ch in input.chars() {
        if matches!(ch, '\\' | '%' | '_') {
            escaped.push('\\');
        }
        escaped.push(ch);
    }
    escaped
}

/// Build the paged, filtered component listing query
pub fn build_list_query(
    filter: &ComponentFilter,
    pagination: &Pagination,
) -> QueryBuilder<'static, Postgres> {
    let mut builder = QueryBuilder::new(COMPONENT_SELECT);

    if !filter.tag_names.is_empty() {
        builder.push(
            " AND EXISTS (SELECT 1 FROM component_tags ct \
             JOIN tags t ON t.id = ct.tag_id \
             WHERE ct.component_id = c.id AND t.deleted_at IS NULL \
             AND (LOWER(t.name) = ANY(",
        );
        builder.push_bind(filter.tag_names.clone());
        builder.push(") OR t.slug = ANY(");
        builder.push_bind(filter.tag_names.clone());
        builder.push(")))");
    }

    if let Some(category_id) = filter.category_id {
        builder.push(" AND c.category_id = ");
        builder.push_bind(category_id);
    }

    if let Some(status) = filter.status {
        builder.push(" AND c.status = ");
        builder.push_bind(status);
    }

    if let Some(approval) = filter.approval {
        builder.push(" AND c.approval_status = ");
        builder.push_bind(approval);
    }

    if let Some(search) = &filter.search {
        let pattern = format!("%{}%", escape_like(search));
        builder.push(" AND (c.name ILIKE ");
        builder.push_bind(pattern.clone());
        builder.push(" OR c.description ILIKE ");
        builder.push_bind(pattern);
        builder.push(")");
    }

    builder.push(" ORDER BY c.created_at DESC, c.id DESC LIMIT ");
    builder.push_bind(pagination.limit);
    builder.push(" OFFSET ");
    builder.push_bind(pagination.offset());

    builder
}
