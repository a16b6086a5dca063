use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

use crate::features::components::models::{ApprovalStatus, ComponentStatus};
use crate::features::tags::models::Tag;

/// Component row joined with its category.
///
/// Category columns are aliased with a `category_` prefix in the select list.
#[derive(Debug, Clone, FromRow)]
pub struct ComponentRow {
    pub id: Uuid,
    pub slug: String,
    pub name: String,
    pub description: Option<String>,
    pub category_id: Uuid,
    pub code_jsx: String,
    pub code_css: Option<String>,
    pub props_definition: Option<serde_json::Value>,
    pub user_id: Uuid,
    pub status: ComponentStatus,
    pub approval_status: ApprovalStatus,
    pub reviewer_id: Option<Uuid>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub category_slug: String,
    pub category_name: String,
    pub category_created_at: DateTime<Utc>,
    pub category_updated_at: DateTime<Utc>,
}

/// A tag attached to a component, loaded in bulk for a page of components
#[derive(Debug, Clone, FromRow)]
pub struct ComponentTag {
    pub component_id: Uuid,
    #[sqlx(flatten)]
    pub tag: Tag,
}

/// Current moderation state of a live component, locked for a transition
#[derive(Debug, Clone, Copy, FromRow)]
pub struct ModerationState {
    pub id: Uuid,
    pub status: ComponentStatus,
    pub approval_status: ApprovalStatus,
}

/// Data for inserting a new component
#[derive(Debug)]
pub struct NewComponent {
    pub slug: String,
    pub name: String,
    pub description: Option<String>,
    pub category_id: Uuid,
    pub code_jsx: String,
    pub code_css: Option<String>,
    pub props_definition: Option<serde_json::Value>,
    pub user_id: Uuid,
}
