use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::features::tags::models::Tag;
use crate::shared::validation::validate_not_blank;

/// Request DTO for creating a tag
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateTagDto {
    #[validate(
        length(min = 1, max = 100),
        custom(function = "validate_not_blank")
    )]
    pub name: String,
}

/// Response DTO for tag
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct TagResponseDto {
    pub id: Uuid,
    pub slug: String,
    pub name: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Tag> for TagResponseDto {
    fn from(t: Tag) -> Self {
        Self {
            id: t.id,
            slug: t.slug,
            name: t.name,
            created_at: t.created_at,
            updated_at: t.updated_at,
        }
    }
}
