use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

use crate::features::categories::dtos::CategoryResponseDto;
use crate::features::components::models::{ApprovalStatus, ComponentRow, ComponentStatus};
use crate::features::tags::dtos::TagResponseDto;
use crate::shared::validation::{validate_json_no_nul, validate_no_nul, validate_not_blank};

// Query params for listing components
#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ListComponentsQuery {
    /// Page number (1-indexed, default 1)
    #[param(minimum = 1)]
    pub page: Option<i64>,

    /// Items per page (default 20, max 100)
    #[param(minimum = 1, maximum = 100)]
    pub limit: Option<i64>,

    /// Comma-separated tag names; a component matches if it has any of them
    pub tag: Option<String>,

    /// Category slug
    pub category: Option<String>,

    /// Publication status
    pub status: Option<ComponentStatus>,

    /// Approval status
    pub approval: Option<ApprovalStatus>,

    /// Case-insensitive search in name or description
    pub q: Option<String>,
}

// Create request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateComponentDto {
    #[validate(
        length(min = 1, max = 200),
        custom(function = "validate_not_blank")
    )]
    pub name: String,

    #[validate(custom(function = "validate_no_nul"))]
    pub description: Option<String>,

    pub category_id: Uuid,

    #[validate(length(min = 1), custom(function = "validate_no_nul"))]
    pub code_jsx: String,

    #[validate(custom(function = "validate_no_nul"))]
    pub code_css: Option<String>,

    /// Arbitrary JSON describing the component props
    #[validate(custom(function = "validate_json_no_nul"))]
    pub props_definition: Option<serde_json::Value>,
}

// Partial update request; absent fields are left untouched
#[derive(Debug, Default, Deserialize, Validate, ToSchema)]
pub struct UpdateComponentDto {
    #[validate(
        length(min = 1, max = 200),
        custom(function = "validate_not_blank")
    )]
    pub name: Option<String>,

    #[validate(custom(function = "validate_no_nul"))]
    pub description: Option<String>,
}

impl UpdateComponentDto {
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.description.is_none()
    }
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct AddComponentTagDto {
    pub tag_id: Uuid,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateComponentStatusDto {
    pub status: ComponentStatus,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateComponentApprovalDto {
    pub approval_status: ApprovalStatus,

    /// Reviewer recorded with an approve/reject decision; defaults to the caller
    pub reviewer_id: Option<Uuid>,
}

// Response DTO
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ComponentResponseDto {
    pub id: Uuid,
    pub slug: String,
    pub name: String,
    pub description: Option<String>,
    pub category_id: Uuid,
    pub category: CategoryResponseDto,
    pub code_jsx: String,
    pub code_css: Option<String>,
    pub props_definition: Option<serde_json::Value>,
    pub user_id: Uuid,
    pub tags: Vec<TagResponseDto>,
    pub status: ComponentStatus,
    pub approval_status: ApprovalStatus,
    pub reviewer_id: Option<Uuid>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl ComponentResponseDto {
    pub fn from_row(row: ComponentRow, tags: Vec<TagResponseDto>) -> Self {
        Self {
            id: row.id,
            slug: row.slug,
            name: row.name,
            description: row.description,
            category_id: row.category_id,
            category: CategoryResponseDto {
                id: row.category_id,
                slug: row.category_slug,
                name: row.category_name,
                created_at: row.category_created_at,
                updated_at: row.category_updated_at,
            },
            code_jsx: row.code_jsx,
            code_css: row.code_css,
            props_definition: row.props_definition,
            user_id: row.user_id,
            tags,
            status: row.status,
            approval_status: row.approval_status,
            reviewer_id: row.reviewer_id,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_dto(name: &str, code_jsx: &str) -> CreateComponentDto {
        CreateComponentDto {
            name: name.to_string(),
            description: None,
            category_id: Uuid::new_v4(),
            code_jsx: code_jsx.to_string(),
            code_css: None,
            props_definition: None,
        }
    }

    #[test]
    fn test_create_dto_validation() {
        assert!(create_dto("Button", "<button />").validate().is_ok());
        assert!(create_dto("", "<button />").validate().is_err());
        assert!(create_dto("   ", "<button />").validate().is_err());
        assert!(create_dto("Button", "").validate().is_err());
    }

    #[test]
    fn test_nul_characters_fail_validation() {
        assert!(create_dto("a\u{0}b", "<button />").validate().is_err());
        assert!(create_dto("Button", "<b>\u{0}</b>").validate().is_err());

        let mut dto = create_dto("Button", "<button />");
        dto.code_css = Some(".btn {\u{0}}".to_string());
        assert!(dto.validate().is_err());

        let mut dto = create_dto("Button", "<button />");
        dto.props_definition = Some(serde_json::json!({"label": "x\u{0}"}));
        assert!(dto.validate().is_err());

        let update = UpdateComponentDto {
            name: None,
            description: Some("bad\u{0}".to_string()),
        };
        assert!(update.validate().is_err());
    }

    #[test]
    fn test_create_dto_requires_fields() {
        let missing_jsx = serde_json::json!({
            "name": "Button",
            "category_id": Uuid::new_v4(),
        });
        assert!(serde_json::from_value::<CreateComponentDto>(missing_jsx).is_err());

        let full = serde_json::json!({
            "name": "Button",
            "category_id": Uuid::new_v4(),
            "code_jsx": "<button />",
            "props_definition": {"variant": {"type": "string"}},
        });
        let dto: CreateComponentDto = serde_json::from_value(full).unwrap();
        assert_eq!(dto.props_definition.unwrap()["variant"]["type"], "string");
    }

    #[test]
    fn test_update_dto_partial() {
        let dto: UpdateComponentDto =
            serde_json::from_value(serde_json::json!({"description": "new"})).unwrap();
        assert!(dto.name.is_none());
        assert!(!dto.is_empty());
        assert!(dto.validate().is_ok());

        assert!(UpdateComponentDto::default().is_empty());

        let blank = UpdateComponentDto {
            name: Some(" ".to_string()),
            description: None,
        };
        assert!(blank.validate().is_err());
    }

    #[test]
    fn test_approval_dto_reviewer_optional() {
        let dto: UpdateComponentApprovalDto =
            serde_json::from_value(serde_json::json!({"approval_status": "rejected"})).unwrap();
        assert_eq!(dto.approval_status, ApprovalStatus::Rejected);
        assert!(dto.reviewer_id.is_none());
    }

    #[test]
    fn test_from_row_embeds_category() {
        let now = Utc::now();
        let category_id = Uuid::new_v4();
        let row = ComponentRow {
            id: Uuid::new_v4(),
            slug: "button".to_string(),
            name: "Button".to_string(),
            description: Some("Reusable button".to_string()),
            category_id,
            code_jsx: "<button />".to_string(),
            code_css: None,
            props_definition: None,
            user_id: Uuid::new_v4(),
            status: ComponentStatus::Draft,
            approval_status: ApprovalStatus::Pending,
            reviewer_id: None,
            created_at: now,
            updated_at: now,
            category_slug: "ui-kit".to_string(),
            category_name: "UI Kit".to_string(),
            category_created_at: now,
            category_updated_at: now,
        };

        let dto = ComponentResponseDto::from_row(row, vec![]);
        assert_eq!(dto.category.id, category_id);
        assert_eq!(dto.category.slug, "ui-kit");

        let json = serde_json::to_value(&dto).unwrap();
        assert_eq!(json["status"], "draft");
        assert_eq!(json["approval_status"], "pending");
        assert_eq!(json["tags"], serde_json::json!([]));
    }
}
