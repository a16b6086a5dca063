use utoipa::openapi::security::{ApiKey, ApiKeyValue, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::features::categories::{dtos as categories_dtos, handlers as categories_handlers};
use crate::features::components::{
    dtos as components_dtos, handlers as components_handlers, models as components_models,
};
use crate::features::tags::{dtos as tags_dtos, handlers as tags_handlers};
use crate::shared::types::ApiResponse;

#[derive(OpenApi)]
#[openapi(
    paths(
        // Components
        components_handlers::create_component,
        components_handlers::list_components,
        components_handlers::get_component,
        components_handlers::update_component,
        components_handlers::delete_component,
        components_handlers::add_component_tag,
        components_handlers::update_component_status,
        components_handlers::update_component_approval,
        // Categories
        categories_handlers::create_category,
        categories_handlers::list_categories,
        categories_handlers::get_category,
        // Tags
        tags_handlers::create_tag,
        tags_handlers::list_tags,
        tags_handlers::get_tag,
    ),
    components(
        schemas(
            // Components
            components_models::ComponentStatus,
            components_models::ApprovalStatus,
            components_dtos::CreateComponentDto,
            components_dtos::UpdateComponentDto,
            components_dtos::AddComponentTagDto,
            components_dtos::UpdateComponentStatusDto,
            components_dtos::UpdateComponentApprovalDto,
            components_dtos::ComponentResponseDto,
            ApiResponse<components_dtos::ComponentResponseDto>,
            ApiResponse<Vec<components_dtos::ComponentResponseDto>>,
            // Categories
            categories_dtos::CreateCategoryDto,
            categories_dtos::CategoryResponseDto,
            ApiResponse<categories_dtos::CategoryResponseDto>,
            ApiResponse<Vec<categories_dtos::CategoryResponseDto>>,
            // Tags
            tags_dtos::CreateTagDto,
            tags_dtos::TagResponseDto,
            ApiResponse<tags_dtos::TagResponseDto>,
            ApiResponse<Vec<tags_dtos::TagResponseDto>>,
        )
    ),
    tags(
        (name = "components", description = "UI component catalog and moderation"),
        (name = "categories", description = "Component categories"),
        (name = "tags", description = "Component tags"),
    ),
    modifiers(&CallerIdAddon),
    info(
        title = "ComponentHub API",
        version = "0.1.0",
        description = "Catalog of reusable UI components",
    )
)]
pub struct ApiDoc;

/// Documents the `X-User-Id` header that write endpoints require
struct CallerIdAddon;

impl Modify for CallerIdAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "caller_id",
                SecurityScheme::ApiKey(ApiKey::Header(ApiKeyValue::new("X-User-Id"))),
            );
        }
    }
}

/// Modifier to override OpenAPI info from config
pub struct SwaggerInfoModifier {
    pub title: String,
    pub version: String,
    pub description: String,
}

impl Modify for SwaggerInfoModifier {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        openapi.info.title = self.title.clone();
        openapi.info.version = self.version.clone();
        openapi.info.description = Some(self.description.clone());
    }
}
