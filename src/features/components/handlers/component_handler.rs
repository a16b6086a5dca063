use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use validator::Validate;

use crate::core::error::{AppError, Result};
use crate::core::extractor::{AppJson, AppQuery, Caller};
use crate::features::categories::CategoryService;
use crate::features::components::dtos::{
    AddComponentTagDto, ComponentResponseDto, CreateComponentDto, ListComponentsQuery,
    UpdateComponentApprovalDto, UpdateComponentDto, UpdateComponentStatusDto,
};
use crate::features::components::services::{ComponentFilter, ComponentService};
use crate::shared::types::{ApiResponse, Pagination};
use crate::shared::validation::validate_no_nul;

/// State for component handlers
#[derive(Clone)]
pub struct ComponentState {
    pub component_service: Arc<ComponentService>,
    pub category_service: Arc<CategoryService>,
}

/// Create a component owned by the caller
#[utoipa::path(
    post,
    path = "/api/v1/components",
    request_body = CreateComponentDto,
    responses(
        (status = 201, description = "Component created", body = ApiResponse<ComponentResponseDto>),
        (status = 400, description = "Validation error or unknown category"),
        (status = 401, description = "Missing caller identity"),
        (status = 409, description = "Slug already taken")
    ),
    security(("caller_id" = [])),
    tag = "components"
)]
pub async fn create_component(
    caller: Caller,
    State(state): State<ComponentState>,
    AppJson(dto): AppJson<CreateComponentDto>,
) -> Result<(StatusCode, Json<ApiResponse<ComponentResponseDto>>)> {
    dto.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let component = state
        .component_service
        .create(dto, caller.user_id)
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(Some(component))),
    ))
}

/// List components with filters, newest first
#[utoipa::path(
    get,
    path = "/api/v1/components",
    params(ListComponentsQuery),
    responses(
        (status = 200, description = "Page of components", body = ApiResponse<Vec<ComponentResponseDto>>),
        (status = 400, description = "Invalid query parameters"),
        (status = 404, description = "Unknown category")
    ),
    tag = "components"
)]
pub async fn list_components(
    State(state): State<ComponentState>,
    AppQuery(query): AppQuery<ListComponentsQuery>,
) -> Result<Json<ApiResponse<Vec<ComponentResponseDto>>>> {
    let pagination = Pagination::from_query(query.page, query.limit)?;

    for text in [&query.tag, &query.category, &query.q].into_iter().flatten() {
        validate_no_nul(text).map_err(|_| {
            AppError::Validation("Query parameters must not contain NUL characters".to_string())
        })?;
    }

    let category_slug = query
        .category
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty());
    let category_id = match category_slug {
        Some(slug) => Some(state.category_service.resolve_id(slug).await?),
        None => None,
    };

    let filter = ComponentFilter {
        tag_names: ComponentFilter::parse_tags(query.tag.as_deref()),
        category_id,
        status: query.status,
        approval: query.approval,
        search: ComponentFilter::parse_search(query.q.as_deref()),
    };

    let components = state.component_service.list(&filter, &pagination).await?;
    Ok(Json(ApiResponse::success(Some(components))))
}

/// Get component by slug
#[utoipa::path(
    get,
    path = "/api/v1/components/{slug}",
    params(
        ("slug" = String, Path, description = "Component slug")
    ),
    responses(
        (status = 200, description = "Component found", body = ApiResponse<ComponentResponseDto>),
        (status = 404, description = "Component not found")
    ),
    tag = "components"
)]
pub async fn get_component(
    State(state): State<ComponentState>,
    Path(slug): Path<String>,
) -> Result<Json<ApiResponse<ComponentResponseDto>>> {
    let component = state.component_service.get_by_slug(&slug).await?;
    Ok(Json(ApiResponse::success(Some(component))))
}

/// Update name and/or description
#[utoipa::path(
    patch,
    path = "/api/v1/components/{slug}",
    params(
        ("slug" = String, Path, description = "Component slug")
    ),
    request_body = UpdateComponentDto,
    responses(
        (status = 200, description = "Component updated", body = ApiResponse<ComponentResponseDto>),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Missing caller identity"),
        (status = 404, description = "Component not found"),
        (status = 409, description = "Slug already taken")
    ),
    security(("caller_id" = [])),
    tag = "components"
)]
pub async fn update_component(
    caller: Caller,
    State(state): State<ComponentState>,
    Path(slug): Path<String>,
    AppJson(dto): AppJson<UpdateComponentDto>,
) -> Result<Json<ApiResponse<ComponentResponseDto>>> {
    dto.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let component = state.component_service.update(&slug, dto).await?;
    tracing::info!(caller = %caller.user_id, "Component {} updated", slug);

    Ok(Json(ApiResponse::success(Some(component))))
}

/// Soft-delete a component
#[utoipa::path(
    delete,
    path = "/api/v1/components/{slug}",
    params(
        ("slug" = String, Path, description = "Component slug")
    ),
    responses(
        (status = 200, description = "Component deleted"),
        (status = 401, description = "Missing caller identity"),
        (status = 404, description = "Component not found")
    ),
    security(("caller_id" = [])),
    tag = "components"
)]
pub async fn delete_component(
    caller: Caller,
    State(state): State<ComponentState>,
    Path(slug): Path<String>,
) -> Result<Json<ApiResponse<()>>> {
    state.component_service.delete(&slug).await?;
    tracing::info!(caller = %caller.user_id, "Component {} deleted", slug);

    Ok(Json(ApiResponse::success(None)))
}

/// Attach a tag to a component
#[utoipa::path(
    post,
    path = "/api/v1/components/{slug}/tags",
    params(
        ("slug" = String, Path, description = "Component slug")
    ),
    request_body = AddComponentTagDto,
    responses(
        (status = 200, description = "Tag attached", body = ApiResponse<ComponentResponseDto>),
        (status = 400, description = "Invalid body"),
        (status = 401, description = "Missing caller identity"),
        (status = 404, description = "Component or tag not found")
    ),
    security(("caller_id" = [])),
    tag = "components"
)]
pub async fn add_component_tag(
    caller: Caller,
    State(state): State<ComponentState>,
    Path(slug): Path<String>,
    AppJson(dto): AppJson<AddComponentTagDto>,
) -> Result<Json<ApiResponse<ComponentResponseDto>>> {
    let component = state.component_service.add_tag(&slug, dto.tag_id).await?;
    tracing::info!(caller = %caller.user_id, "Tag {} attached to {}", dto.tag_id, slug);

    Ok(Json(ApiResponse::success(Some(component))))
}

/// Change publication status
#[utoipa::path(
    patch,
    path = "/api/v1/components/{slug}/status",
    params(
        ("slug" = String, Path, description = "Component slug")
    ),
    request_body = UpdateComponentStatusDto,
    responses(
        (status = 200, description = "Status updated", body = ApiResponse<ComponentResponseDto>),
        (status = 400, description = "Unknown status"),
        (status = 401, description = "Missing caller identity"),
        (status = 404, description = "Component not found"),
        (status = 409, description = "Transition not allowed")
    ),
    security(("caller_id" = [])),
    tag = "components"
)]
pub async fn update_component_status(
    caller: Caller,
    State(state): State<ComponentState>,
    Path(slug): Path<String>,
    AppJson(dto): AppJson<UpdateComponentStatusDto>,
) -> Result<Json<ApiResponse<ComponentResponseDto>>> {
    let component = state
        .component_service
        .update_status(&slug, dto.status)
        .await?;
    tracing::info!(caller = %caller.user_id, "Component {} status set to {}", slug, dto.status);

    Ok(Json(ApiResponse::success(Some(component))))
}

/// Record or reopen a review decision
#[utoipa::path(
    patch,
    path = "/api/v1/components/{slug}/approval",
    params(
        ("slug" = String, Path, description = "Component slug")
    ),
    request_body = UpdateComponentApprovalDto,
    responses(
        (status = 200, description = "Approval updated", body = ApiResponse<ComponentResponseDto>),
        (status = 400, description = "Unknown approval status"),
        (status = 401, description = "Missing caller identity"),
        (status = 404, description = "Component not found"),
        (status = 409, description = "Transition not allowed")
    ),
    security(("caller_id" = [])),
    tag = "components"
)]
pub async fn update_component_approval(
    caller: Caller,
    State(state): State<ComponentState>,
    Path(slug): Path<String>,
    AppJson(dto): AppJson<UpdateComponentApprovalDto>,
) -> Result<Json<ApiResponse<ComponentResponseDto>>> {
    let reviewer_id = dto.reviewer_id.unwrap_or(caller.user_id);
    let component = state
        .component_service
        .update_approval(&slug, dto.approval_status, reviewer_id)
        .await?;
    tracing::info!(
        caller = %caller.user_id,
        "Component {} approval set to {}",
        slug,
        dto.approval_status
    );

    Ok(Json(ApiResponse::success(Some(component))))
}
