use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use validator::Validate;

use crate::core::error::{AppError, Result};
use crate::core::extractor::{AppJson, Caller};
use crate::features::tags::dtos::{CreateTagDto, TagResponseDto};
use crate::features::tags::services::TagService;
use crate::shared::types::ApiResponse;

/// Create a tag
#[utoipa::path(
    post,
    path = "/api/v1/tags",
    request_body = CreateTagDto,
    responses(
        (status = 201, description = "Tag created", body = ApiResponse<TagResponseDto>),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Missing caller identity"),
        (status = 409, description = "Slug already taken")
    ),
    security(("caller_id" = [])),
    tag = "tags"
)]
pub async fn create_tag(
    caller: Caller,
    State(service): State<Arc<TagService>>,
    AppJson(dto): AppJson<CreateTagDto>,
) -> Result<(StatusCode, Json<ApiResponse<TagResponseDto>>)> {
    dto.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let tag = service.create(&dto.name).await?;
    tracing::info!(caller = %caller.user_id, "Tag {} created", tag.slug);

    Ok((StatusCode::CREATED, Json(ApiResponse::success(Some(tag)))))
}

/// List all tags, name-ascending
#[utoipa::path(
    get,
    path = "/api/v1/tags",
    responses(
        (status = 200, description = "List of tags", body = ApiResponse<Vec<TagResponseDto>>),
    ),
    tag = "tags"
)]
pub async fn list_tags(
    State(service): State<Arc<TagService>>,
) -> Result<Json<ApiResponse<Vec<TagResponseDto>>>> {
    let tags = service.list().await?;
    Ok(Json(ApiResponse::success(Some(tags))))
}

/// Get tag by slug
#[utoipa::path(
    get,
    path = "/api/v1/tags/{slug}",
    params(
        ("slug" = String, Path, description = "Tag slug")
    ),
    responses(
        (status = 200, description = "Tag found", body = ApiResponse<TagResponseDto>),
        (status = 404, description = "Tag not found")
    ),
    tag = "tags"
)]
pub async fn get_tag(
    State(service): State<Arc<TagService>>,
    Path(slug): Path<String>,
) -> Result<Json<ApiResponse<TagResponseDto>>> {
    let tag = service.get_by_slug(&slug).await?;
    Ok(Json(ApiResponse::success(Some(tag))))
}
