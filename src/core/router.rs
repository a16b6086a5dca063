use std::sync::Arc;

use axum::{routing::get, Json, Router};
use serde::Serialize;
use sqlx::PgPool;

use crate::features::categories::{routes as categories_routes, CategoryService};
use crate::features::components::{routes as components_routes, ComponentService};
use crate::features::tags::{routes as tags_routes, TagService};
use crate::shared::constants::API_PREFIX;
use crate::shared::types::ApiResponse;

#[derive(Debug, Serialize)]
struct Health {
    status: &'static str,
}

async fn health_check() -> Json<ApiResponse<Health>> {
    Json(ApiResponse::success(Some(Health { status: "ok" })))
}

/// Versioned API routes, with every service sharing `pool`
pub fn api_router(pool: PgPool) -> Router {
    let category_service = Arc::new(CategoryService::new(pool.clone()));
    let tag_service = Arc::new(TagService::new(pool.clone()));
    let component_service = Arc::new(ComponentService::new(pool));
    tracing::info!("Catalog services initialized");

    let api = Router::new()
        .route("/health", get(health_check))
        .merge(components_routes::routes(
            component_service,
            Arc::clone(&category_service),
        ))
        .merge(categories_routes::routes(category_service))
        .merge(tags_routes::routes(tag_service));

    Router::new().nest(API_PREFIX, api)
}

#[cfg(test)]
mod tests {
    use axum::http::{HeaderName, HeaderValue, StatusCode};
    use axum_test::TestServer;
    use serde_json::{json, Value};
    use sqlx::postgres::PgPoolOptions;
    use uuid::Uuid;

    use super::*;

    // Requests below are rejected before any query runs, so the pool never connects
    fn server() -> TestServer {
        let pool = PgPoolOptions::new()
            .connect_lazy("postgres://catalog@localhost/unused")
            .unwrap();
        TestServer::new(api_router(pool)).unwrap()
    }

    fn caller_header() -> (HeaderName, HeaderValue) {
        (
            HeaderName::from_static("x-user-id"),
            HeaderValue::from_str(&Uuid::new_v4().to_string()).unwrap(),
        )
    }

    fn valid_component() -> Value {
        json!({
            "name": "Button",
            "category_id": Uuid::new_v4(),
            "code_jsx": "<button />",
        })
    }

    fn assert_error(response: axum_test::TestResponse, status: StatusCode, kind: &str) {
        assert_eq!(response.status_code(), status);
        let body: Value = response.json();
        assert_eq!(body["success"], false);
        assert_eq!(body["error_kind"], kind);
        assert!(body["data"].is_null());
        assert!(body["error"].is_string());
    }

    #[tokio::test]
    async fn health_returns_envelope() {
        let response = server().get("/api/v1/health").await;
        assert_eq!(response.status_code(), StatusCode::OK);
        let body: Value = response.json();
        assert_eq!(body["success"], true);
        assert_eq!(body["data"]["status"], "ok");
    }

    #[tokio::test]
    async fn writes_require_caller() {
        let server = server();

        let response = server
            .post("/api/v1/components")
            .json(&valid_component())
            .await;
        assert_error(response, StatusCode::UNAUTHORIZED, "unauthorized");

        let response = server
            .delete("/api/v1/components/button")
            .add_header(
                HeaderName::from_static("x-user-id"),
                HeaderValue::from_static("not-a-uuid"),
            )
            .await;
        assert_error(response, StatusCode::UNAUTHORIZED, "unauthorized");

        let response = server
            .post("/api/v1/categories")
            .json(&json!({"name": "Forms"}))
            .await;
        assert_error(response, StatusCode::UNAUTHORIZED, "unauthorized");
    }

    #[tokio::test]
    async fn create_rejects_missing_and_blank_fields() {
        let server = server();
        let (name, value) = caller_header();

        let response = server
            .post("/api/v1/components")
            .add_header(name.clone(), value.clone())
            .json(&json!({"name": "Button", "category_id": Uuid::new_v4()}))
            .await;
        assert_error(response, StatusCode::BAD_REQUEST, "bad_request");

        let mut blank = valid_component();
        blank["name"] = json!("   ");
        let response = server
            .post("/api/v1/components")
            .add_header(name.clone(), value.clone())
            .json(&blank)
            .await;
        assert_error(response, StatusCode::BAD_REQUEST, "validation");

        let response = server
            .post("/api/v1/tags")
            .add_header(name, value)
            .json(&json!({"name": ""}))
            .await;
        assert_error(response, StatusCode::BAD_REQUEST, "validation");
    }

    #[tokio::test]
    async fn list_rejects_invalid_query() {
        let server = server();

        for query in [
            "page=abc",
            "limit=xyz",
            "page=0",
            "limit=0",
            "page=-3",
            "status=deleted",
            "approval=maybe",
        ] {
            let response = server.get(&format!("/api/v1/components?{query}")).await;
            assert_error(response, StatusCode::BAD_REQUEST, "validation");
        }
    }

    #[tokio::test]
    async fn moderation_rejects_unknown_values() {
        let server = server();
        let (name, value) = caller_header();

        let response = server
            .patch("/api/v1/components/button/status")
            .add_header(name.clone(), value.clone())
            .json(&json!({"status": "deleted"}))
            .await;
        assert_error(response, StatusCode::BAD_REQUEST, "bad_request");

        let response = server
            .patch("/api/v1/components/button/approval")
            .add_header(name, value)
            .json(&json!({"approval_status": "maybe"}))
            .await;
        assert_error(response, StatusCode::BAD_REQUEST, "bad_request");
    }

    #[tokio::test]
    async fn nul_characters_are_validation_errors() {
        let server = server();
        let (name, value) = caller_header();

        let mut component = valid_component();
        component["name"] = json!("a\u{0}b");
        let response = server
            .post("/api/v1/components")
            .add_header(name.clone(), value.clone())
            .json(&component)
            .await;
        assert_error(response, StatusCode::BAD_REQUEST, "validation");

        let response = server
            .post("/api/v1/categories")
            .add_header(name.clone(), value.clone())
            .json(&json!({"name": "UI\u{0}Kit"}))
            .await;
        assert_error(response, StatusCode::BAD_REQUEST, "validation");

        let response = server
            .post("/api/v1/tags")
            .add_header(name, value)
            .json(&json!({"name": "Re\u{0}act"}))
            .await;
        assert_error(response, StatusCode::BAD_REQUEST, "validation");

        for query in ["q=%00", "category=ui%00kit", "tag=react,%00"] {
            let response = server.get(&format!("/api/v1/components?{query}")).await;
            assert_error(response, StatusCode::BAD_REQUEST, "validation");
        }
    }

    #[sqlx::test(migrator = "crate::core::database::MIGRATOR")]
    #[ignore = "requires a Postgres DATABASE_URL"]
    async fn catalog_flow_over_http(pool: PgPool) {
        crate::core::seeder::seed(&pool).await;
        let server = TestServer::new(api_router(pool)).unwrap();
        let (name, value) = caller_header();

        let response = server.get("/api/v1/categories/ui-kit").await;
        assert_eq!(response.status_code(), StatusCode::OK);
        let body: Value = response.json();
        let category_id = body["data"]["id"].clone();

        let response = server
            .post("/api/v1/components")
            .add_header(name.clone(), value.clone())
            .json(&json!({
                "name": "Modal Dialog",
                "category_id": category_id,
                "code_jsx": "<dialog open />",
            }))
            .await;
        assert_eq!(response.status_code(), StatusCode::CREATED);
        let body: Value = response.json();
        assert_eq!(body["success"], true);
        assert!(body["error"].is_null());
        assert_eq!(body["data"]["slug"], "modal-dialog");
        assert_eq!(body["data"]["category"]["slug"], "ui-kit");

        let response = server.get("/api/v1/components?category=nope").await;
        assert_error(response, StatusCode::NOT_FOUND, "not_found");

        let response = server
            .patch("/api/v1/components/card")
            .add_header(name.clone(), value.clone())
            .json(&json!({"name": "Button"}))
            .await;
        assert_error(response, StatusCode::CONFLICT, "conflict");

        let response = server
            .delete("/api/v1/components/modal-dialog")
            .add_header(name, value)
            .await;
        assert_eq!(response.status_code(), StatusCode::OK);
        let body: Value = response.json();
        assert_eq!(body["success"], true);
        assert!(body["data"].is_null());

        let response = server.get("/api/v1/components/modal-dialog").await;
        assert_error(response, StatusCode::NOT_FOUND, "not_found");
    }
}
