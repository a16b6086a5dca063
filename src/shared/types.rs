use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::core::error::{AppError, Result};
use crate::shared::constants::{DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE};

/// Uniform response envelope
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub data: Option<T>,
    pub error: Option<String>,
    /// Machine-readable error category (`validation`, `not_found`, `conflict`, ...)
    pub error_kind: Option<String>,
}

impl<T> ApiResponse<T> {
    pub fn success(data: Option<T>) -> Self {
        Self {
            success: true,
            data,
            error: None,
            error_kind: None,
        }
    }

    pub fn error(kind: &str, message: String) -> ApiResponse<()> {
        ApiResponse {
            success: false,
            data: None,
            error: Some(message),
            error_kind: Some(kind.to_string()),
        }
    }
}

// =============================================================================
// PAGINATION
// =============================================================================

/// Validated page window, built from optional `page`/`limit` query values
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    pub page: i64,
    pub limit: i64,
}

impl Default for Pagination {
    fn default() -> Self {
        Self {
            page: 1,
            limit: DEFAULT_PAGE_SIZE,
        }
    }
}

impl Pagination {
    /// Rejects `page < 1` and `limit < 1`; clamps `limit` to MAX_PAGE_SIZE
    pub fn from_query(page: Option<i64>, limit: Option<i64>) -> Result<Self> {
        let page = page.unwrap_or(1);
        let limit = limit.unwrap_or(DEFAULT_PAGE_SIZE);

        if page < 1 {
            return Err(AppError::Validation(
                "page must be a positive integer".to_string(),
            ));
        }
        if limit < 1 {
            return Err(AppError::Validation(
                "limit must be a positive integer".to_string(),
            ));
        }

        Ok(Self {
            page,
            limit: limit.min(MAX_PAGE_SIZE),
        })
    }

    /// Calculate SQL OFFSET from page number
    pub fn offset(&self) -> i64 {
        (self.page - 1).saturating_mul(self.limit)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pagination_defaults() {
        let p = Pagination::from_query(None, None).unwrap();
        assert_eq!(p, Pagination::default());
        assert_eq!(p.limit, 20);
        assert_eq!(p.offset(), 0);
    }

    #[test]
    fn test_pagination_offset() {
        let p = Pagination::from_query(Some(3), Some(2)).unwrap();
        assert_eq!(p.offset(), 4);
    }

    #[test]
    fn test_pagination_clamps_limit() {
        let p = Pagination::from_query(Some(1), Some(5_000)).unwrap();
        assert_eq!(p.limit, MAX_PAGE_SIZE);
    }

    #[test]
    fn test_pagination_rejects_non_positive_values() {
        assert!(matches!(
            Pagination::from_query(Some(0), None),
            Err(AppError::Validation(_))
        ));
        assert!(matches!(
            Pagination::from_query(None, Some(0)),
            Err(AppError::Validation(_))
        ));
        assert!(matches!(
            Pagination::from_query(Some(-4), Some(10)),
            Err(AppError::Validation(_))
        ));
    }

    #[test]
    fn test_success_envelope_shape() {
        let body = serde_json::to_value(ApiResponse::success(Some(vec![1, 2]))).unwrap();
        assert_eq!(
            body,
            serde_json::json!({
                "success": true,
                "data": [1, 2],
                "error": null,
                "error_kind": null,
            })
        );
    }

    #[test]
    fn test_error_envelope_shape() {
        let body =
            serde_json::to_value(ApiResponse::<()>::error("not_found", "gone".to_string()))
                .unwrap();
        assert_eq!(body["success"], false);
        assert_eq!(body["data"], serde_json::Value::Null);
        assert_eq!(body["error"], "gone");
        assert_eq!(body["error_kind"], "not_found");
    }
}
