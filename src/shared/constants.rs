/// Default page size for component listing
pub const DEFAULT_PAGE_SIZE: i64 = 20;

/// Maximum page size allowed
pub const MAX_PAGE_SIZE: i64 = 100;

/// Header carrying the authenticated caller id, set by the fronting gateway
pub const CALLER_ID_HEADER: &str = "x-user-id";

/// API base path
pub const API_PREFIX: &str = "/api/v1";
