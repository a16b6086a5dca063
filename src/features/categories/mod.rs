//! Component categories.
//!
//! | Method | Endpoint | Caller | Description |
//! |--------|----------|--------|-------------|
//! | POST | `/api/v1/categories` | Yes | Create category |
//! | GET | `/api/v1/categories` | No | List categories (name ascending) |
//! | GET | `/api/v1/categories/{slug}` | No | Get category by slug |

pub mod dtos;
pub mod handlers;
pub mod models;
pub mod routes;
pub mod services;

pub use services::CategoryService;
