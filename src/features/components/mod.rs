//! UI component catalog with moderation.
//!
//! | Method | Endpoint | Caller | Description |
//! |--------|----------|--------|-------------|
//! | POST | `/api/v1/components` | Yes | Create component |
//! | GET | `/api/v1/components` | No | List with `tag`, `category`, `status`, `approval`, `q`, `page`, `limit` |
//! | GET | `/api/v1/components/{slug}` | No | Get component |
//! | PATCH | `/api/v1/components/{slug}` | Yes | Update name/description |
//! | DELETE | `/api/v1/components/{slug}` | Yes | Soft-delete |
//! | POST | `/api/v1/components/{slug}/tags` | Yes | Attach tag |
//! | PATCH | `/api/v1/components/{slug}/status` | Yes | Change status |
//! | PATCH | `/api/v1/components/{slug}/approval` | Yes | Change approval |
//!
//! Status moves draft -> published/archived, published -> draft/archived,
//! archived -> draft. Approval moves between pending and a decision, and a
//! decision has to be reopened before it can change.

pub mod dtos;
pub mod handlers;
pub mod models;
pub mod routes;
pub mod services;

pub use services::ComponentService;
