mod component;
mod moderation;

pub use component::{ComponentRow, ComponentTag, ModerationState, NewComponent};
pub use moderation::{ApprovalStatus, ComponentStatus};
