mod component_query;
mod component_service;

pub use component_query::ComponentFilter;
pub use component_service::ComponentService;
