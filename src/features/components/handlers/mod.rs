mod component_handler;

pub use component_handler::*;
