pub mod categories;
pub mod components;
pub mod tags;
