pub mod actor;
pub mod grid;
pub mod path;
