pub mod delete;
pub mod import;
pub mod list;
pub mod study;
pub mod theme;
