//! Shared data models.

pub mod listing;
pub mod menu;

pub use listing::{DatabaseList, ListDatabaseResponse, ListTableResponse, ListTablesPath, TableList};
pub use menu::MenuItem;
