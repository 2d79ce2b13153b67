//! Inventory item tracking.
//!
//! The core feature: item CRUD with filtered search and pagination, plus a
//! streamed CSV export of the same filtered view. Query construction is
//! kept pure in [`query`] so the SQL is testable without a database.

pub mod dtos;
pub mod handlers;
pub mod models;
pub mod query;
pub mod routes;
pub mod services;

pub use routes::InventoryState;
pub use services::{ExportService, InventoryService};
