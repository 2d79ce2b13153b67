//! Item type catalog.
//!
//! Admin-managed lookup table for the kinds of equipment tracked in the
//! inventory. Deletion is refused while inventory items still reference a
//! type.

pub mod dtos;
pub mod handlers;
pub mod models;
pub mod routes;
pub mod services;

pub use services::ItemTypeService;
