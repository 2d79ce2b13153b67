//! Location catalog.
//!
//! Admin-managed lookup table for where equipment lives (rooms, floors,
//! storage). Deletion is refused while inventory items still reference a
//! location.

pub mod dtos;
pub mod handlers;
pub mod models;
pub mod routes;
pub mod services;

pub use services::LocationService;
