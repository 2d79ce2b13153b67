pub mod auth;
pub mod inventory;
pub mod item_types;
pub mod locations;
