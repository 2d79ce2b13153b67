mod auth_service;

pub use auth_service::{hash_password, verify_password, AuthService};
