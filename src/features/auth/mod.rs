//! Authentication and authorization.
//!
//! Login mints an HS256 JWT; middleware verifies it and injects an
//! [`model::AuthenticatedUser`] into request extensions. Capability guards
//! ([`guards`]) apply the role policy ([`policy`]) at handler boundaries.

mod jwt;

pub mod dtos;
pub mod guards;
pub mod handlers;
pub mod model;
pub mod policy;
pub mod routes;
pub mod services;

pub use jwt::JwtCodec;
pub use services::AuthService;
