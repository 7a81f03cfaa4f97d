//! Middleware del sistema
//!
//! Sesión, guard de roles y CORS.

pub mod auth;
pub mod cors;
pub mod guard;

pub use auth::session_middleware;
pub use cors::{cors_middleware, cors_middleware_with_origins};
pub use guard::role_guard;
