//! Services module
//!
//! Lógica del portal: el guard de acceso y la proyección del ciclo de vida
//! son funciones puras; autenticación y dashboards combinan la API con ellas.

pub mod access_guard;
pub mod auth_service;
pub mod dashboard;
pub mod lifecycle;
pub mod listing;
pub mod navigation;

pub use access_guard::{decide, decide_path, GuardDecision, RouteAccessRule, ROUTE_RULES};
pub use auth_service::AuthService;
pub use lifecycle::{DisplayStatus, StatusColor, StatusDisplay};
pub use listing::{ListQuery, Page};
