//! DTOs del portal
//!
//! View models que los controllers devuelven como JSON: los modelos de la API
//! ya proyectados (etiquetas, colores, importes formateados, enlaces).

pub mod api_response;
pub mod auth_dto;
pub mod dashboard_dto;
pub mod finance_dto;
pub mod order_dto;
pub mod truck_dto;
pub mod user_dto;

pub use api_response::ApiResponse;
