//! Portal de transporte
//!
//! Servidor axum que hace de frontend de la API REST de transporte:
//! sesiones, guard de roles por subárbol y proyección de órdenes a vistas.

pub mod client;
pub mod config;
pub mod controllers;
pub mod dto;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
pub mod state;
pub mod utils;

pub use routes::create_app_router;
pub use state::AppState;
