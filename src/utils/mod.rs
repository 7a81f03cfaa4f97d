//! Utilidades del sistema
//!
//! Manejo de errores, validación de formularios, formato de vistas
//! y lectura de tokens de la API.

pub mod errors;
pub mod format;
pub mod jwt;
pub mod validation;
