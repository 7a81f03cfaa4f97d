//! Configuración del portal
//!
//! Variables de entorno y valores por defecto del sistema.

pub mod environment;

pub use environment::*;
