//! Sistema de manejo de errores
//!
//! Este módulo define los errores del portal y su conversión a respuestas HTTP.
//! Las funciones puras del núcleo (guard, proyección) no producen errores;
//! todo lo que falla aquí viene de la API externa, de formularios o de la sesión.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;
use tracing::{error, warn};

/// Errores principales de la aplicación
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Validation error: {0}")]
    Validation(#[from] validator::ValidationErrors),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Bad request: {0}")]
    BadRequest(String, Option<serde_json::Value>),

    #[error("External API error: {0}")]
    ExternalApi(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Internal server error: {0}")]
    Internal(String),
}

/// Respuesta de error para la API
#[derive(Debug, serde::Serialize)]
struct ErrorResponse {
    error: String,
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<serde_json::Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    code: Option<String>,
}

impl AppError {
    /// Código estable que viaja en el cuerpo de la respuesta
    pub fn code(&self) -> &'static str {
        match self {
            AppError::Validation(_) => "VALIDATION_ERROR",
            AppError::Unauthorized(_) => "UNAUTHORIZED",
            AppError::Forbidden(_) => "FORBIDDEN",
            AppError::NotFound(_) => "NOT_FOUND",
            AppError::BadRequest(..) => "BAD_REQUEST",
            AppError::ExternalApi(_) => "EXTERNAL_API_ERROR",
            AppError::Config(_) => "CONFIG_ERROR",
            AppError::Internal(_) => "INTERNAL_ERROR",
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Validation(_) | AppError::BadRequest(..) => StatusCode::BAD_REQUEST,
            AppError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            AppError::Forbidden(_) => StatusCode::FORBIDDEN,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::ExternalApi(_) => StatusCode::BAD_GATEWAY,
            AppError::Config(_) | AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let code = Some(self.code().to_string());

        let error_response = match self {
            AppError::Validation(e) => {
                warn!("⚠️ Error de validación: {}", e);
                ErrorResponse {
                    error: "Validation Error".to_string(),
                    message: "The provided data is invalid".to_string(),
                    details: Some(json!(e)),
                    code,
                }
            }

            AppError::Unauthorized(msg) => {
                warn!("🔒 Acceso no autorizado: {}", msg);
                ErrorResponse {
                    error: "Unauthorized".to_string(),
                    message: msg,
                    details: None,
                    code,
                }
            }

            AppError::Forbidden(msg) => {
                warn!("🚫 Acceso prohibido: {}", msg);
                ErrorResponse {
                    error: "Forbidden".to_string(),
                    message: msg,
                    details: None,
                    code,
                }
            }

            AppError::NotFound(msg) => {
                warn!("🔍 Recurso no encontrado: {}", msg);
                ErrorResponse {
                    error: "Not Found".to_string(),
                    message: msg,
                    details: None,
                    code,
                }
            }

            AppError::BadRequest(msg, details) => {
                warn!("⚠️ Solicitud incorrecta: {}", msg);
                ErrorResponse {
                    error: "Bad Request".to_string(),
                    message: msg,
                    details,
                    code,
                }
            }

            AppError::ExternalApi(msg) => {
                error!("❌ Error de la API externa: {}", msg);
                ErrorResponse {
                    error: "External API Error".to_string(),
                    message: "An error occurred while communicating with the transport API".to_string(),
                    details: Some(json!({ "external_api_error": msg })),
                    code,
                }
            }

            AppError::Config(msg) => {
                error!("❌ Error de configuración: {}", msg);
                ErrorResponse {
                    error: "Configuration Error".to_string(),
                    message: msg,
                    details: None,
                    code,
                }
            }

            AppError::Internal(msg) => {
                error!("❌ Error interno: {}", msg);
                ErrorResponse {
                    error: "Internal Server Error".to_string(),
                    message: "An unexpected error occurred".to_string(),
                    details: Some(json!({ "internal_error": msg })),
                    code,
                }
            }
        };

        (status, Json(error_response)).into_response()
    }
}

impl From<reqwest::Error> for AppError {
    fn from(e: reqwest::Error) -> Self {
        AppError::ExternalApi(e.to_string())
    }
}

/// Resultado tipado para operaciones que pueden fallar
pub type AppResult<T> = Result<T, AppError>;

/// Función helper para crear errores de validación de un solo campo
pub fn validation_error(field: &'static str, message: &'static str) -> AppError {
    use validator::ValidationError;

    let mut error = ValidationError::new("custom");
    error.message = Some(message.into());

    let mut errors = validator::ValidationErrors::new();
    errors.add(field, error);

    AppError::Validation(errors)
}

/// Función helper para crear errores de recurso no encontrado
pub fn not_found_error(resource: &str, id: &str) -> AppError {
    AppError::NotFound(format!("{} with id '{}' not found", resource, id))
}

/// Función helper para crear errores de solicitud incorrecta
pub fn bad_request_error(message: &str) -> AppError {
    AppError::BadRequest(message.to_string(), None)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        assert_eq!(AppError::Unauthorized("x".into()).status(), StatusCode::UNAUTHORIZED);
        assert_eq!(AppError::ExternalApi("x".into()).status(), StatusCode::BAD_GATEWAY);
        assert_eq!(not_found_error("Order", "7").status(), StatusCode::NOT_FOUND);
        assert_eq!(bad_request_error("x").code(), "BAD_REQUEST");
    }

    #[test]
    fn test_validation_error_helper() {
        let err = validation_error("amount", "Amount must be at least 1");
        match err {
            AppError::Validation(errors) => {
                assert!(errors.field_errors().contains_key("amount"));
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }
}
