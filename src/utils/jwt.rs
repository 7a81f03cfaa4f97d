//! Lectura de los access tokens emitidos por la API de transporte
//!
//! El portal no conoce la clave de firma: solo lee `exp` (y `user_id` si viene)
//! para saber cuándo invalidar la sesión local. La API sigue validando la firma.

use chrono::{DateTime, TimeZone, Utc};
use jsonwebtoken::{decode, DecodingKey, Validation};
use serde::{Deserialize, Serialize};

use crate::utils::errors::AppError;

/// Claims relevantes del access token
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccessClaims {
    pub exp: i64,
    #[serde(default)]
    pub user_id: Option<serde_json::Value>,
    #[serde(default)]
    pub token_type: Option<String>,
}

impl AccessClaims {
    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        Utc.timestamp_opt(self.exp, 0).single()
    }
}

/// Decodificar claims sin verificar firma ni expiración
pub fn read_access_claims(token: &str) -> Result<AccessClaims, AppError> {
    validate_token_format(token)?;

    let mut validation = Validation::default();
    validation.insecure_disable_signature_validation();
    validation.validate_exp = false;
    validation.required_spec_claims.clear();

    decode::<AccessClaims>(token, &DecodingKey::from_secret(&[]), &validation)
        .map(|data| data.claims)
        .map_err(|e| AppError::Unauthorized(format!("Token inválido: {}", e)))
}

/// Validar formato de token (básico)
pub fn validate_token_format(token: &str) -> Result<(), AppError> {
    if token.is_empty() {
        return Err(AppError::Unauthorized("Token no puede estar vacío".to_string()));
    }

    if token.split('.').count() != 3 {
        return Err(AppError::Unauthorized(
            "Token debe tener 3 partes separadas por puntos".to_string(),
        ));
    }

    Ok(())
}

/// Extraer token del header Authorization
pub fn extract_bearer(auth_header: &str) -> Option<&str> {
    auth_header
        .strip_prefix("Bearer ")
        .map(str::trim)
        .filter(|token| !token.is_empty())
}
