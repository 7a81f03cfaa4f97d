//! Configuración de variables de entorno
//!
//! Este módulo carga la configuración del portal desde el entorno
//! (con `.env` ya aplicado por `dotenvy` en `main`).

use std::env;
use std::str::FromStr;

use crate::utils::errors::AppError;

/// Configuración del entorno
#[derive(Debug, Clone)]
pub struct EnvironmentConfig {
    pub environment: String,
    pub host: String,
    pub port: u16,
    /// Base de la API REST de transporte, sin barra final
    pub api_base_url: String,
    pub api_timeout_secs: u64,
    pub cors_origins: Vec<String>,
    /// Vida máxima de una sesión cuando el token no trae `exp`
    pub session_ttl_secs: i64,
    pub log_level: String,
}

impl Default for EnvironmentConfig {
    fn default() -> Self {
        Self {
            environment: "development".to_string(),
            host: "0.0.0.0".to_string(),
            port: 3000,
            api_base_url: "http://127.0.0.1:8000".to_string(),
            api_timeout_secs: 30,
            cors_origins: Vec::new(),
            session_ttl_secs: 8 * 3600,
            log_level: "info".to_string(),
        }
    }
}

impl EnvironmentConfig {
    /// Cargar desde variables de entorno; las ausentes toman el valor por defecto
    pub fn from_env() -> Result<Self, AppError> {
        let defaults = Self::default();

        Ok(Self {
            environment: env::var("ENVIRONMENT").unwrap_or(defaults.environment),
            host: env::var("HOST").unwrap_or(defaults.host),
            port: parse_var("PORT", defaults.port)?,
            api_base_url: env::var("API_BASE_URL")
                .map(|url| url.trim_end_matches('/').to_string())
                .unwrap_or(defaults.api_base_url),
            api_timeout_secs: parse_var("API_TIMEOUT_SECS", defaults.api_timeout_secs)?,
            cors_origins: env::var("CORS_ORIGINS")
                .map(|origins| {
                    origins
                        .split(',')
                        .map(|s| s.trim().to_string())
                        .filter(|s| !s.is_empty())
                        .collect()
                })
                .unwrap_or(defaults.cors_origins),
            session_ttl_secs: parse_var("SESSION_TTL_SECS", defaults.session_ttl_secs)?,
            log_level: env::var("LOG_LEVEL").unwrap_or(defaults.log_level),
        })
    }

    /// Verificar si estamos en modo desarrollo
    pub fn is_development(&self) -> bool {
        self.environment == "development"
    }

    /// Verificar si estamos en modo producción
    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }

    /// Obtener la URL del servidor
    pub fn server_url(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    pub fn tracing_level(&self) -> tracing::Level {
        tracing::Level::from_str(&self.log_level).unwrap_or(tracing::Level::INFO)
    }
}

fn parse_var<T: FromStr>(key: &str, default: T) -> Result<T, AppError> {
    match env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse()
            .map_err(|_| AppError::Config(format!("{} must be a valid number, got '{}'", key, raw))),
        Err(_) => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = EnvironmentConfig::default();
        assert!(config.is_development());
        assert!(!config.is_production());
        assert_eq!(config.server_url(), "0.0.0.0:3000");
        assert_eq!(config.tracing_level(), tracing::Level::INFO);
    }

    #[test]
    fn test_parse_var_rejects_garbage() {
        env::set_var("TRANSPORT_PORTAL_TEST_PORT", "not-a-port");
        let parsed: Result<u16, _> = parse_var("TRANSPORT_PORTAL_TEST_PORT", 1);
        assert!(parsed.is_err());
        env::remove_var("TRANSPORT_PORTAL_TEST_PORT");

        let fallback: u16 = parse_var("TRANSPORT_PORTAL_TEST_MISSING", 7).unwrap();
        assert_eq!(fallback, 7);
    }
}
