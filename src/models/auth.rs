//! Modelos de autenticación
//!
//! Roles, identidad del usuario autenticado y los payloads de login/refresh
//! tal como los intercambia la API de transporte.

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::utils::format::initials;
use crate::utils::validation::validate_email;

/// Roles del sistema
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Role {
    Admin,
    Owner,
    Driver,
    /// Valor que llegó de la API fuera del conjunto conocido
    Unknown(String),
}

impl Role {
    pub fn as_str(&self) -> &str {
        match self {
            Role::Admin => "admin",
            Role::Owner => "owner",
            Role::Driver => "driver",
            Role::Unknown(raw) => raw,
        }
    }

    pub fn is_known(&self) -> bool {
        !matches!(self, Role::Unknown(_))
    }
}

impl From<&str> for Role {
    fn from(value: &str) -> Self {
        match value {
            "admin" => Role::Admin,
            "owner" => Role::Owner,
            "driver" => Role::Driver,
            other => Role::Unknown(other.to_string()),
        }
    }
}

impl From<String> for Role {
    fn from(value: String) -> Self {
        Role::from(value.as_str())
    }
}

impl From<Role> for String {
    fn from(role: Role) -> Self {
        role.as_str().to_string()
    }
}

/// Usuario autenticado (lo que el portal guarda en la sesión)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Identity {
    #[serde(default)]
    pub id: Option<i64>,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    #[serde(default)]
    pub phone: Option<String>,
    pub role: Role,
}

impl Identity {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name).trim().to_string()
    }

    pub fn initials(&self) -> String {
        initials(&self.first_name, &self.last_name)
    }
}

/// Request de login del formulario
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(custom = "validate_email")]
    pub email: String,

    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

/// Response de `/api/auth/login/`
#[derive(Debug, Clone, Deserialize)]
pub struct LoginResponse {
    pub access: String,
    #[serde(default)]
    pub refresh: Option<String>,
    #[serde(default)]
    pub user: Option<Identity>,
    /// Algunas versiones de la API solo devuelven el rol
    #[serde(default)]
    pub role: Option<Role>,
}

impl LoginResponse {
    /// Identidad de la respuesta; si no viene, una mínima con email y rol
    pub fn identity(&self, email: &str) -> Identity {
        match &self.user {
            Some(user) => user.clone(),
            None => Identity {
                id: None,
                email: email.to_string(),
                username: None,
                first_name: String::new(),
                last_name: String::new(),
                phone: None,
                role: self
                    .role
                    .clone()
                    .unwrap_or_else(|| Role::Unknown("user".to_string())),
            },
        }
    }
}

/// Response de `/api/auth/token/refresh/`
#[derive(Debug, Clone, Deserialize)]
pub struct RefreshResponse {
    pub access: String,
}

/// Cambio de contraseña del usuario autenticado
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[validate(schema(function = "validate_password_confirmation", skip_on_field_errors = false))]
pub struct ChangePasswordRequest {
    #[validate(length(min = 1, message = "Old password is required"))]
    pub old_password: String,

    #[validate(length(min = 8, message = "Password must be at least 8 characters"))]
    pub new_password: String,

    pub confirm_password: String,
}

fn validate_password_confirmation(
    request: &ChangePasswordRequest,
) -> Result<(), validator::ValidationError> {
    if request.new_password != request.confirm_password {
        let mut error = validator::ValidationError::new("confirm_password");
        error.message = Some("Passwords must match".into());
        return Err(error);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_roundtrip_and_unknown() {
        let role: Role = serde_json::from_str("\"driver\"").unwrap();
        assert_eq!(role, Role::Driver);

        let odd: Role = serde_json::from_str("\"dispatcher\"").unwrap();
        assert_eq!(odd, Role::Unknown("dispatcher".to_string()));
        assert!(!odd.is_known());
        assert_eq!(serde_json::to_string(&odd).unwrap(), "\"dispatcher\"");
    }

    #[test]
    fn test_identity_from_api_json() {
        let identity: Identity = serde_json::from_value(serde_json::json!({
            "id": 4,
            "email": "ravi@fleet.in",
            "first_name": "Ravi",
            "last_name": "Kumar",
            "role": "owner"
        }))
        .unwrap();

        assert_eq!(identity.role, Role::Owner);
        assert_eq!(identity.full_name(), "Ravi Kumar");
        assert_eq!(identity.initials(), "RK");
    }

    #[test]
    fn test_login_response_without_user() {
        let response: LoginResponse = serde_json::from_value(serde_json::json!({
            "access": "a.b.c",
            "refresh": "r.r.r"
        }))
        .unwrap();

        let identity = response.identity("x@fleet.in");
        assert_eq!(identity.email, "x@fleet.in");
        assert_eq!(identity.role, Role::Unknown("user".to_string()));
    }

    #[test]
    fn test_password_confirmation() {
        let request = ChangePasswordRequest {
            old_password: "old-secret".to_string(),
            new_password: "new-secret-1".to_string(),
            confirm_password: "new-secret-2".to_string(),
        };
        assert!(request.validate().is_err());

        let ok = ChangePasswordRequest {
            confirm_password: "new-secret-1".to_string(),
            ..request
        };
        assert!(ok.validate().is_ok());
    }
}
