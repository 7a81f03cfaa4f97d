//! Modelo de User
//!
//! Usuarios administrados desde el panel de admin (admins, propietarios y
//! conductores) y los formularios de perfil.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

use crate::models::auth::{Identity, Role};
use crate::utils::validation::{validate_email, validate_not_expired, validate_phone};

fn default_active() -> bool {
    true
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
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
    #[serde(default = "default_active")]
    pub is_active: bool,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub driving_license: Option<String>,
    #[serde(default)]
    pub license_expiry: Option<NaiveDate>,
    #[serde(default)]
    pub date_joined: Option<DateTime<Utc>>,
}

impl User {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name).trim().to_string()
    }
}

impl From<User> for Identity {
    fn from(user: User) -> Self {
        Self {
            id: Some(user.id),
            email: user.email,
            username: user.username,
            first_name: user.first_name,
            last_name: user.last_name,
            phone: user.phone,
            role: user.role,
        }
    }
}

/// Formulario de alta/edición de usuario
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[validate(schema(function = "validate_user_form", skip_on_field_errors = false))]
pub struct UserForm {
    #[validate(custom = "validate_email")]
    pub email: String,
    #[validate(length(min = 3, max = 50, message = "Username must be between 3 and 50 characters"))]
    pub username: String,
    #[validate(length(min = 1, message = "First name is required"))]
    pub first_name: String,
    #[validate(length(min = 1, message = "Last name is required"))]
    pub last_name: String,
    #[validate(custom = "validate_phone")]
    pub phone: String,
    pub role: Role,

    /// Obligatoria al crear; opcional al editar
    #[serde(default)]
    pub password: Option<String>,
    #[serde(default, skip_serializing)]
    pub confirm_password: Option<String>,

    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub driving_license: Option<String>,
    #[serde(default)]
    #[validate(custom = "validate_not_expired")]
    pub license_expiry: Option<NaiveDate>,

    /// Marcado por el controller según la ruta (new / edit)
    #[serde(default, skip_serializing)]
    pub is_edit: bool,
}

fn field_error(code: &'static str, message: &'static str) -> ValidationError {
    let mut error = ValidationError::new(code);
    error.message = Some(message.into());
    error
}

fn validate_user_form(form: &UserForm) -> Result<(), ValidationError> {
    if !form.role.is_known() {
        return Err(field_error("role", "Please select a valid role"));
    }

    let password = form.password.as_deref().unwrap_or("");
    if !form.is_edit && password.chars().count() < 8 {
        return Err(field_error("password", "Password must be at least 8 characters"));
    }
    if !password.is_empty() {
        if form.is_edit && password.chars().count() < 8 {
            return Err(field_error("password", "Password must be at least 8 characters"));
        }
        if form.confirm_password.as_deref() != Some(password) {
            return Err(field_error("confirm_password", "Passwords must match"));
        }
    }

    let license = form.driving_license.as_deref().unwrap_or("").trim();
    if form.role == Role::Driver && license.is_empty() {
        return Err(field_error(
            "driving_license",
            "Driving license is required for drivers",
        ));
    }
    if !license.is_empty() && form.license_expiry.is_none() {
        return Err(field_error(
            "license_expiry",
            "License expiry date is required",
        ));
    }

    Ok(())
}

/// Actualización del perfil propio
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ProfileForm {
    #[validate(length(min = 1, message = "First name is required"))]
    pub first_name: String,
    #[validate(length(min = 1, message = "Last name is required"))]
    pub last_name: String,
    #[validate(custom = "validate_phone")]
    pub phone: String,
    #[serde(default)]
    pub address: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn driver_form() -> UserForm {
        UserForm {
            email: "suresh@fleet.in".to_string(),
            username: "suresh".to_string(),
            first_name: "Suresh".to_string(),
            last_name: "Patil".to_string(),
            phone: "9123456780".to_string(),
            role: Role::Driver,
            password: Some("road-king-42".to_string()),
            confirm_password: Some("road-king-42".to_string()),
            address: None,
            driving_license: Some("MH1420110012345".to_string()),
            license_expiry: Some(Utc::now().date_naive() + chrono::Duration::days(400)),
            is_edit: false,
        }
    }

    #[test]
    fn test_driver_needs_license() {
        assert!(driver_form().validate().is_ok());

        let no_license = UserForm {
            driving_license: None,
            license_expiry: None,
            ..driver_form()
        };
        assert!(no_license.validate().is_err());
    }

    #[test]
    fn test_password_rules_on_create_and_edit() {
        let short = UserForm {
            password: Some("short".to_string()),
            confirm_password: Some("short".to_string()),
            ..driver_form()
        };
        assert!(short.validate().is_err());

        let edit_without_password = UserForm {
            password: None,
            confirm_password: None,
            is_edit: true,
            ..driver_form()
        };
        assert!(edit_without_password.validate().is_ok());

        let mismatch = UserForm {
            confirm_password: Some("other-pass-1".to_string()),
            ..driver_form()
        };
        assert!(mismatch.validate().is_err());
    }

    #[test]
    fn test_unknown_role_rejected() {
        let form = UserForm {
            role: Role::Unknown("superuser".to_string()),
            ..driver_form()
        };
        assert!(form.validate().is_err());
    }
}
