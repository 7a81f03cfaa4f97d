use serde::Serialize;

use crate::models::auth::Role;
use crate::models::user::User;
use crate::services::lifecycle::{activity_display, StatusDisplay};
use crate::utils::format::{capitalize_first, format_date, initials, NOT_AVAILABLE};

#[derive(Debug, Clone, Serialize)]
pub struct UserRow {
    pub id: i64,
    pub full_name: String,
    pub initials: String,
    pub email: String,
    pub phone: String,
    pub role: Role,
    pub role_label: String,
    pub activity: StatusDisplay,
    pub license_expiry: String,
    pub detail_path: String,
}

impl From<&User> for UserRow {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            full_name: user.full_name(),
            initials: initials(&user.first_name, &user.last_name),
            email: user.email.clone(),
            phone: user.phone.clone().unwrap_or_else(|| NOT_AVAILABLE.to_string()),
            role: user.role.clone(),
            role_label: capitalize_first(user.role.as_str()),
            activity: activity_display(user.is_active),
            license_expiry: format_date(user.license_expiry.as_ref()),
            detail_path: format!("/admin/users/{}", user.id),
        }
    }
}
