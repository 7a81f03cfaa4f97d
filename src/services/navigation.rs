//! Navegación por rol
//!
//! Dashboards canónicos, menú lateral y título del portal para cada rol.

use serde::Serialize;

use crate::models::auth::Role;

pub const LOGIN_PATH: &str = "/login";
pub const LANDING_PATH: &str = "/";

/// Dashboard canónico del rol; un rol desconocido vuelve a la landing
pub fn home_path(role: &Role) -> &'static str {
    match role {
        Role::Admin => "/admin/dashboard",
        Role::Owner => "/owner/dashboard",
        Role::Driver => "/driver/dashboard",
        Role::Unknown(_) => LANDING_PATH,
    }
}

/// Entrada del menú lateral
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MenuItem {
    pub text: &'static str,
    pub icon: &'static str,
    pub path: &'static str,
}

const fn item(text: &'static str, icon: &'static str, path: &'static str) -> MenuItem {
    MenuItem { text, icon, path }
}

const ADMIN_MENU: &[MenuItem] = &[
    item("Dashboard", "dashboard", "/admin/dashboard"),
    item("Users", "people", "/admin/users"),
    item("Trucks", "directions_car", "/admin/trucks"),
    item("Orders", "assignment", "/admin/orders"),
    item("Expenses", "receipt", "/admin/expenses"),
    item("Transfers", "payment", "/admin/transfers"),
];

const OWNER_MENU: &[MenuItem] = &[
    item("Dashboard", "dashboard", "/owner/dashboard"),
    item("Trucks", "directions_car", "/owner/trucks"),
    item("Orders", "assignment", "/owner/orders"),
];

const DRIVER_MENU: &[MenuItem] = &[
    item("Dashboard", "dashboard", "/driver/dashboard"),
    item("Orders", "assignment", "/driver/orders"),
    item("Expenses", "receipt", "/driver/expenses"),
    item("Transfers", "payment", "/driver/transfers"),
];

pub fn menu_for(role: &Role) -> &'static [MenuItem] {
    match role {
        Role::Admin => ADMIN_MENU,
        Role::Owner => OWNER_MENU,
        Role::Driver => DRIVER_MENU,
        Role::Unknown(_) => &[],
    }
}

pub fn portal_title(role: &Role) -> &'static str {
    match role {
        Role::Admin => "Administration",
        Role::Owner => "Owner Portal",
        Role::Driver => "Driver Portal",
        Role::Unknown(_) => "Transport Portal",
    }
}

/// Prefijo del subárbol de un rol (`/admin`, ...), usado para enlaces de detalle
pub fn role_prefix(role: &Role) -> Option<&'static str> {
    match role {
        Role::Admin => Some("/admin"),
        Role::Owner => Some("/owner"),
        Role::Driver => Some("/driver"),
        Role::Unknown(_) => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::auth::Identity;
    use crate::services::access_guard::decide_path;

    #[test]
    fn test_home_paths() {
        assert_eq!(home_path(&Role::Admin), "/admin/dashboard");
        assert_eq!(home_path(&Role::Driver), "/driver/dashboard");
        assert_eq!(home_path(&Role::Unknown("x".into())), "/");
    }

    #[test]
    fn test_every_menu_entry_is_reachable_for_its_role() {
        for role in [Role::Admin, Role::Owner, Role::Driver] {
            let identity = Identity {
                id: Some(1),
                email: "menu@fleet.in".to_string(),
                username: None,
                first_name: String::new(),
                last_name: String::new(),
                phone: None,
                role: role.clone(),
            };
            for entry in menu_for(&role) {
                assert!(
                    decide_path(Some(&identity), entry.path).is_render(),
                    "{} blocked for {:?}",
                    entry.path,
                    role
                );
            }
        }
    }

    #[test]
    fn test_menu_sizes_and_titles() {
        assert_eq!(menu_for(&Role::Admin).len(), 6);
        assert_eq!(menu_for(&Role::Owner).len(), 3);
        assert_eq!(menu_for(&Role::Driver).len(), 4);
        assert!(menu_for(&Role::Unknown("x".into())).is_empty());
        assert_eq!(portal_title(&Role::Owner), "Owner Portal");
        assert_eq!(role_prefix(&Role::Driver), Some("/driver"));
    }
}
