//! DTOs de sesión

use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use crate::models::auth::{Identity, Role};
use crate::services::navigation::{home_path, menu_for, portal_title, MenuItem};
use crate::state::Session;

/// Respuesta del login: token de sesión del portal y destino inicial
#[derive(Debug, Serialize)]
pub struct LoginView {
    pub session_token: Uuid,
    pub expires_at: DateTime<Utc>,
    pub redirect_to: String,
    pub identity: Identity,
}

/// Ruta interna del portal: empieza por `/`, sin `//` inicial y sin `\`
fn is_internal_path(path: &str) -> bool {
    path.starts_with('/') && !path.starts_with("//") && !path.contains('\\')
}

impl LoginView {
    /// `next` solo se respeta si es una ruta interna del portal
    pub fn new(session: &Session, next: Option<&str>) -> Self {
        let redirect_to = next
            .filter(|path| is_internal_path(path))
            .unwrap_or_else(|| home_path(&session.identity.role))
            .to_string();

        Self {
            session_token: session.id,
            expires_at: session.expires_at,
            redirect_to,
            identity: session.identity.clone(),
        }
    }
}

/// Cabecera del layout: quién soy, título y menú lateral
#[derive(Debug, Serialize)]
pub struct SessionView {
    pub identity: Identity,
    pub full_name: String,
    pub initials: String,
    pub role: Role,
    pub title: &'static str,
    pub home: &'static str,
    pub menu: &'static [MenuItem],
    pub expires_at: DateTime<Utc>,
}

impl From<&Session> for SessionView {
    fn from(session: &Session) -> Self {
        let identity = &session.identity;
        Self {
            full_name: identity.full_name(),
            initials: identity.initials(),
            role: identity.role.clone(),
            title: portal_title(&identity.role),
            home: home_path(&identity.role),
            menu: menu_for(&identity.role),
            expires_at: session.expires_at,
            identity: identity.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session(role: Role) -> Session {
        Session::new(
            "token".to_string(),
            None,
            Identity {
                id: Some(9),
                email: "owner@fleet.in".to_string(),
                username: None,
                first_name: "Meena".to_string(),
                last_name: "Shah".to_string(),
                phone: None,
                role,
            },
            60,
        )
    }

    #[test]
    fn test_login_redirect_prefers_safe_next() {
        let owner = session(Role::Owner);
        assert_eq!(LoginView::new(&owner, None).redirect_to, "/owner/dashboard");
        assert_eq!(
            LoginView::new(&owner, Some("/owner/orders/3")).redirect_to,
            "/owner/orders/3"
        );
        assert_eq!(
            LoginView::new(&owner, Some("//evil.example")).redirect_to,
            "/owner/dashboard"
        );
        assert_eq!(
            LoginView::new(&owner, Some("/\\evil.example")).redirect_to,
            "/owner/dashboard"
        );
        assert_eq!(
            LoginView::new(&owner, Some("https://evil.example")).redirect_to,
            "/owner/dashboard"
        );
    }

    #[test]
    fn test_session_view_layout() {
        let view = SessionView::from(&session(Role::Owner));
        assert_eq!(view.initials, "MS");
        assert_eq!(view.title, "Owner Portal");
        assert_eq!(view.menu.len(), 3);
    }
}
