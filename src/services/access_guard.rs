//! Guard de acceso por rol
//!
//! Decide, para la identidad de la sesión y la ruta pedida, si se renderiza
//! o a dónde se redirige. Es una función pura: no toca red ni estado.

use serde::Serialize;

use crate::models::auth::{Identity, Role};
use crate::services::navigation::{home_path, LOGIN_PATH};

/// Resultado de la decisión del guard
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", content = "location", rename_all = "snake_case")]
pub enum GuardDecision {
    Render,
    RedirectToLogin,
    RedirectTo(String),
}

impl GuardDecision {
    pub fn is_render(&self) -> bool {
        matches!(self, GuardDecision::Render)
    }

    /// Ruta destino de la redirección, si la hay
    pub fn location(&self) -> Option<&str> {
        match self {
            GuardDecision::Render => None,
            GuardDecision::RedirectToLogin => Some(LOGIN_PATH),
            GuardDecision::RedirectTo(path) => Some(path),
        }
    }
}

/// Regla estática: prefijo de ruta -> roles permitidos (vacío = cualquier autenticado)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RouteAccessRule {
    pub prefix: &'static str,
    pub allowed_roles: &'static [Role],
}

impl RouteAccessRule {
    /// El prefijo cubre la ruta completa o un segmento hijo, nunca un prefijo parcial
    pub fn matches(&self, path: &str) -> bool {
        match path.strip_prefix(self.prefix) {
            Some(rest) => rest.is_empty() || rest.starts_with('/'),
            None => false,
        }
    }
}

/// Tabla de reglas del portal, fijada en tiempo de compilación
pub const ROUTE_RULES: &[RouteAccessRule] = &[
    RouteAccessRule { prefix: "/admin", allowed_roles: &[Role::Admin] },
    RouteAccessRule { prefix: "/owner", allowed_roles: &[Role::Owner] },
    RouteAccessRule { prefix: "/driver", allowed_roles: &[Role::Driver] },
    RouteAccessRule { prefix: "/account", allowed_roles: &[] },
];

/// Decisión del guard: autenticación primero, rol después
pub fn decide(identity: Option<&Identity>, allowed_roles: &[Role]) -> GuardDecision {
    let Some(identity) = identity else {
        return GuardDecision::RedirectToLogin;
    };

    if !allowed_roles.is_empty() && !allowed_roles.contains(&identity.role) {
        return GuardDecision::RedirectTo(home_path(&identity.role).to_string());
    }

    GuardDecision::Render
}

/// Regla aplicable a una ruta (el prefijo más largo gana)
pub fn rule_for(path: &str) -> Option<&'static RouteAccessRule> {
    ROUTE_RULES
        .iter()
        .filter(|rule| rule.matches(path))
        .max_by_key(|rule| rule.prefix.len())
}

/// Decisión para una ruta concreta; sin regla solo se exige autenticación
pub fn decide_path(identity: Option<&Identity>, path: &str) -> GuardDecision {
    let allowed = rule_for(path).map(|rule| rule.allowed_roles).unwrap_or(&[]);
    decide(identity, allowed)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn identity(role: Role) -> Identity {
        Identity {
            id: Some(1),
            email: "someone@fleet.in".to_string(),
            username: None,
            first_name: "Some".to_string(),
            last_name: "One".to_string(),
            phone: None,
            role,
        }
    }

    const KNOWN: [Role; 3] = [Role::Admin, Role::Owner, Role::Driver];

    #[test]
    fn test_permits_iff_member_or_empty() {
        let lists: [&[Role]; 5] = [
            &[],
            &[Role::Admin],
            &[Role::Owner, Role::Driver],
            &[Role::Driver],
            &[Role::Admin, Role::Owner, Role::Driver],
        ];

        for role in KNOWN.iter() {
            for list in lists.iter() {
                let decision = decide(Some(&identity(role.clone())), list);
                let expected = list.is_empty() || list.contains(role);
                assert_eq!(decision.is_render(), expected, "role {:?} list {:?}", role, list);
            }
        }
    }

    #[test]
    fn test_no_identity_always_goes_to_login() {
        assert_eq!(decide(None, &[]), GuardDecision::RedirectToLogin);
        assert_eq!(decide(None, &[Role::Admin]), GuardDecision::RedirectToLogin);
        assert_eq!(decide_path(None, "/account/me"), GuardDecision::RedirectToLogin);
    }

    #[test]
    fn test_wrong_role_goes_home_not_login() {
        let driver = identity(Role::Driver);
        assert_eq!(
            decide(Some(&driver), &[Role::Admin]),
            GuardDecision::RedirectTo("/driver/dashboard".to_string())
        );

        let owner = identity(Role::Owner);
        assert_eq!(
            decide_path(Some(&owner), "/driver/expenses"),
            GuardDecision::RedirectTo("/owner/dashboard".to_string())
        );
    }

    #[test]
    fn test_unknown_role_goes_to_landing() {
        let odd = identity(Role::Unknown("dispatcher".to_string()));
        let decision = decide(Some(&odd), &[Role::Admin]);
        assert_eq!(decision, GuardDecision::RedirectTo("/".to_string()));
        assert_eq!(decision.location(), Some("/"));

        // sin lista de roles basta con estar autenticado
        assert!(decide(Some(&odd), &[]).is_render());
    }

    #[test]
    fn test_rule_lookup_respects_segments() {
        assert_eq!(rule_for("/admin/orders/4").map(|r| r.prefix), Some("/admin"));
        assert_eq!(rule_for("/admin").map(|r| r.prefix), Some("/admin"));
        assert!(rule_for("/administrator").is_none());
        assert!(rule_for("/login").is_none());
    }

    #[test]
    fn test_driver_requesting_admin_path() {
        let driver = identity(Role::Driver);
        let decision = decide_path(Some(&driver), "/admin/users");
        assert_eq!(decision.location(), Some("/driver/dashboard"));
    }
}
