//! Middleware del guard de roles
//!
//! Aplica `decide_path` a las rutas con regla (`/admin`, `/owner`, `/driver`,
//! `/account`). Las redirecciones salen como `303 See Other`.

use axum::{
    extract::{OriginalUri, Request},
    http::{header, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
};
use reqwest::Url;
use tracing::info;

use crate::services::access_guard::{decide_path, rule_for, GuardDecision};
use crate::services::navigation::LOGIN_PATH;
use crate::state::Session;

/// `/login?next=<ruta>` con la ruta codificada
pub fn login_redirect_location(next: &str) -> String {
    match Url::parse("http://portal.local/login") {
        Ok(mut url) => {
            url.query_pairs_mut().append_pair("next", next);
            format!("{}?{}", LOGIN_PATH, url.query().unwrap_or_default())
        }
        Err(_) => LOGIN_PATH.to_string(),
    }
}

fn see_other(location: &str) -> Response {
    (StatusCode::SEE_OTHER, [(header::LOCATION, location.to_string())]).into_response()
}

pub async fn role_guard(request: Request, next: Next) -> Response {
    let path = request
        .extensions()
        .get::<OriginalUri>()
        .map(|uri| uri.path().to_string())
        .unwrap_or_else(|| request.uri().path().to_string());

    if rule_for(&path).is_none() {
        return next.run(request).await;
    }

    let identity = request
        .extensions()
        .get::<Session>()
        .map(|session| session.identity.clone());

    match decide_path(identity.as_ref(), &path) {
        GuardDecision::Render => next.run(request).await,
        GuardDecision::RedirectToLogin => {
            info!("🚪 {} sin sesión, redirigiendo a login", path);
            see_other(&login_redirect_location(&path))
        }
        GuardDecision::RedirectTo(home) => {
            info!("⛔ {} no permitido para este rol, redirigiendo a {}", path, home);
            see_other(&home)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_login_location_encodes_next() {
        assert_eq!(
            login_redirect_location("/admin/orders"),
            "/login?next=%2Fadmin%2Forders"
        );
    }
}
