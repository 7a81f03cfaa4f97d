//! Middleware de sesión
//!
//! Resuelve el token de sesión del portal (`Authorization: Bearer <uuid>`)
//! y deja la `Session` en las extensiones de la request.

use axum::{
    extract::{Request, State},
    http::{header, StatusCode},
    middleware::Next,
    response::Response,
};
use tracing::{debug, info};
use uuid::Uuid;

use crate::state::AppState;
use crate::utils::jwt::extract_bearer;

/// Id de sesión a partir de la cabecera Authorization
pub fn session_id_from_header(value: Option<&str>) -> Option<Uuid> {
    value
        .and_then(extract_bearer)
        .and_then(|token| Uuid::parse_str(token).ok())
}

/// Inyecta la sesión si existe; si la API rechazó el token (401) la sesión se descarta
pub async fn session_middleware(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Response {
    let session_id = session_id_from_header(
        request
            .headers()
            .get(header::AUTHORIZATION)
            .and_then(|value| value.to_str().ok()),
    );

    let mut current = None;
    if let Some(id) = session_id {
        match state.sessions.get(&id).await {
            Some(session) => {
                debug!("👤 Sesión {} ({})", id, session.identity.email);
                request.extensions_mut().insert(session);
                current = Some(id);
            }
            None => debug!("🔍 Token de sesión sin sesión viva"),
        }
    }

    let response = next.run(request).await;

    if response.status() == StatusCode::UNAUTHORIZED {
        if let Some(id) = current {
            info!("🔒 La API rechazó el token, cerrando sesión {}", id);
            state.sessions.remove(&id).await;
        }
    }

    response
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_session_id_parsing() {
        let id = Uuid::new_v4();
        let header = format!("Bearer {}", id);
        assert_eq!(session_id_from_header(Some(&header)), Some(id));
        assert_eq!(session_id_from_header(Some("Bearer nope")), None);
        assert_eq!(session_id_from_header(Some(&id.to_string())), None);
        assert_eq!(session_id_from_header(None), None);
    }
}
