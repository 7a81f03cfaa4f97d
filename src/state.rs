//! Shared application state
//!
//! Este módulo define el estado compartido de la aplicación que se pasa
//! a través del router de Axum: configuración, cliente de la API y sesiones.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::client::ApiClient;
use crate::config::environment::EnvironmentConfig;
use crate::models::auth::Identity;
use crate::utils::errors::AppError;
use crate::utils::jwt::read_access_claims;

/// Sesión de portal creada por el login
#[derive(Clone, Debug)]
pub struct Session {
    pub id: Uuid,
    pub access_token: String,
    pub refresh_token: Option<String>,
    pub identity: Identity,
    pub expires_at: DateTime<Utc>,
}

impl Session {
    /// La expiración sale del `exp` del token; si no se puede leer se usa el TTL
    pub fn new(
        access_token: String,
        refresh_token: Option<String>,
        identity: Identity,
        ttl_secs: i64,
    ) -> Self {
        let expires_at = read_access_claims(&access_token)
            .ok()
            .and_then(|claims| claims.expires_at())
            .unwrap_or_else(|| Utc::now() + Duration::seconds(ttl_secs));

        Self {
            id: Uuid::new_v4(),
            access_token,
            refresh_token,
            identity,
            expires_at,
        }
    }

    pub fn is_expired(&self) -> bool {
        Utc::now() > self.expires_at
    }
}

/// Almacén de sesiones en memoria
#[derive(Clone, Default)]
pub struct SessionStore {
    sessions: Arc<RwLock<HashMap<Uuid, Session>>>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Obtener una sesión viva; las expiradas se descartan al leerlas
    pub async fn get(&self, id: &Uuid) -> Option<Session> {
        let session = self.sessions.read().await.get(id).cloned();
        match session {
            Some(session) if session.is_expired() => {
                log::info!("⌛ Sesión {} expirada, eliminando", id);
                self.remove(id).await;
                None
            }
            Some(session) => Some(session),
            None => {
                log::debug!("🔍 Sesión {} no encontrada", id);
                None
            }
        }
    }

    pub async fn insert(&self, session: Session) -> Uuid {
        let id = session.id;
        let mut sessions = self.sessions.write().await;
        sessions.insert(id, session);
        log::info!("💾 Sesión {} almacenada. Sesiones activas: {}", id, sessions.len());
        id
    }

    /// Reemplaza los tokens tras un refresh
    pub async fn update_tokens(
        &self,
        id: &Uuid,
        access_token: String,
        refresh_token: Option<String>,
    ) -> Result<Session, AppError> {
        let mut sessions = self.sessions.write().await;
        let session = sessions
            .get_mut(id)
            .ok_or_else(|| AppError::Unauthorized("Session not found".to_string()))?;

        if let Some(expires_at) = read_access_claims(&access_token)
            .ok()
            .and_then(|claims| claims.expires_at())
        {
            session.expires_at = expires_at;
        }
        session.access_token = access_token;
        if refresh_token.is_some() {
            session.refresh_token = refresh_token;
        }

        log::info!("🔄 Tokens de la sesión {} actualizados", id);
        Ok(session.clone())
    }

    pub async fn update_identity(&self, id: &Uuid, identity: Identity) {
        if let Some(session) = self.sessions.write().await.get_mut(id) {
            session.identity = identity;
        }
    }

    pub async fn remove(&self, id: &Uuid) -> Option<Session> {
        let removed = self.sessions.write().await.remove(id);
        if removed.is_some() {
            log::info!("🗑️ Sesión {} eliminada", id);
        }
        removed
    }

    /// Limpiar sesiones expiradas; devuelve cuántas se eliminaron
    pub async fn cleanup_expired(&self) -> usize {
        let mut sessions = self.sessions.write().await;
        let before = sessions.len();
        sessions.retain(|_, session| !session.is_expired());
        before - sessions.len()
    }

    pub async fn len(&self) -> usize {
        self.sessions.read().await.len()
    }
}

#[derive(Clone)]
pub struct AppState {
    pub config: EnvironmentConfig,
    pub api: ApiClient,
    pub sessions: SessionStore,
}

impl AppState {
    pub fn new(config: EnvironmentConfig) -> Result<Self, AppError> {
        let api = ApiClient::new(&config.api_base_url, config.api_timeout_secs)?;
        Ok(Self {
            config,
            api,
            sessions: SessionStore::new(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::auth::Role;

    fn identity() -> Identity {
        Identity {
            id: Some(4),
            email: "driver@fleet.in".to_string(),
            username: None,
            first_name: "Ravi".to_string(),
            last_name: "Kumar".to_string(),
            phone: None,
            role: Role::Driver,
        }
    }

    #[tokio::test]
    async fn test_session_roundtrip_and_logout() {
        let store = SessionStore::new();
        let session = Session::new("not-a-jwt".to_string(), None, identity(), 60);
        let id = store.insert(session).await;

        let found = store.get(&id).await.unwrap();
        assert_eq!(found.identity.role, Role::Driver);

        store.remove(&id).await;
        assert!(store.get(&id).await.is_none());
    }

    #[tokio::test]
    async fn test_expired_sessions_are_purged() {
        let store = SessionStore::new();
        let mut session = Session::new("not-a-jwt".to_string(), None, identity(), 60);
        session.expires_at = Utc::now() - Duration::seconds(5);
        let expired = store.insert(session).await;
        store
            .insert(Session::new("other".to_string(), None, identity(), 60))
            .await;

        assert_eq!(store.cleanup_expired().await, 1);
        assert_eq!(store.len().await, 1);
        assert!(store.get(&expired).await.is_none());
    }

    #[tokio::test]
    async fn test_update_tokens_requires_session() {
        let store = SessionStore::new();
        let result = store.update_tokens(&Uuid::new_v4(), "x".to_string(), None).await;
        assert!(matches!(result, Err(AppError::Unauthorized(_))));
    }
}
