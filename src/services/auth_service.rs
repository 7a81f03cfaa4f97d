//! Servicio de autenticación
//!
//! Login, logout y refresh contra la API; las sesiones viven en el `SessionStore`.

use tracing::{info, warn};
use validator::Validate;

use crate::client::ApiClient;
use crate::models::auth::{ChangePasswordRequest, Identity, LoginRequest};
use crate::models::user::ProfileForm;
use crate::state::{AppState, Session, SessionStore};
use crate::utils::errors::{AppError, AppResult};

pub struct AuthService {
    api: ApiClient,
    sessions: SessionStore,
    session_ttl_secs: i64,
}

impl AuthService {
    pub fn from_state(state: &AppState) -> Self {
        Self {
            api: state.api.clone(),
            sessions: state.sessions.clone(),
            session_ttl_secs: state.config.session_ttl_secs,
        }
    }

    /// Valida el formulario, autentica contra la API y abre una sesión
    pub async fn login(&self, request: LoginRequest) -> AppResult<Session> {
        request.validate()?;

        info!("🔐 Login para {}", request.email);
        let response = self.api.login(&request).await?;
        let identity = response.identity(&request.email);

        if !identity.role.is_known() {
            warn!("⚠️ Rol desconocido '{}' para {}", identity.role.as_str(), identity.email);
        }

        let session = Session::new(
            response.access,
            response.refresh,
            identity,
            self.session_ttl_secs,
        );
        self.sessions.insert(session.clone()).await;

        info!("✅ Sesión abierta para {} ({})", session.identity.email, session.identity.role.as_str());
        Ok(session)
    }

    /// Cierra la sesión local aunque la API falle
    pub async fn logout(&self, session: &Session) {
        if let Err(e) = self
            .api
            .logout(&session.access_token, session.refresh_token.as_deref())
            .await
        {
            warn!("⚠️ Logout en la API falló: {}", e);
        }
        self.sessions.remove(&session.id).await;
        info!("👋 Sesión cerrada para {}", session.identity.email);
    }

    /// Pide un access token nuevo; sin refresh token la sesión se descarta
    pub async fn refresh(&self, session: &Session) -> AppResult<Session> {
        let Some(refresh) = session.refresh_token.as_deref() else {
            self.sessions.remove(&session.id).await;
            return Err(AppError::Unauthorized("No refresh token".to_string()));
        };

        match self.api.refresh(refresh).await {
            Ok(response) => {
                self.sessions
                    .update_tokens(&session.id, response.access, None)
                    .await
            }
            Err(e) => {
                self.sessions.remove(&session.id).await;
                Err(e)
            }
        }
    }

    pub async fn change_password(
        &self,
        session: &Session,
        request: ChangePasswordRequest,
    ) -> AppResult<()> {
        request.validate()?;
        self.api.change_password(&session.access_token, &request).await?;
        info!("🔑 Contraseña cambiada para {}", session.identity.email);
        Ok(())
    }

    /// Actualiza el perfil y refresca la identidad guardada en la sesión
    pub async fn update_profile(&self, session: &Session, form: ProfileForm) -> AppResult<Identity> {
        form.validate()?;
        let user = self.api.update_profile(&session.access_token, &form).await?;
        let identity = Identity::from(user);
        self.sessions.update_identity(&session.id, identity.clone()).await;
        Ok(identity)
    }
}
